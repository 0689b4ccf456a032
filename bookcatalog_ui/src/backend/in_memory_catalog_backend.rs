use std::sync::atomic::{AtomicI64, Ordering};

use crate::api::{Book, BookId, NewBook};
use crate::backend::CatalogBackend;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A call received by [`InMemoryCatalogBackend`]
pub enum BackendRequest {
    ListBooks,
    SearchBooks(String),
    AddBook(NewBook),
    DeleteBook(BookId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Failure injected into every call until cleared
pub enum FailureKind {
    Network,
    Server(u16),
    Decode,
}

impl FailureKind {
    fn to_error(self) -> CatalogError {
        match self {
            FailureKind::Network => CatalogError::Network {
                url: "memory://catalog".to_string(),
                message: "connection refused".to_string(),
            },
            FailureKind::Server(status) => CatalogError::Server {
                status,
                message: "injected failure".to_string(),
            },
            FailureKind::Decode => CatalogError::Decode(serde::de::Error::custom(
                "expected a list of books",
            )),
        }
    }
}

/// Catalog kept in process memory, behaving like the REST backend:
/// newest books are listed first, search matches title, author, isbn and
/// publisher case-insensitively and an empty query matches nothing.
pub struct InMemoryCatalogBackend {
    book_sequence_generator: AtomicI64,
    books: parking_lot::RwLock<Vec<Book>>,
    requests: parking_lot::Mutex<Vec<BackendRequest>>,
    failure: parking_lot::Mutex<Option<FailureKind>>,
}

impl Default for InMemoryCatalogBackend {
    fn default() -> Self {
        Self {
            book_sequence_generator: AtomicI64::new(1),
            books: Default::default(),
            requests: Default::default(),
            failure: Default::default(),
        }
    }
}

impl InMemoryCatalogBackend {
    /// Creates a backend already holding the given books, first one listed last
    pub fn with_books(books: impl IntoIterator<Item = NewBook>) -> Self {
        let backend = Self::default();
        {
            let mut locked_books = backend.books.write();
            for book in books {
                backend.insert(&mut locked_books, book);
            }
        }
        backend
    }

    /// Every call received so far, oldest first
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Makes every following call fail with `failure`, `None` restores normal behavior
    pub fn fail_with(&self, failure: Option<FailureKind>) {
        *self.failure.lock() = failure;
    }

    /// Current content, bypassing request recording
    pub fn books(&self) -> Vec<Book> {
        self.books.read().clone()
    }

    fn insert(&self, locked_books: &mut Vec<Book>, book: NewBook) -> BookId {
        let id = self.book_sequence_generator.fetch_add(1, Ordering::Relaxed);
        locked_books.insert(0, book.into_book(id));
        id
    }

    fn record(&self, request: BackendRequest) -> Result<(), CatalogError> {
        self.requests.lock().push(request);
        match *self.failure.lock() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

fn matches(book: &Book, pattern: &str) -> bool {
    [
        Some(&book.title),
        book.author.as_ref(),
        book.isbn.as_ref(),
        book.publisher.as_ref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(pattern))
}

#[async_trait::async_trait]
impl CatalogBackend for InMemoryCatalogBackend {
    async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        self.record(BackendRequest::ListBooks)?;
        Ok(self.books.read().clone())
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        self.record(BackendRequest::SearchBooks(query.to_string()))?;
        let pattern = query.trim().to_lowercase();
        if pattern.is_empty() {
            return Ok(vec![]);
        }
        Ok(self
            .books
            .read()
            .iter()
            .filter(|book| matches(book, &pattern))
            .cloned()
            .collect())
    }

    async fn add_book(&self, book: NewBook) -> Result<(), CatalogError> {
        self.record(BackendRequest::AddBook(book.clone()))?;
        if book.title.is_empty() {
            return Err(CatalogError::Server {
                status: 400,
                message: "title required".to_string(),
            });
        }
        // ISBN check and insert share one write guard
        let mut locked_books = self.books.write();
        if !book.isbn.is_empty()
            && locked_books
                .iter()
                .any(|existing| existing.isbn.as_deref() == Some(book.isbn.as_str()))
        {
            return Err(CatalogError::Server {
                status: 400,
                message: "ISBN already exists".to_string(),
            });
        }
        self.insert(&mut locked_books, book);
        Ok(())
    }

    async fn delete_book(&self, book_id: BookId) -> Result<(), CatalogError> {
        self.record(BackendRequest::DeleteBook(book_id))?;
        let mut locked_books = self.books.write();
        match locked_books.iter().position(|book| book.id == book_id) {
            Some(index) => {
                locked_books.remove(index);
                Ok(())
            }
            None => Err(CatalogError::not_found(book_id)),
        }
    }
}

#[cfg(test)]
mod in_memory_catalog_backend_tests {
    use std::sync::Arc;

    use crate::api::NewBook;
    use crate::backend::{BackendRequest, CatalogBackend, FailureKind, InMemoryCatalogBackend};
    use crate::error::CatalogError;

    fn new_book(title: &str, author: &str, isbn: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            publisher: "".to_string(),
            year: None,
            copies: 1,
            available_copies: 1,
        }
    }

    #[tokio::test]
    async fn test_add_books_and_list_newest_first() {
        let backend = InMemoryCatalogBackend::default();
        assert_eq!(backend.list_books().await.unwrap(), vec![]);

        backend
            .add_book(new_book("Dune", "Herbert", ""))
            .await
            .expect("Failed to add book");
        backend
            .add_book(new_book("Solaris", "Lem", ""))
            .await
            .expect("Failed to add book");

        let titles: Vec<String> = backend
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, vec!["Solaris".to_string(), "Dune".to_string()]);
    }

    #[tokio::test]
    async fn test_add_book_rejections() {
        let backend = InMemoryCatalogBackend::with_books([new_book("Dune", "Herbert", "123")]);

        let no_title = backend.add_book(new_book("", "x", "")).await;
        assert!(matches!(
            no_title,
            Err(CatalogError::Server { status: 400, ref message }) if message == "title required"
        ));

        let duplicate = backend.add_book(new_book("Dune 2", "Herbert", "123")).await;
        assert!(matches!(
            duplicate,
            Err(CatalogError::Server { status: 400, ref message }) if message == "ISBN already exists"
        ));

        assert_eq!(backend.books().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_isbn_adds_one_book() {
        let backend = Arc::new(InMemoryCatalogBackend::default());

        let handles: Vec<_> = (0..16)
            .map(|attempt| {
                let backend = backend.clone();
                tokio::spawn(async move {
                    backend
                        .add_book(new_book(&format!("Dune {}", attempt), "Herbert", "978"))
                        .await
                })
            })
            .collect();

        let mut added = 0;
        for handle in handles {
            if handle.await.expect("Failed to join add task").is_ok() {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(backend.books().len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_any_text_field() {
        let backend = InMemoryCatalogBackend::with_books([
            new_book("Dune", "Frank Herbert", "111"),
            new_book("Solaris", "Stanislaw Lem", "222"),
        ]);

        let by_author = backend.search_books("herb").await.unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "Dune");

        let by_isbn = backend.search_books("22").await.unwrap();
        assert_eq!(by_isbn[0].title, "Solaris");

        assert_eq!(backend.search_books("  ").await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_delete_book_and_record_requests() {
        let backend = InMemoryCatalogBackend::with_books([new_book("Dune", "Herbert", "")]);
        let id = backend.books()[0].id;

        backend.delete_book(id).await.expect("Failed to delete");
        let missing = backend.delete_book(id).await;
        assert!(matches!(
            missing,
            Err(CatalogError::Server { status: 404, .. })
        ));

        assert_eq!(
            backend.requests(),
            vec![BackendRequest::DeleteBook(id), BackendRequest::DeleteBook(id)]
        );
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let backend = InMemoryCatalogBackend::with_books([new_book("Dune", "Herbert", "")]);

        backend.fail_with(Some(FailureKind::Decode));
        assert!(matches!(
            backend.list_books().await,
            Err(CatalogError::Decode(_))
        ));

        backend.fail_with(Some(FailureKind::Network));
        assert!(matches!(
            backend.delete_book(1).await,
            Err(CatalogError::Network { .. })
        ));
        assert_eq!(backend.books().len(), 1);

        backend.fail_with(None);
        assert_eq!(backend.list_books().await.unwrap().len(), 1);
    }
}
