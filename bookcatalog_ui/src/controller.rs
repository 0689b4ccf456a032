use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{Book, BookId};
use crate::backend::CatalogBackend;
use crate::error::CatalogError;
use crate::form::BookForm;
use crate::render::{render, BookTable};

pub const DELETE_CONFIRMATION: &str = "Delete book?";

/// Blocking yes/no question asked before a destructive action
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// Event raised inside the book table
pub enum TableEvent {
    /// Delete control of the row tagged with `book_id` was activated
    DeleteClicked { book_id: BookId },
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// Visible, non-blocking message about a failed operation
pub struct Notice {
    pub message: String,
}

impl From<&CatalogError> for Notice {
    fn from(err: &CatalogError) -> Self {
        Notice {
            message: format!("{}: {}", err.kind(), err),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// Everything currently painted on the page
pub struct ViewState {
    pub table: BookTable,
    pub search_input: String,
    pub form: BookForm,
    pub notice: Option<Notice>,
    /// Set once the first read completed successfully
    pub loaded: bool,
}

/// Owns the book table and keeps it consistent with the most recent list read from the backend.
///
/// Operations may overlap; each one replaces the table as a whole when its read completes,
/// so the last completed read wins and no render ever mixes rows of two reads.
pub struct ViewController {
    backend: Arc<dyn CatalogBackend>,
    state: RwLock<ViewState>,
}

impl ViewController {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            state: Default::default(),
        }
    }

    /// Copy of the current view
    pub fn snapshot(&self) -> ViewState {
        self.state.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// Re-fetches all books and replaces the table body
    pub async fn refresh(&self) {
        self.clear_notice();
        self.load(None).await;
    }

    /// Asks for confirmation, deletes the book and refreshes whatever the delete outcome was.
    /// Declining sends nothing and leaves the table untouched.
    pub async fn handle_delete(&self, book_id: BookId, prompt: &dyn ConfirmPrompt) {
        if !prompt.confirm(DELETE_CONFIRMATION) {
            tracing::info!("Delete of book {} declined", book_id);
            return;
        }
        self.clear_notice();

        match self.backend.delete_book(book_id).await {
            Ok(()) => tracing::info!("Deleted book {}", book_id),
            Err(err) => self.report(&format!("Delete book {} failed", book_id), &err),
        }
        self.load(None).await;
    }

    /// Sends the form as a new book, clears the form and refreshes.
    /// A rejected create keeps the form so the entry can be corrected.
    pub async fn handle_create(&self, form: BookForm) {
        self.clear_notice();
        let payload = form.to_new_book();
        let title = payload.title.clone();

        match self.backend.add_book(payload).await {
            Ok(()) => {
                tracing::info!("Added book {:?}", title);
                self.state.write().form = BookForm::default();
            }
            Err(err) => {
                self.report(&format!("Add book {:?} failed", title), &err);
                self.state.write().form = form;
            }
        }
        self.load(None).await;
    }

    /// Shows only books matching `query`, an empty or blank query shows all books
    pub async fn handle_search(&self, query: &str) {
        self.clear_notice();
        self.state.write().search_input = query.to_string();

        let query = query.trim();
        if query.is_empty() {
            self.load(None).await;
        } else {
            self.load(Some(query)).await;
        }
    }

    /// Empties the search input and shows all books
    pub async fn clear_search(&self) {
        self.clear_notice();
        self.state.write().search_input.clear();
        self.load(None).await;
    }

    /// Single entry point for events raised inside the table.
    /// Events carrying an id that is not part of the current render are dropped.
    pub async fn dispatch(&self, event: TableEvent, prompt: &dyn ConfirmPrompt) {
        match event {
            TableEvent::DeleteClicked { book_id } => {
                if !self.state.read().table.has_delete_target(book_id) {
                    tracing::warn!("Ignoring delete of book {} not in the current table", book_id);
                    return;
                }
                self.handle_delete(book_id, prompt).await;
            }
        }
    }

    async fn load(&self, query: Option<&str>) {
        let result = match query {
            None => self.backend.list_books().await,
            Some(query) => self.backend.search_books(query).await,
        };
        match result {
            Ok(books) => self.paint(&books),
            Err(err) => self.report("Loading books failed", &err),
        }
    }

    fn paint(&self, books: &[Book]) {
        let table = render(books);
        tracing::info!("Rendering {} books", table.len());
        let mut state = self.state.write();
        state.table = table;
        state.loaded = true;
    }

    fn report(&self, context: &str, err: &CatalogError) {
        tracing::error!("{}: {}", context, err);
        self.state.write().notice = Some(Notice::from(err));
    }

    fn clear_notice(&self) {
        self.state.write().notice = None;
    }
}
