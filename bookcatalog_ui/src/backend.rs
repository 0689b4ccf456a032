pub use in_memory_catalog_backend::{BackendRequest, FailureKind, InMemoryCatalogBackend};

use crate::api::{Book, BookId, NewBook};
use crate::error::CatalogError;

mod in_memory_catalog_backend;

/// The four calls the UI makes against the catalog REST API
#[async_trait::async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Lists all books, in the order the backend returns them
    async fn list_books(&self) -> Result<Vec<Book>, CatalogError>;
    /// Lists books matching the query
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, CatalogError>;
    /// Adds a book, the created record returned by the backend is discarded
    async fn add_book(&self, book: NewBook) -> Result<(), CatalogError>;
    /// Deletes a book by id
    async fn delete_book(&self, book_id: BookId) -> Result<(), CatalogError>;
}
