use crate::api::BookId;

/// Failure of a single call to the catalog backend
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The request never completed
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The backend answered with a non-2xx status
    #[error("Backend responded with {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn not_found(book_id: BookId) -> Self {
        CatalogError::Server {
            status: 404,
            message: format!("Book {} not found", book_id),
        }
    }

    /// Short label shown in front of the notice text
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Network { .. } => "Network error",
            CatalogError::Server { .. } => "Server error",
            CatalogError::Decode(_) => "Decode error",
        }
    }
}
