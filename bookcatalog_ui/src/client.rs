use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;

use crate::api::{Book, BookId, ErrorResponse, NewBook};
use crate::backend::CatalogBackend;
use crate::error::CatalogError;

/// Client of the catalog REST API
pub struct BookCatalogClient {
    url: String,
    client: ClientWithMiddleware,
}

impl BookCatalogClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the request, failing with a Server error on any non-2xx status
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<String, CatalogError> {
        let response = request.send().await.map_err(|err| CatalogError::Network {
            url: url.to_string(),
            message: err.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| CatalogError::Network {
            url: url.to_string(),
            message: err.to_string(),
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|error_response| error_response.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown status")
                        .to_string()
                });
            Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, CatalogError> {
        let body = self.send(request, url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl CatalogBackend for BookCatalogClient {
    /// Calls GET /api/books endpoint
    async fn list_books(&self) -> Result<Vec<Book>, CatalogError> {
        let url = format!("{}/api/books", self.url);
        self.get_json(self.client.get(&url), &url).await
    }

    /// Calls GET /api/search?q={query} endpoint
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let url = format!("{}/api/search", self.url);
        self.get_json(self.client.get(&url).query(&[("q", query)]), &url)
            .await
    }

    /// Calls POST /api/books endpoint, the created book in the response is ignored
    async fn add_book(&self, book: NewBook) -> Result<(), CatalogError> {
        let url = format!("{}/api/books", self.url);
        self.send(self.client.post(&url).json(&book), &url).await?;
        Ok(())
    }

    /// Calls DELETE /api/books/{book_id} endpoint
    async fn delete_book(&self, book_id: BookId) -> Result<(), CatalogError> {
        let url = format!("{}/api/books/{}", self.url, book_id);
        self.send(self.client.delete(&url), &url).await?;
        Ok(())
    }
}
