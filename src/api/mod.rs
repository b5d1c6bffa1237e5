use thiserror::Error;

use crate::api::payloads::{SaleReceipt, SaleRequest};
use crate::domain::client::Client;
use crate::domain::product::{Product, ProductPatch};

pub mod payloads;

#[cfg(test)]
pub mod mock;

/// Result type returned by collaborator calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("connection error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{detail}")]
    Rejected {
        /// Message supplied by the backend for display.
        detail: String,
    },
}

impl ApiError {
    /// Builds a rejection from a non-success response body.
    ///
    /// The backend reports failures as `{"detail": "..."}`; anything
    /// else collapses into a generic message.
    pub fn rejected_from_body(body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
            .unwrap_or_else(|| "The request was rejected by the server".to_string());

        Self::Rejected { detail }
    }
}

/// Read and write access to the catalog backend.
pub trait CatalogProvider {
    fn fetch_products(&self) -> ApiResult<Vec<Product>>;
    fn fetch_clients(&self) -> ApiResult<Vec<Client>>;
    fn update_product(&self, product_id: i32, patch: &ProductPatch) -> ApiResult<Product>;
}

/// Submission access to the sales backend.
pub trait SalesGateway {
    fn submit_sale(&self, request: &SaleRequest) -> ApiResult<SaleReceipt>;
}
