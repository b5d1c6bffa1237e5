use thiserror::Error;

use crate::api::ApiError;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod products;

/// Result type returned by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to the UI by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed validation; the message is shown as-is.
    #[error("{0}")]
    Validation(String),
    /// The product is not in the loaded catalog.
    #[error("product {0} is not in the catalog")]
    ProductNotFound(i32),
    /// The cart holds no line for the product at that price.
    #[error("product {0} is not in the cart")]
    LineNotFound(i32),
    /// A checkout is pending and the cart cannot be edited.
    #[error("checkout in progress, the cart is locked")]
    EditingLocked,
    /// A collaborator call never completed.
    #[error("connection error: {0}")]
    Transport(String),
    /// The backend rejected a collaborator call.
    #[error("{0}")]
    Rejected(String),
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(message) => Self::Transport(message),
            ApiError::Rejected { detail } => Self::Rejected(detail),
        }
    }
}
