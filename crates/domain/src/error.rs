//! Domain error taxonomy.

use catalog_store::StoreError;
use thiserror::Error;

use crate::order::OrderError;

/// Classification of a domain error, each tied to one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Conflict,
    NotFound,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::NotFound => 404,
        }
    }
}

/// Classified, client-facing failures raised by the domain layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// The order request was rejected.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Another product already uses this title.
    #[error("a product with this title already exists")]
    DuplicateTitle,
}

impl DomainError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Order(_) => ErrorKind::BadRequest,
            DomainError::ProductNotFound => ErrorKind::NotFound,
            DomainError::DuplicateTitle => ErrorKind::Conflict,
        }
    }
}

/// Failure of a domain operation: either already classified, or a raw
/// store failure left for the response layer to classify.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Catalog store error: {0}")]
    Store(#[from] StoreError),
}

impl From<OrderError> for ServiceError {
    fn from(err: OrderError) -> Self {
        ServiceError::Domain(DomainError::Order(err))
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
