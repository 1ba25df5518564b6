//! Order requests and their integrity check.

mod request;
mod validator;

pub use request::{OrderConfirmation, OrderRequest};
pub use validator::{OrderValidator, reconcile_total, unique_item_ids};

use thiserror::Error;

/// Reasons an order request is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// The item list is empty.
    #[error("order must contain at least one item")]
    NoItems,

    /// An item entry is an empty string.
    #[error("order items must be non-empty product ids")]
    BlankItem,

    /// The claimed total is negative or not a finite number.
    #[error("order total must be a non-negative number")]
    InvalidTotal,

    /// An item is not a well-formed product identifier.
    #[error("invalid product id")]
    InvalidProductId,

    /// At least one item does not resolve to a product.
    #[error("some products not found")]
    ProductsNotFound,

    /// At least one resolved product has no price.
    #[error("some products unavailable for sale")]
    ProductsUnavailable,

    /// The claimed total differs from the sum of item prices.
    #[error("order total mismatch: expected {expected}, received {received}")]
    TotalMismatch { expected: f64, received: f64 },
}

impl OrderError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            OrderError::NoItems | OrderError::BlankItem | OrderError::InvalidTotal => "malformed",
            OrderError::InvalidProductId => "invalid_product_id",
            OrderError::ProductsNotFound => "not_found",
            OrderError::ProductsUnavailable => "unavailable",
            OrderError::TotalMismatch { .. } => "total_mismatch",
        }
    }
}
