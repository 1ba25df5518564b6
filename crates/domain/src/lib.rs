//! Domain layer for the storefront API.
//!
//! - [`OrderValidator`]: price-integrity check for incoming orders
//! - [`CatalogService`]: product use-cases with not-found and title checks
//! - [`DomainError`], [`ErrorKind`] and [`ServiceError`]: the error taxonomy

pub mod catalog;
pub mod error;
pub mod order;

pub use catalog::CatalogService;
pub use error::{DomainError, ErrorKind, Result, ServiceError};
pub use order::{OrderConfirmation, OrderError, OrderRequest, OrderValidator};
