//! Persistence boundary for the product catalog.
//!
//! - [`CatalogStore`] trait: identifier-addressed reads and single-product writes
//! - [`StoreError`]: typed failures, including [`StoreError::InvalidIdentifier`]
//!   and [`StoreError::DuplicateKey`]
//! - [`InMemoryCatalogStore`] and [`PostgresCatalogStore`] back-ends

pub mod error;
pub mod memory;
pub mod postgres;
pub mod product;
pub mod schema;
pub mod store;

pub use common::ProductId;
pub use error::{Result, StoreError};
pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use product::{Product, ProductDraft, ProductImage, ProductImagePatch, ProductPatch};
pub use store::CatalogStore;
