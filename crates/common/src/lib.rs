//! Shared identifier types and serialization helpers for the storefront API.

pub mod number;
mod types;

pub use types::{InvalidProductId, OrderId, PRODUCT_ID_LEN, ProductId};
