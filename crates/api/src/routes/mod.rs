pub mod ops;
pub mod orders;
pub mod products;

use catalog_store::CatalogStore;
use domain::{CatalogService, OrderValidator};

use crate::error::ErrorMapper;

/// Shared application state accessible from all handlers.
pub struct AppState<S: CatalogStore> {
    pub catalog: CatalogService<S>,
    pub orders: OrderValidator<S>,
    pub errors: ErrorMapper,
}
