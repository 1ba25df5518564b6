//! Catalog use-cases on top of the product store.

use catalog_store::{CatalogStore, Product, ProductDraft, ProductPatch};

use crate::error::{DomainError, Result};

/// Service for reading and managing catalog products.
///
/// Adds the domain classification the store does not make: missing
/// products become [`DomainError::ProductNotFound`] and a taken title is
/// reported as [`DomainError::DuplicateTitle`] before any write.
pub struct CatalogService<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a new catalog service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists every product.
    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.find_all().await?)
    }

    /// Loads a product by identifier.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound.into())
    }

    /// Creates a product after checking its title is free.
    ///
    /// The title check and the insert are separate operations; a concurrent
    /// insert of the same title still fails at the store's unique index.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        if self.store.exists_by_title(draft.title.trim()).await? {
            return Err(DomainError::DuplicateTitle.into());
        }

        let product = self.store.insert(draft).await?;
        metrics::counter!("products_created_total").increment(1);
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Applies a partial update to a product.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product> {
        let product = self
            .store
            .update_by_id(id, patch)
            .await?
            .ok_or(DomainError::ProductNotFound)?;
        tracing::info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Deletes a product and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<Product> {
        let product = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or(DomainError::ProductNotFound)?;
        tracing::info!(product_id = %product.id, "product deleted");
        Ok(product)
    }
}
