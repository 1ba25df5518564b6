use async_trait::async_trait;
use common::ProductId;

use crate::{Product, ProductDraft, ProductPatch, Result};

/// Query and write surface over the product collection.
///
/// Identifiers are accepted in their raw textual form and parsed here, so
/// a malformed identifier surfaces as [`StoreError::InvalidIdentifier`]
/// rather than as a generic failure. Implementations perform no business
/// checks beyond the field schema and the unique title index; every write
/// touches exactly one product.
///
/// All implementations must be thread-safe (Send + Sync).
///
/// [`StoreError::InvalidIdentifier`]: crate::StoreError::InvalidIdentifier
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns every product in insertion order.
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Returns the products whose identifiers are in `ids`.
    ///
    /// Identifiers with no matching product are silently omitted; callers
    /// that need completeness must compare counts. Fails if any identifier
    /// is malformed.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Product>>;

    /// Returns the product with the given identifier, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;

    /// Returns true if a product with exactly this title exists.
    async fn exists_by_title(&self, title: &str) -> Result<bool>;

    /// Stores a new product and returns it with its assigned identifier.
    ///
    /// Fails with `DuplicateKey` if the title is taken and with
    /// `Validation` if the document breaks the field schema.
    async fn insert(&self, draft: ProductDraft) -> Result<Product>;

    /// Applies a partial update and returns the updated product.
    ///
    /// Returns None if no product has this identifier.
    async fn update_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>>;

    /// Removes a product and returns what was removed.
    ///
    /// Returns None if no product has this identifier.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>>;
}

/// Parses a batch of raw identifiers, failing on the first malformed one.
pub fn parse_ids(ids: &[String]) -> Result<Vec<ProductId>> {
    ids.iter()
        .map(|id| ProductId::parse(id).map_err(Into::into))
        .collect()
}
