use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::{
    Product, ProductDraft, ProductPatch, Result, StoreError, schema,
    store::{CatalogStore, parse_ids},
};

/// In-memory catalog store.
///
/// Used by the tests and as the default back-end when no database is
/// configured. Behaves like the PostgreSQL implementation, including the
/// unique title index.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Removes all products.
    pub async fn clear(&self) {
        self.products.write().await.clear();
    }
}

fn title_taken(products: &[Product], title: &str, except: Option<&ProductId>) -> bool {
    products
        .iter()
        .any(|p| p.title == title && Some(&p.id) != except)
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
        let wanted: HashSet<ProductId> = parse_ids(ids)?.into_iter().collect();
        let store = self.products.read().await;
        Ok(store
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;
        let store = self.products.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool> {
        let store = self.products.read().await;
        Ok(title_taken(&store, title, None))
    }

    async fn insert(&self, draft: ProductDraft) -> Result<Product> {
        let product = schema::new_product(ProductId::generate(), draft, schema::now())?;

        let mut store = self.products.write().await;
        if title_taken(&store, &product.title, None) {
            return Err(StoreError::DuplicateKey {
                field: "title",
                value: product.title,
            });
        }
        store.push(product.clone());

        Ok(product)
    }

    async fn update_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;

        let mut store = self.products.write().await;
        let Some(index) = store.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        let updated = schema::apply_patch(store[index].clone(), patch, schema::now())?;
        if title_taken(&store, &updated.title, Some(&id)) {
            return Err(StoreError::DuplicateKey {
                field: "title",
                value: updated.title,
            });
        }
        store[index] = updated.clone();

        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Product>> {
        let id = ProductId::parse(id)?;

        let mut store = self.products.write().await;
        Ok(store
            .iter()
            .position(|p| p.id == id)
            .map(|index| store.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductImage;

    fn draft(title: &str, price: Option<f64>) -> ProductDraft {
        let draft = ProductDraft::new(title, ProductImage::new("x.svg", "X.svg"), "misc");
        match price {
            Some(p) => draft.with_price(p),
            None => draft,
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let store = InMemoryCatalogStore::new();
        let product = store.insert(draft("Lamp", Some(100.0))).await.unwrap();

        let found = store.find_by_id(product.id.as_str()).await.unwrap();
        assert_eq!(found, Some(product));
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn find_by_id_missing_returns_none() {
        let store = InMemoryCatalogStore::new();
        let found = store
            .find_by_id(ProductId::generate().as_str())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_by_id_malformed_is_invalid_identifier() {
        let store = InMemoryCatalogStore::new();
        let result = store.find_by_id("not-an-id").await;
        assert!(matches!(result, Err(StoreError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn find_by_ids_omits_missing() {
        let store = InMemoryCatalogStore::new();
        let a = store.insert(draft("Lamp", Some(100.0))).await.unwrap();
        let b = store.insert(draft("Desk", Some(250.0))).await.unwrap();
        store.insert(draft("Chair", None)).await.unwrap();

        let ids = vec![
            a.id.to_string(),
            b.id.to_string(),
            ProductId::generate().to_string(),
        ];
        let found = store.find_by_ids(&ids).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|p| p.id == a.id));
        assert!(found.iter().any(|p| p.id == b.id));
    }

    #[tokio::test]
    async fn find_by_ids_fails_on_malformed_id() {
        let store = InMemoryCatalogStore::new();
        let ids = vec!["xyz".to_string()];
        assert!(matches!(
            store.find_by_ids(&ids).await,
            Err(StoreError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = InMemoryCatalogStore::new();
        store.insert(draft("First", None)).await.unwrap();
        store.insert(draft("Second", None)).await.unwrap();

        let titles: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn exists_by_title_is_exact() {
        let store = InMemoryCatalogStore::new();
        store.insert(draft("Lamp", None)).await.unwrap();

        assert!(store.exists_by_title("Lamp").await.unwrap());
        assert!(!store.exists_by_title("lamp").await.unwrap());
        assert!(!store.exists_by_title("Lamp 2").await.unwrap());
    }

    #[tokio::test]
    async fn insert_duplicate_title_is_duplicate_key() {
        let store = InMemoryCatalogStore::new();
        store.insert(draft("Lamp", None)).await.unwrap();

        let result = store.insert(draft(" Lamp ", Some(5.0))).await;
        assert!(matches!(
            result,
            Err(StoreError::DuplicateKey { field: "title", .. })
        ));
        assert_eq!(store.product_count().await, 1);
    }

    #[tokio::test]
    async fn insert_invalid_document_is_rejected() {
        let store = InMemoryCatalogStore::new();
        let result = store.insert(draft("L", None)).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn update_by_id_applies_patch() {
        let store = InMemoryCatalogStore::new();
        let product = store.insert(draft("Lamp", Some(100.0))).await.unwrap();

        let updated = store
            .update_by_id(
                product.id.as_str(),
                ProductPatch::new().title("Desk lamp").price(None),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Desk lamp");
        assert_eq!(updated.price, None);

        let reloaded = store.find_by_id(product.id.as_str()).await.unwrap();
        assert_eq!(reloaded, Some(updated));
    }

    #[tokio::test]
    async fn update_to_taken_title_is_duplicate_key() {
        let store = InMemoryCatalogStore::new();
        store.insert(draft("Lamp", None)).await.unwrap();
        let desk = store.insert(draft("Desk", None)).await.unwrap();

        let result = store
            .update_by_id(desk.id.as_str(), ProductPatch::new().title("Lamp"))
            .await;
        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn update_keeping_own_title_is_allowed() {
        let store = InMemoryCatalogStore::new();
        let lamp = store.insert(draft("Lamp", None)).await.unwrap();

        let updated = store
            .update_by_id(lamp.id.as_str(), ProductPatch::new().title("Lamp"))
            .await
            .unwrap();
        assert!(updated.is_some());
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = InMemoryCatalogStore::new();
        let result = store
            .update_by_id(ProductId::generate().as_str(), ProductPatch::new().title("Lamp"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_by_id_removes_product() {
        let store = InMemoryCatalogStore::new();
        let product = store.insert(draft("Lamp", None)).await.unwrap();

        let deleted = store.delete_by_id(product.id.as_str()).await.unwrap();
        assert_eq!(deleted.map(|p| p.id), Some(product.id.clone()));
        assert!(store.delete_by_id(product.id.as_str()).await.unwrap().is_none());
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryCatalogStore::new();
        store.insert(draft("Lamp", None)).await.unwrap();
        store.clear().await;
        assert_eq!(store.product_count().await, 0);
    }
}
