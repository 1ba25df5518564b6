//! Price-integrity check for incoming orders.

use std::collections::{HashMap, HashSet};

use catalog_store::{CatalogStore, Product, ProductId, StoreError};
use common::OrderId;

use super::{OrderConfirmation, OrderError, OrderRequest};
use crate::error::{DomainError, Result, ServiceError};

/// Confirms that an order's claimed total matches catalog prices.
///
/// The validator only reads from the catalog and never records the order;
/// a confirmed order is just a fresh identifier and the checked total.
///
/// Repeated identifiers in `items` are separate units: each occurrence
/// adds the product's price to the expected total.
pub struct OrderValidator<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> OrderValidator<S> {
    /// Creates a validator reading from the given catalog store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Checks an order request and confirms it.
    ///
    /// Fails with [`OrderError`] when the request is malformed, references
    /// missing or unpriced products, or claims the wrong total. Store
    /// failures other than a malformed identifier are passed through
    /// unclassified.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len(), total = request.total))]
    pub async fn validate(&self, request: &OrderRequest) -> Result<OrderConfirmation> {
        match self.check(request).await {
            Ok(confirmation) => {
                metrics::counter!("orders_confirmed_total").increment(1);
                tracing::info!(order_id = %confirmation.id, "order confirmed");
                Ok(confirmation)
            }
            Err(ServiceError::Domain(DomainError::Order(err))) => {
                metrics::counter!("orders_rejected_total", "reason" => err.reason()).increment(1);
                tracing::debug!(reason = err.reason(), "order rejected");
                Err(err.into())
            }
            Err(other) => Err(other),
        }
    }

    async fn check(&self, request: &OrderRequest) -> Result<OrderConfirmation> {
        request.check_shape()?;

        let unique = unique_item_ids(&request.items);
        let products = self
            .store
            .find_by_ids(&unique)
            .await
            .map_err(|err| match err {
                StoreError::InvalidIdentifier(_) => ServiceError::from(OrderError::InvalidProductId),
                other => ServiceError::Store(other),
            })?;

        let expected = reconcile_total(&request.items, unique.len(), &products)?;
        if expected != request.total {
            return Err(OrderError::TotalMismatch {
                expected,
                received: request.total,
            }
            .into());
        }

        Ok(OrderConfirmation {
            id: OrderId::new(),
            total: request.total,
        })
    }
}

/// Returns the distinct identifiers of `items` in first-occurrence order.
///
/// Identifiers differing only in letter case name the same product and are
/// collapsed.
pub fn unique_item_ids(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|id| seen.insert(id.to_ascii_lowercase()))
        .cloned()
        .collect()
}

/// Computes the expected order total from the fetched products.
///
/// `distinct_requested` is the number of distinct identifiers that were
/// looked up. Checks completeness, then availability, then sums one price
/// per entry of `items`.
pub fn reconcile_total(
    items: &[String],
    distinct_requested: usize,
    products: &[Product],
) -> std::result::Result<f64, OrderError> {
    if products.len() < distinct_requested {
        return Err(OrderError::ProductsNotFound);
    }
    if products.iter().any(|p| !p.is_for_sale()) {
        return Err(OrderError::ProductsUnavailable);
    }

    let prices: HashMap<&ProductId, f64> = products
        .iter()
        .map(|p| (&p.id, p.price.unwrap_or(0.0)))
        .collect();

    items.iter().try_fold(0.0, |sum: f64, item| -> std::result::Result<f64, OrderError> {
        let id = ProductId::parse(item).map_err(|_| OrderError::InvalidProductId)?;
        let price = prices.get(&id).ok_or(OrderError::ProductsNotFound)?;
        Ok(sum + price)
    })
}
