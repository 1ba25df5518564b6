use common::OrderId;
use common::number::serialize_amount;
use serde::{Deserialize, Serialize};

use super::OrderError;

/// The part of an order the integrity check consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Product identifiers in request order. Repeats are separate units.
    pub items: Vec<String>,
    /// Total the client claims the order costs.
    pub total: f64,
}

impl OrderRequest {
    pub fn new<I, T>(items: I, total: f64) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            total,
        }
    }

    /// Re-checks the shape guarantees normally enforced upstream.
    pub fn check_shape(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        if self.items.iter().any(|id| id.is_empty()) {
            return Err(OrderError::BlankItem);
        }
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(OrderError::InvalidTotal);
        }
        Ok(())
    }
}

/// A confirmed order. Nothing is persisted; this is the whole result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: OrderId,
    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_request_passes() {
        let request = OrderRequest::new(["65a1b2c3d4e5f60718293a4b"], 0.0);
        assert_eq!(request.check_shape(), Ok(()));
    }

    #[test]
    fn empty_items_rejected() {
        let request = OrderRequest::new(Vec::<String>::new(), 10.0);
        assert_eq!(request.check_shape(), Err(OrderError::NoItems));
    }

    #[test]
    fn blank_item_rejected() {
        let request = OrderRequest::new(["65a1b2c3d4e5f60718293a4b", ""], 10.0);
        assert_eq!(request.check_shape(), Err(OrderError::BlankItem));
    }

    #[test]
    fn negative_or_nan_total_rejected() {
        let negative = OrderRequest::new(["a"], -1.0);
        assert_eq!(negative.check_shape(), Err(OrderError::InvalidTotal));

        let nan = OrderRequest::new(["a"], f64::NAN);
        assert_eq!(nan.check_shape(), Err(OrderError::InvalidTotal));
    }
}
