//! Order confirmation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use catalog_store::CatalogStore;
use domain::{OrderConfirmation, OrderRequest};

use super::AppState;
use crate::error::ApiError;
use crate::schema::{self, CreateOrderRequest};

/// POST /order: checks the claimed total against catalog prices.
///
/// Answers 201 with `{id, total}` on success. Nothing is stored.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderConfirmation>), ApiError> {
    let req = schema::validated(body)?;
    tracing::debug!(payment = ?req.payment, items = req.items.len(), "order received");

    let order: OrderRequest = req.into();
    let confirmation = state
        .orders
        .validate(&order)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}
