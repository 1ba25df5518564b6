//! Product catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog_store::{CatalogStore, Product};
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;
use crate::schema::{self, CreateProductRequest, UpdateProductRequest};

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub items: Vec<Product>,
    pub total: usize,
}

/// Wrapper for the result of a catalog write.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub success: bool,
    pub message: &'static str,
    pub data: Product,
}

impl ProductEnvelope {
    fn new(message: &'static str, data: Product) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// GET /product
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ProductList>, ApiError> {
    let items = state
        .catalog
        .list_products()
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(ProductList {
        total: items.len(),
        items,
    }))
}

/// GET /product/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = schema::product_id(&id)?;
    let product = state
        .catalog
        .get_product(id)
        .await
        .map_err(|e| state.errors.map(e))?;
    Ok(Json(product))
}

/// POST /product
#[tracing::instrument(skip(state, body))]
pub async fn create<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductEnvelope>), ApiError> {
    let req = schema::validated(body)?;
    let product = state
        .catalog
        .create_product(req.into())
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok((
        StatusCode::CREATED,
        Json(ProductEnvelope::new("product created", product)),
    ))
}

/// PATCH /product/{id}
#[tracing::instrument(skip(state, body))]
pub async fn update<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let id = schema::product_id(&id)?;
    let req = schema::validated(body)?;
    let product = state
        .catalog
        .update_product(id, req.into())
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(ProductEnvelope::new("product updated", product)))
}

/// DELETE /product/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let id = schema::product_id(&id)?;
    let product = state
        .catalog
        .delete_product(id)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(ProductEnvelope::new("product deleted", product)))
}
