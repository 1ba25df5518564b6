//! HTTP API for the storefront catalog and order checks.
//!
//! Routes pass through the request schema gate, call the domain services,
//! and turn every failure into a JSON error through the [`ErrorMapper`].
//! Logging uses `tracing`; counters are exported in Prometheus format.

pub mod config;
pub mod error;
pub mod routes;
pub mod schema;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{MethodRouter, any, get, post};
use catalog_store::CatalogStore;
use domain::{CatalogService, OrderValidator};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;
use error::{ErrorMapper, ErrorReporter, TracingReporter};
pub use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CatalogStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    config: &Config,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route(
            "/product",
            get(routes::products::list::<S>).post(routes::products::create::<S>),
        )
        .route(
            "/product/{id}",
            get(routes::products::get::<S>)
                .patch(routes::products::update::<S>)
                .delete(routes::products::delete::<S>),
        )
        .route("/order", post(routes::orders::create::<S>))
        .with_state(state)
        .merge(metrics_router)
        .nest_service(&config.upload_route(), static_files(config.upload_dir()))
        .fallback_service(static_files(&config.public_dir))
        .layer(cors_layer(&config.origin_allow))
        .layer(TraceLayer::new_for_http())
}

/// Serves files from `dir`. Anything it cannot serve gets the JSON 404.
fn static_files(dir: impl AsRef<Path>) -> ServeDir<MethodRouter> {
    ServeDir::new(dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(any(routes::ops::not_found))
}

/// CORS for a single browser origin, with credentials.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(err) => {
            tracing::warn!(%origin, error = %err, "ignoring invalid ORIGIN_ALLOW value");
            layer
        }
    }
}

/// Creates application state that reports failures through `tracing`.
pub fn create_default_state<S: CatalogStore + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    create_state_with_reporter(store, Arc::new(TracingReporter))
}

/// Creates application state with a custom error reporter.
pub fn create_state_with_reporter<S: CatalogStore + Clone + 'static>(
    store: S,
    reporter: Arc<dyn ErrorReporter>,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: CatalogService::new(store.clone()),
        orders: OrderValidator::new(store),
        errors: ErrorMapper::new(reporter),
    })
}
