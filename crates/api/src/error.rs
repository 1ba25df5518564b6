//! API error types with HTTP response mapping.
//!
//! Every failing request ends in exactly one [`ApiError`], rendered as
//! `{"message": ...}`. Domain and store failures reach it through
//! [`ErrorMapper`], which classifies them and hands the original error to
//! an [`ErrorReporter`] for server-side logging.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_store::StoreError;
use domain::{DomainError, ErrorKind, ServiceError};

pub const VALIDATION_ERROR: &str = "validation error";
pub const INVALID_ID: &str = "invalid id";
pub const ROUTE_NOT_FOUND: &str = "route not found";
pub const INTERNAL_ERROR: &str = "internal server error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed or inconsistent client input.
    BadRequest(String),
    /// Uniqueness violation.
    Conflict(String),
    /// Resource or route not found.
    NotFound(String),
    /// Anything unanticipated. The details never reach the client.
    Internal,
}

impl ApiError {
    /// Rejection issued by the request schema gate.
    pub fn validation() -> Self {
        ApiError::BadRequest(VALIDATION_ERROR.to_string())
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the client-facing message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::Conflict(msg) | ApiError::NotFound(msg) => msg,
            ApiError::Internal => INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.message() });
        (self.status(), axum::Json(body)).into_response()
    }
}

/// Classifies a domain or store failure.
///
/// The match is exhaustive over both error types, so every failure lands
/// in exactly one arm.
pub fn classify(err: &ServiceError) -> ApiError {
    match err {
        ServiceError::Domain(domain_err) => {
            let message = domain_err.to_string();
            match domain_err.kind() {
                ErrorKind::BadRequest => ApiError::BadRequest(message),
                ErrorKind::Conflict => ApiError::Conflict(message),
                ErrorKind::NotFound => ApiError::NotFound(message),
            }
        }
        ServiceError::Store(StoreError::Validation(msg)) => ApiError::BadRequest(msg.clone()),
        ServiceError::Store(StoreError::InvalidIdentifier(_)) => {
            ApiError::BadRequest(INVALID_ID.to_string())
        }
        ServiceError::Store(StoreError::DuplicateKey { .. }) => {
            ApiError::Conflict(DomainError::DuplicateTitle.to_string())
        }
        ServiceError::Store(StoreError::Database(_) | StoreError::Migration(_)) => {
            ApiError::Internal
        }
    }
}

/// Receives every failure the API turns into an error response.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, status: StatusCode, error: &ServiceError);
}

/// Reports failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, status: StatusCode, error: &ServiceError) {
        if status.is_server_error() {
            tracing::error!(%status, error = %error, details = ?error, "internal server error");
        } else {
            tracing::warn!(%status, error = %error, "request failed");
        }
    }
}

/// Turns service failures into responses, reporting each one.
#[derive(Clone)]
pub struct ErrorMapper {
    reporter: Arc<dyn ErrorReporter>,
}

impl ErrorMapper {
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }

    /// Classifies `err`, reports it, and returns the response error.
    pub fn map(&self, err: ServiceError) -> ApiError {
        let api_err = classify(&err);
        self.reporter.report(api_err.status(), &err);
        api_err
    }
}

impl Default for ErrorMapper {
    fn default() -> Self {
        Self::new(Arc::new(TracingReporter))
    }
}

impl std::fmt::Debug for ErrorMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorMapper").finish_non_exhaustive()
    }
}
