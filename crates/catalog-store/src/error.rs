use thiserror::Error;

/// Errors that can occur when interacting with the catalog store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An identifier argument is not a well-formed product identifier.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A write would violate a unique index.
    #[error("Duplicate key: {field} {value:?} already exists")]
    DuplicateKey { field: &'static str, value: String },

    /// A written document failed the product field schema.
    #[error("{0}")]
    Validation(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<common::InvalidProductId> for StoreError {
    fn from(err: common::InvalidProductId) -> Self {
        StoreError::InvalidIdentifier(err.0)
    }
}

/// Result type for catalog store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
