//! Storage error type shared by all store traits.

use crate::models::InvalidScore;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// "No data" is never reported through this type: lookups that find
/// nothing return `Ok(None)` or an empty `Vec`. An `Err` always means the
/// operation itself failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row not found: table={table}, id={id}")]
    RowNotFound { table: &'static str, id: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid criteria score: {0}")]
    InvalidScore(#[from] InvalidScore),

    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Build a `RowNotFound` for an id of any display type.
    pub fn row_not_found(table: &'static str, id: impl std::fmt::Display) -> Self {
        Self::RowNotFound {
            table,
            id: id.to_string(),
        }
    }
}
