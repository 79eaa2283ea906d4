//! Error types for the document store

use pairup_common::PairUpError;
use thiserror::Error;

/// Errors that can occur when working with the document store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A unique index rejected the write
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// A stored document could not be decoded
    #[error("Document decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// A filter or document used a field name the store cannot address
    #[error("Invalid field name: {0}")]
    InvalidField(String),
}

impl DbError {
    /// Classifies a write failure, turning unique-index violations into [`DbError::Duplicate`].
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() || db_err.message().contains("UNIQUE constraint failed")
            {
                return DbError::Duplicate(db_err.message().to_string());
            }
        }
        DbError::QueryError(err.to_string())
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, DbError::Duplicate(_))
    }
}

impl From<DbError> for PairUpError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(msg) => PairUpError::ConflictError(msg),
            DbError::ConfigError(msg) | DbError::UrlError(msg) => PairUpError::ConfigError(msg),
            DbError::InvalidField(msg) => PairUpError::ValidationError(msg),
            other => PairUpError::DatabaseError(other.to_string()),
        }
    }
}
