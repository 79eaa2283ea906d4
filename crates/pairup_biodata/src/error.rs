// --- File: crates/pairup_biodata/src/error.rs ---
use pairup_common::PairUpError;
use pairup_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiodataError {
    #[error(transparent)]
    Store(#[from] DbError),

    /// The request body lacks a field the collection is keyed by
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid query parameter {name}: {value}")]
    InvalidQuery { name: &'static str, value: String },
}

impl From<BiodataError> for PairUpError {
    fn from(err: BiodataError) -> Self {
        match err {
            BiodataError::Store(e) => e.into(),
            other => PairUpError::ValidationError(other.to_string()),
        }
    }
}
