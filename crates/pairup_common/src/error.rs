// --- File: crates/pairup_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all PairUp errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError> for PairUpError`
/// so handlers can bubble everything up through one HTTP mapping.
#[derive(Error, Debug)]
pub enum PairUpError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Missing or invalid credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Valid credentials without the required role
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for PairUpError {
    fn status_code(&self) -> u16 {
        match self {
            PairUpError::ParseError(_) => 400,
            PairUpError::ConfigError(_) => 500,
            PairUpError::AuthError(_) => 401,
            PairUpError::ForbiddenError(_) => 403,
            PairUpError::ValidationError(_) => 400,
            PairUpError::DatabaseError(_) => 500,
            PairUpError::ExternalServiceError { .. } => 502,
            PairUpError::ConflictError(_) => 409,
            PairUpError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for PairUpError {
    fn from(err: serde_json::Error) -> Self {
        PairUpError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> PairUpError {
    PairUpError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(PairUpError::AuthError("x".into()).status_code(), 401);
        assert_eq!(PairUpError::ForbiddenError("x".into()).status_code(), 403);
        assert_eq!(external_service_error("Stripe API", "down").status_code(), 502);
        assert_eq!(PairUpError::DatabaseError("x".into()).status_code(), 500);
    }
}
