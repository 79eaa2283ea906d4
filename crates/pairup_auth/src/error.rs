// --- File: crates/pairup_auth/src/error.rs ---
use pairup_common::PairUpError;
use thiserror::Error;

/// Errors raised while issuing or checking bearer tokens.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token payload must be a JSON object")]
    InvalidPayload,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

impl From<AuthError> for PairUpError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => PairUpError::InternalError(msg),
            AuthError::InvalidPayload => PairUpError::ValidationError(err.to_string()),
            other => PairUpError::AuthError(other.to_string()),
        }
    }
}
