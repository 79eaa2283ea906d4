// --- File: crates/pairup_stripe/src/error.rs ---
use pairup_common::{external_service_error, HttpStatusCode, PairUpError};
use thiserror::Error;

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Stripe configuration
    #[error("Stripe configuration missing or incomplete")]
    ConfigError,

    /// The price cannot be charged
    #[error("Invalid price: {0}")]
    InvalidAmount(f64),

    /// Stripe accepted the intent but sent no client secret back
    #[error("Stripe response missing client secret")]
    MissingClientSecret,
}

/// Convert StripeError to PairUpError
impl From<StripeError> for PairUpError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::RequestError(e) => external_service_error("Stripe API", e),
            StripeError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Stripe API",
                format!("Status: {}, Message: {}", status_code, message),
            ),
            StripeError::ParseError(e) => {
                external_service_error("Stripe API", format!("Response parse error: {}", e))
            }
            StripeError::ConfigError => PairUpError::ConfigError(
                "Stripe configuration missing or incomplete".to_string(),
            ),
            StripeError::InvalidAmount(price) => {
                PairUpError::ValidationError(format!("Invalid price: {}", price))
            }
            StripeError::MissingClientSecret => {
                external_service_error("Stripe API", "Response missing client secret")
            }
        }
    }
}

impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        match self {
            StripeError::RequestError(_) => 502,
            StripeError::ApiError { status_code, .. } => *status_code,
            StripeError::ParseError(_) => 502,
            StripeError::ConfigError => 500,
            StripeError::InvalidAmount(_) => 400,
            StripeError::MissingClientSecret => 502,
        }
    }
}
