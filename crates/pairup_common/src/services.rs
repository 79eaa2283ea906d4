// --- File: crates/pairup_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers depend on these traits rather than on concrete clients, so the payment
//! processor can be swapped for a stub in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for payment processor operations.
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a card payment intent for `amount` minor currency units.
    ///
    /// No idempotency key is sent: calling twice creates two intents.
    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error>;
}

/// Data returned by the payment processor for a created intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResult {
    pub id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub client_secret: Option<String>,
}
