// --- File: crates/pairup_stripe/src/service.rs ---
use crate::error::StripeError;
use crate::logic::create_payment_intent;
use pairup_common::services::{BoxFuture, PaymentIntentResult, PaymentService};
use pairup_config::StripeConfig;
use std::sync::Arc;

/// Stripe payment service implementation
pub struct StripePaymentService {
    config: Arc<StripeConfig>,
}

impl StripePaymentService {
    /// Create a new Stripe payment service
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl PaymentService for StripePaymentService {
    type Error = StripeError;

    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let currency = currency.to_string();
        Box::pin(async move { create_payment_intent(&self.config, amount, &currency).await })
    }
}
