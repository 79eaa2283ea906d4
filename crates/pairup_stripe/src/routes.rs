// --- File: crates/pairup_stripe/src/routes.rs ---

use crate::handlers::{create_payment_intent_handler, StripeState};
use crate::service::StripePaymentService;
use axum::{routing::post, Router};
use pairup_config::StripeConfig;
use std::sync::Arc;

/// Creates a router containing the payment intent route.
pub fn routes(state: StripeState) -> Router {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent_handler))
        .with_state(state)
}

/// Router backed by the real Stripe API.
pub fn stripe_routes(config: StripeConfig) -> Router {
    let currency = config.currency.clone();
    routes(StripeState {
        payments: Arc::new(StripePaymentService::new(config)),
        currency,
    })
}
