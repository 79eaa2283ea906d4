// --- File: crates/pairup_stripe/src/handlers.rs ---
use crate::error::StripeError;
use crate::logic::{to_minor_units, CreatePaymentIntentRequest, CreatePaymentIntentResponse};
use axum::{
    extract::State,
    response::{Json, Response},
};
use pairup_common::services::PaymentService;
use pairup_common::{map_json_error, PairUpError};
use std::sync::Arc;
use tracing::error;

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub payments: Arc<dyn PaymentService<Error = StripeError>>,
    pub currency: String,
}

/// Axum handler creating a card payment intent and returning its client secret.
#[axum::debug_handler]
pub async fn create_payment_intent_handler(
    State(state): State<StripeState>,
    Json(payload): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, Response> {
    let result = async {
        let amount = to_minor_units(payload.price)?;
        let intent = state
            .payments
            .create_payment_intent(amount, &state.currency)
            .await?;
        let client_secret = intent
            .client_secret
            .filter(|secret| !secret.is_empty())
            .ok_or(StripeError::MissingClientSecret)?;
        Ok::<_, StripeError>(CreatePaymentIntentResponse { client_secret })
    }
    .await;

    if let Err(e) = &result {
        error!("Payment intent creation failed: {}", e);
    }
    map_json_error(result, PairUpError::from)
}
