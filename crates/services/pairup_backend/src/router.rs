// --- File: crates/services/pairup_backend/src/router.rs ---
use crate::app_state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use pairup_auth::AuthState;
use pairup_biodata::BiodataState;
use pairup_stripe::StripeState;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.store.client().is_healthy().await {
        "ok"
    } else {
        "unavailable"
    };
    Json(HealthResponse {
        status: "ok",
        database,
    })
}

/// Merges every feature router into the application.
pub fn build_router(state: AppState) -> Router {
    let auth = AuthState::new(state.config.auth.clone());
    let biodata = BiodataState {
        store: state.store.clone(),
        admin_emails: Arc::new(state.config.auth.admin_emails.clone()),
    };

    let mut app = Router::new()
        .route("/", get(|| async { "PairUp server is running" }))
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(pairup_auth::routes(auth.clone()))
        .merge(pairup_biodata::routes(biodata, auth));

    match state.payments.clone() {
        Some(payments) => {
            app = app.merge(pairup_stripe::routes(StripeState {
                payments,
                currency: state.currency(),
            }));
        }
        None => info!("Payments disabled, /create-payment-intent not mounted"),
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
