// --- File: crates/pairup_auth/src/routes.rs ---
use crate::handlers::issue_token_handler;
use crate::middleware::AuthState;
use axum::{routing::post, Router};

/// Creates the router for token issuing.
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/jwt", post(issue_token_handler))
        .with_state(state)
}
