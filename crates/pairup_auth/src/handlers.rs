// --- File: crates/pairup_auth/src/handlers.rs ---
use crate::middleware::AuthState;
use crate::token::issue;
use axum::{extract::State, response::Response, Json};
use pairup_common::{map_json_error, PairUpError};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Signs the posted identity payload and returns it as a bearer token.
pub async fn issue_token_handler(
    State(state): State<AuthState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, Response> {
    let email = payload.get("email").and_then(Value::as_str).map(str::to_owned);
    let result = issue(
        payload,
        &state.config.access_token_secret,
        state.config.token_ttl_secs,
    );
    if result.is_ok() {
        info!("Issued token for {:?}", email);
    }
    map_json_error(result.map(|token| TokenResponse { token }), PairUpError::from)
}
