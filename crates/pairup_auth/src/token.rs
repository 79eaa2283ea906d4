// --- File: crates/pairup_auth/src/token.rs ---
//! HS256 bearer tokens.
//!
//! The token carries whatever identity payload the client presented at login
//! (at least an email) plus `iat` and `exp`.

use crate::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Decoded token claims, handed to handlers through request extensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub iat: i64,
    pub exp: i64,
}

impl Identity {
    /// The email the caller signed in with, if the payload carried one.
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}

/// Signs `payload` with `secret`, valid for `ttl_secs` seconds from now.
pub fn issue(mut payload: Map<String, Value>, secret: &str, ttl_secs: i64) -> Result<String, AuthError> {
    // Time claims are always ours.
    payload.remove("iat");
    payload.remove("exp");

    let now = Utc::now().timestamp();
    let claims = Identity {
        payload,
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Checks signature and expiry (no leeway) and returns the decoded identity.
pub fn verify(token: &str, secret: &str) -> Result<Identity, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Identity>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    debug!("Verified token for {:?}", data.claims.email());
    Ok(data.claims)
}
