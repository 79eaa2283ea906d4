// --- File: crates/pairup_auth/src/middleware.rs ---
use crate::token::verify;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use pairup_common::MessageBody;
use pairup_config::AuthConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body of every gate rejection.
pub const FORBIDDEN_ACCESS: &str = "forbidden access";

/// The state the gate needs: the signing secret and token lifetime.
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Rejection shared by the gate and the admin check.
pub fn forbidden_access(status: StatusCode) -> Response {
    (status, Json(MessageBody::new(FORBIDDEN_ACCESS))).into_response()
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Axum middleware guarding routes with `Authorization: Bearer <token>`.
///
/// A valid token puts the decoded [`crate::Identity`] into the request
/// extensions. Anything else ends the request with 401.
pub async fn require_bearer(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        debug!("Rejected {}: no bearer token", req.uri().path());
        return forbidden_access(StatusCode::UNAUTHORIZED);
    };

    match verify(token, &state.config.access_token_secret) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => {
            warn!("Rejected {}: {}", req.uri().path(), e);
            forbidden_access(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{issue, Identity};
    use axum::{body::Body, http, middleware, routing::get, Extension, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state() -> AuthState {
        AuthState::new(AuthConfig {
            access_token_secret: "gate-secret".to_string(),
            token_ttl_secs: 3600,
            admin_emails: vec![],
        })
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/me",
                get(|Extension(identity): Extension<Identity>| async move {
                    identity.email().unwrap_or_default().to_string()
                }),
            )
            .layer(middleware::from_fn_with_state(state(), require_bearer))
    }

    async fn call(auth: Option<String>) -> (StatusCode, Vec<u8>) {
        let mut builder = http::Request::builder().uri("/me");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn token(secret: &str, ttl: i64) -> String {
        let payload = json!({"email": "a@x.com"}).as_object().cloned().unwrap();
        issue(payload, secret, ttl).unwrap()
    }

    #[tokio::test]
    async fn valid_token_passes_identity_through() {
        let (status, body) = call(Some(format!("Bearer {}", token("gate-secret", 60)))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"a@x.com");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (status, body) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"message": "forbidden access"}));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let (status, _) = call(Some(format!("Basic {}", token("gate-secret", 60)))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_or_foreign_tokens_are_unauthorized() {
        let (status, _) = call(Some(format!("Bearer {}", token("gate-secret", -5)))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(Some(format!("Bearer {}", token("other", 60)))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
