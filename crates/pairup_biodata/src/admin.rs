// --- File: crates/pairup_biodata/src/admin.rs ---
use crate::handlers::BiodataState;
use crate::logic::is_admin;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use pairup_auth::{forbidden_access, Identity};
use pairup_common::PairUpError;
use tracing::{error, warn};

/// Axum middleware letting only admins through. Runs behind the bearer gate.
///
/// A caller counts as admin when their stored role is `admin` or their email is
/// listed in `auth.admin_emails`.
pub async fn require_admin(
    State(state): State<BiodataState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(email) = req
        .extensions()
        .get::<Identity>()
        .and_then(|identity| identity.email())
        .map(str::to_owned)
    else {
        warn!("Admin route {} called without an email claim", req.uri().path());
        return forbidden_access(StatusCode::FORBIDDEN);
    };

    if state.admin_emails.iter().any(|admin| admin == &email) {
        return next.run(req).await;
    }

    match is_admin(&state.store, &email).await {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            warn!("{} is not an admin, refusing {}", email, req.uri().path());
            forbidden_access(StatusCode::FORBIDDEN)
        }
        Err(e) => {
            error!("Admin check for {} failed: {}", email, e);
            PairUpError::from(e).into_response()
        }
    }
}
