// --- File: crates/pairup_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::{HttpStatusCode, PairUpError};

// Include the client module
pub mod client;

impl IntoResponse for PairUpError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Plain `{ "message": ... }` body used for soft outcomes such as duplicates
/// and for the authorization gate's rejections.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps a handler result to JSON, converting a domain error through `f` first.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, Response>
where
    T: Serialize,
    F: FnOnce(E) -> PairUpError,
{
    result.map(Json).map_err(|err| f(err).into_response())
}
