//! services/api/src/web/response.rs
//!
//! Error body shared by every JSON endpoint except chat.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

/// `{ "error": "..." }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// The rejection half of every handler's `Result`.
pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Unreadable bodies get the same `{error}` shape as provider rejections.
pub fn malformed_body(rejection: JsonRejection) -> ErrorResponse {
    debug!("Rejected request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}
