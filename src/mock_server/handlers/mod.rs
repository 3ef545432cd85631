//! HTTP request handlers for the mock server.

pub mod items;
pub mod oauth;

pub use items::*;
pub use oauth::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Jama-style error body: `{"meta": {"status": ..., "message": ...}}`.
pub(crate) fn meta_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "meta": {
                "status": status.canonical_reason().unwrap_or("Error"),
                "message": message.into(),
            }
        })),
    )
        .into_response()
}
