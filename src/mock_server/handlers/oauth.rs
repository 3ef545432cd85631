//! OAuth token endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::prelude::*;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Query parameters for the token request.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub grant_type: Option<String>,
}

/// POST /rest/oauth/token
pub async fn issue_token(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.request_count += 1;

    if query.grant_type.as_deref() != Some("client_credentials") {
        return oauth_error(StatusCode::BAD_REQUEST, "unsupported_grant_type");
    }

    let authorized = basic_credentials(&headers)
        .is_some_and(|(id, secret)| state.check_credentials(&id, &secret));
    if !authorized {
        return oauth_error(StatusCode::UNAUTHORIZED, "invalid_client");
    }

    let token = state.issue_token();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3599,
            "scope": "read",
            "application_data": {"JAMA_CORE": "enabled"},
            "tenant": "default",
            "jti": format!("jti-{token}"),
        })),
    )
        .into_response()
}

fn oauth_error(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "error_description": format!("{error} ({})", status.as_u16()),
        })),
    )
        .into_response()
}

/// Decode `Authorization: Basic <base64(id:secret)>`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64_STANDARD.decode(encoded).ok()?).ok()?;
    let (id, secret) = decoded.split_once(':')?;
    Some((id.to_string(), secret.to_string()))
}
