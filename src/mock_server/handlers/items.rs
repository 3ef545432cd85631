//! Abstract item endpoint handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::meta_error;
use crate::mock_server::state::MockState;
use crate::Item;

/// Query parameters for item lookups.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractItemsQuery {
    pub document_key: Option<String>,
    pub project: Option<i64>,
}

/// GET /rest/v1/abstractitems
///
/// Project-scoped lookups need an issued bearer token; global-id lookups
/// are answered without one. A search with no hits is a 200 with an empty
/// `data` array, as on the real server.
pub async fn list_abstract_items(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<AbstractItemsQuery>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.request_count += 1;

    let Some(document_key) = query.document_key else {
        return meta_error(StatusCode::BAD_REQUEST, "documentKey is required");
    };

    let matches: Vec<Item> = match query.project {
        Some(project) => {
            let authorized = bearer_token(&headers).is_some_and(|t| state.is_valid_token(t));
            if !authorized {
                return meta_error(StatusCode::UNAUTHORIZED, "Full authentication is required");
            }
            state.find_in_project(project, &document_key)
        }
        None => state.find_by_global_id(&document_key),
    }
    .into_iter()
    .cloned()
    .collect();

    let count = matches.len();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "meta": {
                "status": "OK",
                "pageInfo": {
                    "startIndex": 0,
                    "resultCount": count,
                    "totalResults": count,
                },
            },
            "links": {},
            "data": matches,
        })),
    )
        .into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
