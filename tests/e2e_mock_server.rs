//! E2E tests using the mock Jama server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use jamapi::mock_server::{Fixtures, MockServer, MockState};
use jamapi::{Get, Item, ItemQuery, JamaClient, JamaError};

async fn signed_in(server: &MockServer) -> JamaClient {
    let mut client = JamaClient::new(server.api_url()).unwrap();
    client
        .authenticate(Fixtures::CLIENT_ID, Fixtures::CLIENT_SECRET)
        .await
        .expect("Failed to authenticate");
    client
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());
    assert!(server1.api_url().ends_with("/rest/v1"));

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Authentication Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_authenticate_then_fetch_by_both_keys() {
    let server = MockServer::start().await;
    let client = signed_in(&server).await;

    // Step 1: project-scoped lookup
    let by_project = client
        .get_item(ItemQuery::in_project(42, "PRJ-1"))
        .await
        .expect("Failed to get item by project key");

    // Step 2: same item by its global key, through the trait
    let by_global = Item::get(&client, ItemQuery::global(by_project.global_id()))
        .await
        .expect("Failed to get item by global key");

    assert_eq!(by_project, by_global);
    assert_eq!(by_global.field("name"), Some(&serde_json::json!("Widget")));

    server.shutdown().await;
}

#[tokio::test]
async fn test_project_scope_disambiguates_document_keys() {
    let server = MockServer::start().await;
    let client = signed_in(&server).await;

    // PRJ-1 exists in projects 42 and 7
    let item = client
        .get_item(ItemQuery::in_project(7, "PRJ-1"))
        .await
        .expect("Failed to get item");

    assert_eq!(item.global_id(), "GID-3");
    assert_eq!(
        item.render_summary(),
        "Item Project ID: PRJ-1\nItem Global ID: GID-3"
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let server = MockServer::start().await;
    let mut client = JamaClient::new(server.api_url()).unwrap();

    let err = client
        .authenticate(Fixtures::CLIENT_ID, "not-the-secret")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        JamaError::Authentication {
            status_code: Some(401),
            ..
        }
    ));
    assert!(!client.is_authenticated());

    server.shutdown().await;
}

#[tokio::test]
async fn test_reauthentication_replaces_token() {
    let server = MockServer::start().await;
    let mut client = signed_in(&server).await;

    client
        .authenticate(Fixtures::CLIENT_ID, Fixtures::CLIENT_SECRET)
        .await
        .expect("Failed to re-authenticate");

    assert_eq!(server.state().read().await.issued_tokens.len(), 2);
    client
        .get_item(ItemQuery::in_project(42, "PRJ-2"))
        .await
        .expect("New token should be accepted");

    server.shutdown().await;
}

// =============================================================================
// Failure Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_unauthenticated_fetch_never_reaches_server() {
    let server = MockServer::start().await;
    let client = JamaClient::new(server.api_url()).unwrap();

    let result = client.get_item(ItemQuery::global("GID-1")).await;

    assert!(matches!(result, Err(JamaError::NotAuthenticated)));
    assert_eq!(server.request_count().await, 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_item_is_fetch_error() {
    let server = MockServer::start().await;
    let client = signed_in(&server).await;

    let result = client.get_item(ItemQuery::in_project(42, "PRJ-999")).await;

    let err = result.unwrap_err();
    assert!(matches!(err, JamaError::Fetch { .. }));
    assert!(
        err.to_string().contains("PRJ-999"),
        "Error should name the missing key: {err}"
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_item_added_during_test_is_served() {
    let server = MockServer::start_empty().await;
    {
        let state = server.state();
        let mut state = state.write().await;
        *state = MockState::new()
            .with_client("late-id", "late-secret")
            .with_item(Fixtures::minimal_item(77, "LATE-1", "GID-77", 9));
    }

    let mut client = JamaClient::new(server.api_url()).unwrap();
    client.authenticate("late-id", "late-secret").await.unwrap();

    let item = client.get_item(ItemQuery::global("GID-77")).await.unwrap();
    assert_eq!(item.id(), 77);
    assert!(item.fields().is_empty());

    server.shutdown().await;
}
