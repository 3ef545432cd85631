//! Mock Jama API server.
//!
//! Provides an axum-based HTTP server that simulates the Jama API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// Path of the REST endpoint below the server root.
const API_PATH: &str = "/rest/v1";

/// A mock Jama API server for testing.
///
/// The server runs in the background and can be used to test the Jama client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// The REST endpoint URL, `<url>/rest/v1`.
    api_url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `api_url()` to get the REST endpoint for `JamaClient::new`.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        let url = format!("http://{}", addr);
        Self {
            api_url: format!("{url}{API_PATH}"),
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the root URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the REST endpoint URL.
    ///
    /// Use this URL when creating a `JamaClient` for testing; the client
    /// derives the token endpoint from the same host.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of requests received on the API routes so far.
    pub async fn request_count(&self) -> u64 {
        self.state.read().await.request_count
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for item in scenario.items {
            state = state.with_item(item);
        }

        for (client_id, client_secret) in scenario.clients {
            state = state.with_client(&client_id, &client_secret);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/rest/oauth/token", post(handlers::issue_token))
            .route(
                &format!("{API_PATH}/abstractitems"),
                get(handlers::list_abstract_items),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemQuery, JamaClient, JamaError};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_item_with_jama_client() {
        let server = MockServer::start().await;
        let mut client = JamaClient::new(server.api_url()).unwrap();

        client
            .authenticate(Fixtures::CLIENT_ID, Fixtures::CLIENT_SECRET)
            .await
            .expect("Failed to authenticate");

        let item = client
            .get_item(ItemQuery::in_project(42, "PRJ-1"))
            .await
            .expect("Failed to get item");

        assert_eq!(item.global_id(), "GID-1");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let mut client = JamaClient::new(server.api_url()).unwrap();

        let result = client.authenticate("anyone", "anything").await;

        assert!(matches!(result, Err(JamaError::Authentication { .. })));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new()
            .with_client("custom-id", "custom-secret")
            .with_item(Fixtures::named_item(9, "CUS-9", "GID-9", 5, "Custom", "Mine"));

        let server = MockServer::with_state(state).await;
        let mut client = JamaClient::new(server.api_url()).unwrap();
        client.authenticate("custom-id", "custom-secret").await.unwrap();

        let item = client
            .get_item(ItemQuery::global("GID-9"))
            .await
            .expect("Failed to get item");

        assert_eq!(item.field("name"), Some(&serde_json::json!("Custom")));

        server.shutdown().await;
    }
}
