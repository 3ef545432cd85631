//! Mock Jama API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Jama
//! token and item endpoints. Unlike wiremock which mocks at the HTTP level
//! per-test, this server keeps state across requests (registered clients,
//! issued tokens), enabling realistic authenticate-then-fetch workflows.
//!
//! # Example
//!
//! ```ignore
//! use jamapi::mock_server::{Fixtures, MockServer};
//! use jamapi::{ItemQuery, JamaClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let mut client = JamaClient::new(server.api_url()).unwrap();
//!
//!     client
//!         .authenticate(Fixtures::CLIENT_ID, Fixtures::CLIENT_SECRET)
//!         .await
//!         .unwrap();
//!     let item = client.get_item(ItemQuery::global("GID-1")).await.unwrap();
//!     assert_eq!(item.item_project_id(), "PRJ-1");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
