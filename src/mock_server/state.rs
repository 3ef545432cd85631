//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Jama API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Item;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Items served by `abstractitems`.
    pub items: Vec<Item>,

    /// Registered API clients, client id to secret.
    pub clients: HashMap<String, String>,

    /// Bearer tokens handed out by the token endpoint.
    pub issued_tokens: Vec<String>,

    /// Number of requests received on the API routes.
    pub request_count: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an item to the state.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Register an API client.
    pub fn with_client(mut self, client_id: &str, client_secret: &str) -> Self {
        self.clients
            .insert(client_id.to_string(), client_secret.to_string());
        self
    }

    /// Whether the id/secret pair belongs to a registered client.
    pub fn check_credentials(&self, client_id: &str, client_secret: &str) -> bool {
        self.clients
            .get(client_id)
            .is_some_and(|secret| secret == client_secret)
    }

    /// Mint and remember a new bearer token.
    pub fn issue_token(&mut self) -> String {
        let token = format!("token-{}", self.issued_tokens.len() + 1);
        self.issued_tokens.push(token.clone());
        token
    }

    /// Whether the token was issued by this server.
    pub fn is_valid_token(&self, token: &str) -> bool {
        self.issued_tokens.iter().any(|t| t == token)
    }

    /// Items whose global id matches.
    pub fn find_by_global_id(&self, global_id: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.global_id() == global_id)
            .collect()
    }

    /// Items in a project whose project-scoped key matches.
    pub fn find_in_project(&self, project_id: i64, item_project_id: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.project_id() == project_id && i.item_project_id() == item_project_id)
            .collect()
    }
}
