//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::{json, Map, Value};

use crate::Item;

/// Default scenario data.
pub struct DefaultScenario {
    pub items: Vec<Item>,
    pub clients: Vec<(String, String)>,
}

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Client id registered in the default scenario.
    pub const CLIENT_ID: &'static str = "test-client";

    /// Client secret registered in the default scenario.
    pub const CLIENT_SECRET: &'static str = "test-secret";

    /// Create an item with an empty field map.
    pub fn minimal_item(id: i64, item_project_id: &str, global_id: &str, project_id: i64) -> Item {
        Item::new(id, item_project_id, global_id, project_id, Map::new())
    }

    /// Create an item with a name and description, the way Jama returns
    /// requirements.
    pub fn named_item(
        id: i64,
        item_project_id: &str,
        global_id: &str,
        project_id: i64,
        name: &str,
        description: &str,
    ) -> Item {
        let fields = match json!({
            "documentKey": item_project_id,
            "globalId": global_id,
            "name": name,
            "description": description,
            "status": 291,
            "priority": "High",
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Item::new(id, item_project_id, global_id, project_id, fields)
    }

    /// The default data set: two projects, one registered client.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            items: vec![
                Self::named_item(1, "PRJ-1", "GID-1", 42, "Widget", "A widget"),
                Self::named_item(2, "PRJ-2", "GID-2", 42, "Gadget", "A gadget"),
                Self::minimal_item(3, "PRJ-1", "GID-3", 7),
            ],
            clients: vec![(Self::CLIENT_ID.to_string(), Self::CLIENT_SECRET.to_string())],
        }
    }
}
