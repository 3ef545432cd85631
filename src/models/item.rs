//! Item model and trait implementations.

use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::JamaClient;
use crate::error::{JamaError, Result};
use crate::traits::Get;

/// A Jama item.
///
/// Items are the documents tracked by Jama (requirements, test cases, and
/// so on). Every item carries a handful of fixed identifiers plus a
/// `fields` map whose keys depend on the item type configured on the
/// server.
///
/// Items are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: i64,

    #[serde(rename = "documentKey")]
    item_project_id: String,

    #[serde(rename = "globalId")]
    global_id: String,

    #[serde(rename = "project")]
    project_id: i64,

    fields: Map<String, Value>,
}

impl Item {
    /// Create an item from its parts.
    pub fn new(
        id: i64,
        item_project_id: impl Into<String>,
        global_id: impl Into<String>,
        project_id: i64,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            item_project_id: item_project_id.into(),
            global_id: global_id.into(),
            project_id,
            fields,
        }
    }

    /// Build an item from one record of an `abstractitems` response.
    ///
    /// # Errors
    ///
    /// Returns [`JamaError::Fetch`] if a required key is missing or has the
    /// wrong type.
    pub fn from_record(record: Value) -> Result<Self> {
        serde_json::from_value(record)
            .map_err(|e| JamaError::fetch(format!("malformed item record: {e}")))
    }

    /// Service-assigned numeric identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Project-scoped document key (e.g. "PRJ-REQ-12").
    pub fn item_project_id(&self) -> &str {
        &self.item_project_id
    }

    /// Globally unique document key.
    pub fn global_id(&self) -> &str {
        &self.global_id
    }

    /// Owning project.
    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    /// All item fields as returned by the server.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A single field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Multi-line summary: document keys, then name and description when
    /// the item has them.
    pub fn render_summary(&self) -> String {
        let mut lines = vec![
            format!("Item Project ID: {}", self.item_project_id),
            format!("Item Global ID: {}", self.global_id),
        ];

        if let Some(name) = self.field("name") {
            lines.push(format!("Name: {}", display_value(name)));
        }

        if let Some(description) = self.field("description") {
            lines.push(format!("Description: {}", display_value(description)));
        }

        lines.join("\n")
    }

    /// Pretty-printed JSON dump of every field.
    pub fn render_fields(&self) -> String {
        // A map of JSON values always serializes.
        serde_json::to_string_pretty(&self.fields).unwrap_or_default()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_summary())
    }
}

/// Render a field value for humans: strings bare, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Arguments for looking up an item.
///
/// Either `global_id` alone, or `project_id` together with
/// `item_project_id`, must be supplied. See [`ItemQuery::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Global document key.
    pub global_id: Option<String>,

    /// Owning project, for project-scoped lookups.
    pub project_id: Option<i64>,

    /// Project-scoped document key.
    pub item_project_id: Option<String>,
}

impl ItemQuery {
    /// Look up by global document key.
    pub fn global(global_id: impl Into<String>) -> Self {
        Self {
            global_id: Some(global_id.into()),
            ..Default::default()
        }
    }

    /// Look up by project and project-scoped document key.
    pub fn in_project(project_id: i64, item_project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id),
            item_project_id: Some(item_project_id.into()),
            ..Default::default()
        }
    }

    /// Pick the addressing mode.
    ///
    /// A global id wins when present. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`JamaError::InvalidArguments`] if neither a global id nor a
    /// full project-scoped key was supplied.
    pub fn resolve(&self) -> Result<ItemLocator> {
        if let Some(global_id) = non_empty(&self.global_id) {
            return Ok(ItemLocator::Global(global_id.to_string()));
        }

        match (self.project_id, non_empty(&self.item_project_id)) {
            (Some(project_id), Some(item_project_id)) => Ok(ItemLocator::Project {
                project_id,
                item_project_id: item_project_id.to_string(),
            }),
            _ => Err(JamaError::InvalidArguments(
                "item insufficiently defined: supply a global id, or a project id and item project id"
                    .to_string(),
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A resolved item address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLocator {
    /// Global document key.
    Global(String),
    /// Project-scoped document key.
    Project {
        project_id: i64,
        item_project_id: String,
    },
}

impl ItemLocator {
    /// Whether the lookup request carries the bearer token.
    ///
    /// Global-id lookups are sent without an `Authorization` header.
    // TODO: confirm with the Jama admins whether global-id lookups should
    // send the bearer token like project-scoped ones.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Project { .. })
    }

    /// The document key this locator searches for.
    pub fn document_key(&self) -> &str {
        match self {
            Self::Global(global_id) => global_id,
            Self::Project {
                item_project_id, ..
            } => item_project_id,
        }
    }

    /// Query parameters for the `abstractitems` endpoint.
    pub(crate) fn query(&self) -> AbstractItemsQuery<'_> {
        AbstractItemsQuery {
            document_key: self.document_key(),
            project: match self {
                Self::Global(_) => None,
                Self::Project { project_id, .. } => Some(*project_id),
            },
        }
    }
}

impl fmt::Display for ItemLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global(global_id) => write!(f, "{global_id}"),
            Self::Project {
                project_id,
                item_project_id,
            } => write!(f, "{item_project_id} (project {project_id})"),
        }
    }
}

/// Query string for `GET abstractitems`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AbstractItemsQuery<'a> {
    document_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<i64>,
}

/// API response wrapper for `GET abstractitems`.
#[derive(Debug, Deserialize)]
struct AbstractItemsResponse {
    data: Vec<Value>,
}

impl AbstractItemsResponse {
    /// Take the first record; later matches are dropped.
    fn into_first_item(self, locator: &ItemLocator) -> Result<Item> {
        let total = self.data.len();
        let record = self
            .data
            .into_iter()
            .next()
            .ok_or_else(|| JamaError::fetch(format!("no item matches {locator}")))?;

        if total > 1 {
            tracing::warn!(%locator, matches = total, "multiple items matched, using the first");
        }

        Item::from_record(record)
    }
}

#[async_trait]
impl Get for Item {
    type Id = ItemQuery;

    #[tracing::instrument(skip(client))]
    async fn get(client: &JamaClient, query: ItemQuery) -> Result<Self> {
        client.require_token()?;
        let locator = query.resolve()?;

        let response = client.get_abstract_items(&locator).await?;
        let body: AbstractItemsResponse = response
            .json()
            .await
            .map_err(|e| JamaError::fetch(format!("malformed response body: {e}")))?;

        let item = body.into_first_item(&locator)?;
        tracing::debug!(id = item.id(), global_id = item.global_id(), "fetched item");
        Ok(item)
    }
}
