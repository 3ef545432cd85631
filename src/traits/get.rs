//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::JamaClient;
use crate::error::Result;

/// Fetch a single entity.
///
/// Implement this trait for entity types that can be fetched individually.
/// The `Id` type carries whatever addressing the endpoint accepts.
///
/// # Example
///
/// ```ignore
/// use jamapi::{JamaClient, Item, ItemQuery, Get};
///
/// let mut client = JamaClient::new("https://example.jamacloud.com/rest/v1")?;
/// client.authenticate("client-id", "client-secret").await?;
/// let item = Item::get(&client, ItemQuery::global("GID-1")).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The addressing type for this entity.
    type Id;

    /// Fetch the entity.
    ///
    /// # Arguments
    ///
    /// * `client` - The Jama API client
    /// * `id` - How to find the entity
    ///
    /// # Errors
    ///
    /// Returns an error if the client is not authenticated, the id is
    /// incomplete, or the request fails.
    async fn get(client: &JamaClient, id: Self::Id) -> Result<Self>;
}
