//! Jama API client library.
//!
//! A small Rust client for the Jama REST API: it exchanges OAuth client
//! credentials for a bearer token and fetches single items by either of
//! their document keys.
//!
//! # Quick Start
//!
//! ```no_run
//! use jamapi::{Get, Item, ItemQuery, JamaClient};
//!
//! #[tokio::main]
//! async fn main() -> jamapi::Result<()> {
//!     let mut client = JamaClient::new("https://example.jamacloud.com/rest/v1")?;
//!     client.authenticate("client-id", "client-secret").await?;
//!
//!     // By project and project-scoped key
//!     let item = client.get_item(ItemQuery::in_project(42, "PRJ-REQ-1")).await?;
//!     println!("{item}");
//!
//!     // By global key, through the trait
//!     let item = Item::get(&client, ItemQuery::global("GID-REQ-1")).await?;
//!     println!("{}", item.render_fields());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation returns a [`JamaError`]; nothing is swallowed. The
//! variants tell the caller what to do next: re-authenticate
//! ([`JamaError::Authentication`], [`JamaError::NotAuthenticated`]), fix
//! the arguments ([`JamaError::InvalidArguments`]) or give up / retry
//! ([`JamaError::Fetch`]). The client never retries on its own.
//!
//! # Logging
//!
//! The library emits [`tracing`] events and spans; install a subscriber
//! to see them.

pub mod cli;
mod client;
mod error;
mod models;
mod output;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::JamaClient;
pub use error::{JamaError, Result};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::Get;

// Re-export models
pub use models::{Item, ItemLocator, ItemQuery};
