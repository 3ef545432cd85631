//! Trait definitions for Jama operations.
//!
//! Entity types implement the traits they support, keeping endpoint
//! details out of the low-level client.

mod get;

pub use get::Get;
