//! Jama API model types.

mod item;

pub use item::*;
