//! Persisted Stores
//!
//! In-memory state containers written through to a KeyValueStore. Each store
//! serializes an explicit allow-list of its fields.

mod grocery;
mod profile;

pub use grocery::{require_item, GroceryStore, Progress, GROCERY_STORAGE_KEY};
pub use profile::{ProfileStore, PROFILE_STORAGE_KEY};
