//! Persistent client-side state
//!
//! Provides a small string key-value abstraction with a sled backend, a
//! write-through set built on top of it, and the favorites set.

pub mod error;
mod favorites;
mod kv;
mod persistent_set;

pub use error::StoreError;
pub use favorites::{FAVORITES_KEY, FavoritesSet};
pub use kv::{KeyValueStore, MemoryStore, SledStore};
pub use persistent_set::PersistentSet;
