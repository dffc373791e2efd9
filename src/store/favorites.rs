//! Favorited catalog records

use super::error::StoreError;
use super::kv::KeyValueStore;
use super::persistent_set::PersistentSet;

/// Store key holding the favorites list
pub const FAVORITES_KEY: &str = "inspire_favorites";

/// Record ids the user has favorited, persisted across sessions
pub struct FavoritesSet {
    ids: PersistentSet<String>,
}

impl FavoritesSet {
    /// Load favorites from `store`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        Ok(Self {
            ids: PersistentSet::load(store, FAVORITES_KEY)?,
        })
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Flip favorite state of `id` and persist, returning the new state
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; favorites are unchanged.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, StoreError> {
        self.ids.toggle(id.to_string())
    }

    /// All favorite ids in the order they were added
    #[must_use]
    pub fn list_all(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
