//! Insertion-ordered set persisted under one store key
//!
//! The set is loaded once and written through on every mutation, so the
//! in-memory contents always mirror what is stored. Values are encoded as a
//! JSON array in insertion order; removing an element and adding it back
//! therefore reorders it, but toggling an absent element twice leaves the
//! stored text byte-identical.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::StoreError;
use super::kv::KeyValueStore;

/// A set of identifiers durably backed by a [`KeyValueStore`]
pub struct PersistentSet<T> {
    store: Box<dyn KeyValueStore>,
    key: String,
    items: Vec<T>,
}

impl<T> PersistentSet<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Clone,
{
    /// Load the set stored under `key`
    ///
    /// An absent key yields an empty set. A value that is not valid text or
    /// not a JSON array of `T` is logged and also treated as empty; it is
    /// overwritten on the next mutation. Duplicate entries in the stored array are dropped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store itself cannot be read.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let stored = match store.get(&key) {
            Ok(stored) => stored,
            Err(StoreError::CorruptValue(_)) => {
                warn!(key = %key, "ignoring stored set that is not valid text");
                None
            }
            Err(e) => return Err(e),
        };
        let items = match stored {
            Some(raw) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(stored) => {
                    let mut items: Vec<T> = Vec::with_capacity(stored.len());
                    for item in stored {
                        if !items.contains(&item) {
                            items.push(item);
                        }
                    }
                    items
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "ignoring unreadable stored set");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self { store, key, items })
    }

    /// Whether `item` is a member
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Store key backing this set
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `item`, returning `false` if it was already present
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the set is left unchanged.
    pub fn insert(&mut self, item: T) -> Result<bool, StoreError> {
        if self.contains(&item) {
            return Ok(false);
        }
        self.items.push(item);
        if let Err(e) = self.save() {
            self.items.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Remove `item`, returning `false` if it was not present
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the set is left unchanged.
    pub fn remove(&mut self, item: &T) -> Result<bool, StoreError> {
        let Some(position) = self.items.iter().position(|i| i == item) else {
            return Ok(false);
        };
        let removed = self.items.remove(position);
        if let Err(e) = self.save() {
            self.items.insert(position, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Flip membership of `item`, returning whether it is now a member
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the set is left unchanged.
    pub fn toggle(&mut self, item: T) -> Result<bool, StoreError> {
        if self.contains(&item) {
            self.remove(&item).map(|_| false)
        } else {
            self.insert(item)
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.items)?;
        self.store.set(&self.key, &encoded)
    }
}
