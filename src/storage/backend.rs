//! Key/value storage abstraction.
//!
//! Client state (the session blob and the cart) is persisted the way a browser
//! persists it: string values under namespaced string keys. The
//! [`KeyValueStore`] trait is that surface, so typed stores on top of it do not
//! care whether values land in a file or in memory.

use crate::domain::error::Result;
use std::collections::HashMap;

/// A persisted map of string keys to string values.
///
/// # Implementations
///
/// - [`crate::storage::JsonFileStore`]: JSON file with atomic writes (default)
/// - [`MemoryStore`]: process-local map, used by tests and `--ephemeral` runs
pub trait KeyValueStore: Send {
    /// Returns the value under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set_item(&mut self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with one raw value, handy for exercising parsers.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut items = HashMap::new();
        items.insert(key.into(), value.into());
        Self { items }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
