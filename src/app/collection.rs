//! Id-keyed local cache of one resource collection.
//!
//! A list screen owns one [`Collection`]. It keeps the server's original
//! ordering and an id index, and refuses updates that carry an older revision
//! than the copy it already holds, so two racing edits settle on the newest
//! server state instead of whichever response arrived last.

use crate::domain::error::{FolioError, Result};
use crate::domain::Record;
use std::collections::HashMap;

/// The outcome of a successful server-side mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Created(T),
    Updated(T),
    Deleted(String),
    /// The server accepted a change but returned no record and none is
    /// cached, so there is nothing to splice.
    Confirmed(String),
}

impl<T: Record> Mutation<T> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created(item) | Self::Updated(item) => item.id(),
            Self::Deleted(id) | Self::Confirmed(id) => id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "create",
            Self::Updated(_) => "update",
            Self::Deleted(_) => "delete",
            Self::Confirmed(_) => "confirm",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Builds a collection from a fetched list.
    ///
    /// If the server sends the same id twice, the later entry wins.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let mut collection = Self::default();
        collection.replace(items);
        collection
    }

    /// Replaces the whole contents, as after a fetch.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items.clear();
        self.index.clear();
        for item in items {
            if let Some(&position) = self.index.get(item.id()) {
                self.items[position] = item;
            } else {
                self.index.insert(item.id().to_string(), self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Splices a mutation outcome into the cache.
    ///
    /// # Errors
    ///
    /// - [`FolioError::Stale`] if an update or create carries an older
    ///   revision than the cached copy; the cached copy is kept.
    /// - [`FolioError::NotFound`] if an update or delete targets an id that
    ///   is not loaded.
    pub fn apply(&mut self, mutation: Mutation<T>) -> Result<()> {
        match mutation {
            Mutation::Created(item) => {
                if self.contains(item.id()) {
                    return self.replace_in_place(item);
                }
                self.index.insert(item.id().to_string(), self.items.len());
                self.items.push(item);
                Ok(())
            }
            Mutation::Updated(item) => {
                if !self.contains(item.id()) {
                    return Err(FolioError::NotFound(item.id().to_string()));
                }
                self.replace_in_place(item)
            }
            Mutation::Deleted(id) => self.remove(&id).map(drop),
            Mutation::Confirmed(_) => Ok(()),
        }
    }

    fn replace_in_place(&mut self, item: T) -> Result<()> {
        let position = self.index[item.id()];
        let current = &self.items[position];
        if let (Some(held), Some(incoming)) = (current.revision(), item.revision()) {
            if incoming < held {
                tracing::debug!(
                    id = %item.id(),
                    held_revision = held,
                    incoming_revision = incoming,
                    "discarding stale update"
                );
                return Err(FolioError::Stale {
                    id: item.id().to_string(),
                });
            }
        }
        self.items[position] = item;
        Ok(())
    }

    /// Removes and returns an item, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::NotFound`] if the id is not loaded.
    pub fn remove(&mut self, id: &str) -> Result<T> {
        let position = self
            .index
            .remove(id)
            .ok_or_else(|| FolioError::NotFound(id.to_string()))?;
        let removed = self.items.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(removed)
    }
}
