//! JSON file-backed key/value store.
//!
//! Mirrors browser local storage on disk: one JSON object whose values are
//! strings. The whole map is kept in memory and written back with a
//! write-to-temp + rename so a crash never leaves a half-written file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "items": {
//!     "persist:folio": "{\"auth\":\"{\\\"accessToken\\\":\\\"...\\\"}\"}",
//!     "folio:cart": "{\"lines\":[]}"
//!   }
//! }
//! ```

use crate::domain::error::{FolioError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    version: u32,

    #[serde(default)]
    items: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            items: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// Writers in other processes are not coordinated; the last rename wins.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Opens the store, creating parent directories as needed.
    ///
    /// An unreadable or corrupt file is treated as empty so a damaged
    /// session never locks the user out; it is overwritten on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening client storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "discarding unreadable client storage");
                StoreData::default()
            })
        } else {
            StoreData::default()
        };

        tracing::debug!(items = data.items.len(), "client storage opened");

        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| FolioError::Storage(format!("failed to parse JSON: {e}")))
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| FolioError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "client storage saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.data.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let _span = tracing::debug_span!("storage_set_item", key = %key).entered();

        if self.data.items.get(key) == Some(&value) {
            return Ok(());
        }
        let previous = self.data.items.insert(key.to_string(), value);
        if let Err(e) = self.save_to_file() {
            // Memory must keep matching the file.
            match previous {
                Some(old) => self.data.items.insert(key.to_string(), old),
                None => self.data.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("storage_remove_item", key = %key).entered();

        let Some(removed) = self.data.items.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.save_to_file() {
            self.data.items.insert(key.to_string(), removed);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set_item("k", "v".to_string()).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get_item("k").as_deref(), Some("v"));
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(path).unwrap();
        assert!(store.get_item("persist:folio").is_none());
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("s.json")).unwrap();
        assert!(store.remove_item("missing").is_ok());
    }

    #[test]
    fn failed_write_keeps_memory_in_step_with_disk() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut store = JsonFileStore::open(nested.join("s.json")).unwrap();
        store.set_item("k", "v".to_string()).unwrap();
        std::fs::remove_dir_all(&nested).unwrap();

        assert!(store.set_item("k", "w".to_string()).is_err());
        assert_eq!(store.get_item("k").as_deref(), Some("v"));

        assert!(store.set_item("fresh", "x".to_string()).is_err());
        assert!(store.get_item("fresh").is_none());

        assert!(store.remove_item("k").is_err());
        assert_eq!(store.get_item("k").as_deref(), Some("v"));
    }
}
