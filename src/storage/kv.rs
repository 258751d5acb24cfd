//! Key-value store boundary.
//!
//! Everything that persists state goes through [`KeyValueStore`]. The view
//! receives a store explicitly instead of reaching for process-wide state,
//! so tests can hand it a [`MemoryStore`] (or a store that fails on demand)
//! while the CLI hands it the SQLite-backed [`Database`](super::Database).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Errors surfaced by a key-value store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or read.
    #[error("Key-value store unavailable: {0}")]
    Unavailable(String),

    /// A value could not be written back.
    #[error("Failed to write '{key}': {reason}")]
    WriteFailed {
        /// Key that was being written.
        key: String,
        /// Underlying failure description.
        reason: String,
    },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// A string-to-string store with last-writer-wins semantics.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability.
pub trait KeyValueStore {
    /// Reads `key`, returning `None` when no entry exists.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `key -> value`, replacing any previous entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-process store backed by a locked `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
