//! A single named value kept in sync with a key-value store.

use super::kv::{KeyValueStore, StoreError};

/// Holds one string value that is read from the store once at creation and
/// written back on every change.
///
/// The in-memory value is authoritative for the lifetime of the cell. A
/// failed write leaves memory updated and reports the failure to the caller.
#[derive(Debug)]
pub struct PersistentCell<S> {
    store: S,
    key: String,
    value: String,
    read_error: Option<StoreError>,
}

impl<S: KeyValueStore> PersistentCell<S> {
    /// Creates the cell, reading `key` from `store`.
    ///
    /// A missing entry yields `default`. A stored empty string is a value,
    /// not a missing entry, so a cleared search stays cleared; treating
    /// `""` like a missing key would bring the default back on every run.
    /// A failed read also yields `default`; the failure is logged and kept
    /// for [`Self::read_error`].
    pub fn create(store: S, key: impl Into<String>, default: impl Into<String>) -> Self {
        let key = key.into();
        let (value, read_error) = match store.get(&key) {
            Ok(Some(stored)) => (stored, None),
            Ok(None) => (default.into(), None),
            Err(e) => {
                tracing::warn!("Could not read '{}' from store, using default: {}", key, e);
                (default.into(), Some(e))
            }
        };

        Self {
            store,
            key,
            value,
            read_error,
        }
    }

    /// Current value.
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Store key this cell is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The read failure hit at creation, if any.
    pub fn read_error(&self) -> Option<&StoreError> {
        self.read_error.as_ref()
    }

    /// Replaces the value and writes it to the store.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), StoreError> {
        self.value = value.into();
        self.store.set(&self.key, &self.value).map_err(|e| {
            tracing::warn!("Could not persist '{}': {}", self.key, e);
            e
        })
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
