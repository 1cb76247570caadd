//! Key-value persistence seam.
//!
//! Theme and progression state persist through [`KeyValueStore`]. The browser
//! crate backs it with `localStorage`; [`MemoryStore`] serves native builds and
//! tests.

use crate::error::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// String key-value storage with JSON helpers.
pub trait KeyValueStore {
    /// Get a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Get a value and deserialize it as JSON.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get(key) {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Serialize a value as JSON and store it.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.set(key, &json)
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::AccessDenied)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::AccessDenied)?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        volume: u8,
        muted: bool,
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
        store.remove("missing").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("shared", "1").unwrap();
        assert_eq!(b.get("shared").as_deref(), Some("1"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let store = MemoryStore::new();
        let prefs = Prefs { volume: 7, muted: false };
        store.set_json("prefs", &prefs).unwrap();
        assert_eq!(store.get_json::<Prefs>("prefs").unwrap(), Some(prefs));
        assert_eq!(store.get_json::<Prefs>("absent").unwrap(), None);
    }

    #[test]
    fn test_get_json_corrupt_value() {
        let store = MemoryStore::new();
        store.set("prefs", "{not json").unwrap();
        assert!(matches!(
            store.get_json::<Prefs>("prefs"),
            Err(StorageError::Serialization(_))
        ));
    }
}
