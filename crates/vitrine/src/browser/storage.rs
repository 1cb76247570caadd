//! `localStorage`-backed [`KeyValueStore`].

use vitrine_core::{KeyValueStore, StorageError};

/// Persists to `window.localStorage`. Every call looks the storage up afresh,
/// so a page with storage disabled reports [`StorageError::NotAvailable`]
/// instead of failing at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    /// Create a handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether the browser exposes `localStorage` at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        storage().is_some()
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        storage()
            .ok_or(StorageError::NotAvailable)?
            .set_item(key, value)
            .map_err(|_| StorageError::QuotaExceeded)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        storage()
            .ok_or(StorageError::NotAvailable)?
            .remove_item(key)
            .map_err(|_| StorageError::AccessDenied)
    }
}
