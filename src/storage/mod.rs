//! Key-value storage abstraction for persisted view settings.
//!
//! On WASM targets this is backed by the browser's `localStorage`. On native
//! targets, in tests, and when `localStorage` is disabled, an in-memory store
//! is used instead.

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// No storage backend is available (e.g. storage disabled by the browser).
    Unavailable(String),
    /// Reading a key failed.
    ReadFailed(String),
    /// Writing a key failed (quota exceeded, private mode, ...).
    WriteFailed(String),
    /// A stored value could not be parsed or encoded.
    SerializationError(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::ReadFailed(msg) => write!(f, "Read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
            StorageError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// A synchronous string key-value store.
///
/// `localStorage` is synchronous, so unlike a database-backed cache this trait
/// has no async methods.
pub trait KeyValueStore {
    /// Retrieves the raw string stored under `key`.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Succeeds even if the key didn't exist.
    #[allow(dead_code)] // Part of the store contract; exercised by tests
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

mod memory {
    use super::{KeyValueStore, StorageError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// A simple in-memory store.
    ///
    /// Data is not persisted across application restarts. Clones share the
    /// same underlying map.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        data: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.data.borrow().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.data
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("missing").unwrap(), None);

        store.set_item("mercatorTheme", "dark").unwrap();
        assert_eq!(
            store.get_item("mercatorTheme").unwrap().as_deref(),
            Some("dark")
        );

        store.set_item("mercatorTheme", "sepia").unwrap();
        assert_eq!(
            store.get_item("mercatorTheme").unwrap().as_deref(),
            Some("sepia")
        );

        store.remove_item("mercatorTheme").unwrap();
        assert_eq!(store.get_item("mercatorTheme").unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::SerializationError("bad json".to_string());
        assert_eq!(err.to_string(), "Serialization error: bad json");
    }
}
