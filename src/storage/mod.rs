//! Durable key-value storage
//!
//! Features:
//! - Synchronous get/set on named slots
//! - LocalStorage backend on web, in-memory backend for native and tests
//! - Whole-collection person persistence that fails open

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local;
mod repository;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use repository::PersonRepository;

/// Storage failures. Callers above the repository never see these.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("durable storage is not available in this context")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to encode slot {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode slot {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string slots keyed by name
pub trait KeyValueStorage {
    /// Read a slot; `Ok(None)` when it was never written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slots
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// No durable storage: reads are empty, writes fail
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl KeyValueStorage for Unavailable {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Shared handles store through the same backend
impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::rc::Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
