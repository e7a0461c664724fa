//! Browser LocalStorage backend

use super::{KeyValueStorage, StorageError};

/// `window.localStorage`
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// None when there is no window or the browser denies storage access
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { inner })
    }
}

fn backend_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", err))
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(backend_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Throws on quota exhaustion
        self.inner.set_item(key, value).map_err(backend_error)
    }
}
