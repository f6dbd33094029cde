//! `window.localStorage` backend.

use folio_core::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::{JsCast, JsValue};

/// Browser local storage; inert when the page cannot reach it.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Binds to `window.localStorage`.
    ///
    /// Access can throw (sandboxed iframes, disabled cookies); that yields
    /// a store whose every call reports `Unavailable`.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("event=storage_open module=web status=unavailable backend=local_storage");
        }
        Self { storage }
    }

    fn storage(&self) -> StorageResult<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| to_storage_error(key, 0, err))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| to_storage_error(key, value.len(), err))
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| to_storage_error(key, 0, err))
    }
}

fn to_storage_error(key: &str, bytes: usize, err: JsValue) -> StorageError {
    let name = err
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.name()))
        .unwrap_or_default();
    match name.as_str() {
        "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED" => StorageError::QuotaExceeded {
            key: key.to_string(),
            bytes,
        },
        "SecurityError" => StorageError::Unavailable(name),
        _ => StorageError::Backend(format!("{err:?}")),
    }
}
