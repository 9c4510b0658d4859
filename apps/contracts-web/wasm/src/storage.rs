//! `window.localStorage` as a session store

use dashboard_core::{DashboardError, KeyValueStore};
use wasm_bindgen::JsValue;

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, DashboardError> {
        let window = web_sys::window().ok_or_else(|| storage_error("No window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| storage_error(&describe(&e)))?
            .ok_or_else(|| storage_error("No localStorage"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        self.storage
            .get_item(key)
            .map_err(|e| storage_error(&describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DashboardError> {
        // Throws when the quota is exceeded or storage is disabled
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_error(&describe(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), DashboardError> {
        self.storage
            .remove_item(key)
            .map_err(|e| storage_error(&describe(&e)))
    }
}

fn storage_error(detail: &str) -> DashboardError {
    DashboardError::Storage(detail.to_string())
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
