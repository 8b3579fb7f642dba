//! Browser LocalStorage backend

use web_sys::Storage;

use super::{ScoreStore, StoreError};

/// Values are stored as decimal strings under their key
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(key)
            .map_err(|_| StoreError::Unavailable(format!("get_item({key}) rejected")))?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable(format!("set_item({key}) rejected")))
    }
}
