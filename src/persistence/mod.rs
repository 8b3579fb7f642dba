//! Best-score persistence
//!
//! A single integer slot per key, read at startup and written on improvement.
//! Backends:
//! - `MemoryStore`: in-process map (tests, embedding without durability)
//! - `JsonFileStore`: JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Storage key for this game's best score
pub const BEST_SCORE_KEY: &str = "drift_shooter_best";

/// Persistence failure; callers treat every variant as non-fatal
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Key-value slot holding integers
pub trait ScoreStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
    /// When set, every write fails (exercises the best-effort path)
    pub fail_writes: bool,
    /// When set, every read fails
    pub fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a value
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Peek at a value without going through the trait
    pub fn value(&self, key: &str) -> Option<u64> {
        self.values.get(key).copied()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Boxed stores forward to their contents
impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), None);
        store.set(BEST_SCORE_KEY, 42).unwrap();
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), Some(42));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_memory_store_failures() {
        let mut store = MemoryStore::with_value(BEST_SCORE_KEY, 5);
        store.fail_reads = true;
        store.fail_writes = true;
        assert!(matches!(store.get(BEST_SCORE_KEY), Err(StoreError::Unavailable(_))));
        assert!(store.set(BEST_SCORE_KEY, 6).is_err());
        assert_eq!(store.value(BEST_SCORE_KEY), Some(5));
    }
}
