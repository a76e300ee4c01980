//! Persistence adapter abstraction
//!
//! Stores only need "get bytes for a key" and "put bytes for a key". The
//! adapter decides where those bytes live; [`MemoryAdapter`] keeps them in a
//! map for tests and embedding, [`super::file_io::JsonFileAdapter`] writes
//! one JSON file per key.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SpendbookError, SpendbookResult};

/// Key under which the settings record is persisted
pub const SETTINGS_KEY: &str = "settings-storage";

/// Key under which the category collection is persisted
pub const CATEGORIES_KEY: &str = "category-storage";

/// Key under which the entry collection is persisted
pub const ENTRIES_KEY: &str = "entry-storage";

/// Durable key-value storage the stores rehydrate from and write to
pub trait PersistenceAdapter: Send + Sync {
    /// Load the JSON stored under `key`, `None` if nothing was stored yet
    fn load(&self, key: &str) -> SpendbookResult<Option<String>>;

    /// Store `json` under `key`, replacing what was there
    fn save(&self, key: &str, json: &str) -> SpendbookResult<()>;
}

/// Load and parse the value under `key`, or the default if nothing is stored
pub fn load_json<T>(adapter: &dyn PersistenceAdapter, key: &str) -> SpendbookResult<T>
where
    T: DeserializeOwned + Default,
{
    match adapter.load(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .map_err(|e| SpendbookError::Storage(format!("Failed to parse {}: {}", key, e))),
        _ => Ok(T::default()),
    }
}

/// Serialize `value` and store it under `key`
pub fn save_json<T>(adapter: &dyn PersistenceAdapter, key: &str, value: &T) -> SpendbookResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|e| SpendbookError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
    adapter.save(key, &json)
}

/// In-memory adapter
#[derive(Default)]
pub struct MemoryAdapter {
    values: Mutex<HashMap<String, String>>,
    simulate_write_error: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail until switched off again
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Seed a raw value, bypassing write error simulation
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> SpendbookResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire lock: {}", e)))?;
        values.insert(key.to_string(), json.into());
        Ok(())
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn load(&self, key: &str) -> SpendbookResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> SpendbookResult<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(SpendbookError::Storage("Simulated write error".to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire lock: {}", e)))?;
        values.insert(key.to_string(), json.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
