//! Settings store
//!
//! Holds the single [`Settings`] record. The stores read the retention period
//! from here when they purge, so it must be loaded before them.

use std::sync::{Arc, RwLock};

use super::adapter::{load_json, save_json, PersistenceAdapter, SETTINGS_KEY};
use crate::config::Settings;
use crate::error::{SpendbookError, SpendbookResult};

pub struct SettingsStore {
    adapter: Arc<dyn PersistenceAdapter>,
    settings: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self {
            adapter,
            settings: RwLock::new(Arc::new(Settings::default())),
        }
    }

    /// Rehydrate from the adapter; missing fields take their defaults
    pub fn load(&self) -> SpendbookResult<()> {
        let loaded: Settings = load_json(self.adapter.as_ref(), SETTINGS_KEY)?;
        let loaded = if loaded.validate().is_ok() {
            loaded
        } else {
            tracing::warn!(?loaded, "Stored settings are invalid, using defaults");
            Settings::default()
        };
        self.swap(loaded)?;
        Ok(())
    }

    /// Persist the current settings, reporting failure
    pub fn save(&self) -> SpendbookResult<()> {
        let settings = self.get()?;
        save_json(self.adapter.as_ref(), SETTINGS_KEY, settings.as_ref())
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            tracing::warn!(error = %err, "Failed to persist settings");
        }
    }

    fn swap(&self, next: Settings) -> SpendbookResult<Arc<Settings>> {
        let mut settings = self
            .settings
            .write()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(std::mem::replace(&mut *settings, Arc::new(next)))
    }

    /// Current settings snapshot
    pub fn get(&self) -> SpendbookResult<Arc<Settings>> {
        let settings = self
            .settings
            .read()
            .map_err(|e| SpendbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(Arc::clone(&settings))
    }

    pub fn trash_retention_days(&self) -> SpendbookResult<u32> {
        Ok(self.get()?.trash_retention_days)
    }

    pub fn currency_symbol(&self) -> SpendbookResult<String> {
        Ok(self.get()?.currency_symbol.clone())
    }

    /// Change the retention period; takes effect at the next purge
    pub fn set_trash_retention_days(&self, days: u32) -> SpendbookResult<()> {
        Settings::validate_retention_days(days)?;
        let mut next = (*self.get()?).clone();
        next.trash_retention_days = days;
        self.swap(next)?;
        self.persist();
        tracing::debug!(days, "set trash retention");
        Ok(())
    }

    pub fn set_currency_symbol(&self, symbol: &str) -> SpendbookResult<()> {
        Settings::validate_currency_symbol(symbol)?;
        let mut next = (*self.get()?).clone();
        next.currency_symbol = symbol.trim().to_string();
        self.swap(next)?;
        self.persist();
        tracing::debug!(symbol, "set currency symbol");
        Ok(())
    }

    /// Replace the whole record (restore path); persistence failures are reported
    pub fn replace(&self, settings: Settings) -> SpendbookResult<()> {
        settings.validate()?;
        self.swap(settings)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::adapter::MemoryAdapter;

    fn create_test_store() -> (Arc<MemoryAdapter>, SettingsStore) {
        let adapter = Arc::new(MemoryAdapter::new());
        let store = SettingsStore::new(adapter.clone());
        (adapter, store)
    }

    #[test]
    fn test_defaults_without_stored_value() {
        let (_adapter, store) = create_test_store();
        store.load().unwrap();
        assert_eq!(store.trash_retention_days().unwrap(), 30);
        assert_eq!(store.currency_symbol().unwrap(), "₹");
    }

    #[test]
    fn test_set_and_reload() {
        let (adapter, store) = create_test_store();
        store.set_trash_retention_days(7).unwrap();
        store.set_currency_symbol(" $ ").unwrap();

        let reloaded = SettingsStore::new(adapter);
        reloaded.load().unwrap();
        assert_eq!(reloaded.trash_retention_days().unwrap(), 7);
        assert_eq!(reloaded.currency_symbol().unwrap(), "$");
    }

    #[test]
    fn test_rejects_invalid_values() {
        let (_adapter, store) = create_test_store();
        assert!(store.set_trash_retention_days(0).unwrap_err().is_validation());
        assert!(store.set_currency_symbol("").is_err());
        assert_eq!(store.trash_retention_days().unwrap(), 30);
    }

    #[test]
    fn test_partial_stored_value() {
        let (adapter, store) = create_test_store();
        adapter
            .insert_raw(SETTINGS_KEY, r#"{"trashRetentionDays": 14}"#)
            .unwrap();
        store.load().unwrap();
        assert_eq!(store.trash_retention_days().unwrap(), 14);
        assert_eq!(store.currency_symbol().unwrap(), "₹");
    }

    #[test]
    fn test_invalid_stored_value_falls_back() {
        let (adapter, store) = create_test_store();
        adapter
            .insert_raw(SETTINGS_KEY, r#"{"trashRetentionDays": 0}"#)
            .unwrap();
        store.load().unwrap();
        assert_eq!(store.trash_retention_days().unwrap(), 30);
    }

    #[test]
    fn test_replace_reports_persist_failure() {
        let (adapter, store) = create_test_store();
        adapter.set_simulate_write_error(true);

        // Setters swallow the failure, replace reports it
        store.set_trash_retention_days(10).unwrap();
        assert_eq!(store.trash_retention_days().unwrap(), 10);
        assert!(store.replace(Settings::default()).is_err());
    }

    #[test]
    fn test_snapshot_is_stable() {
        let (_adapter, store) = create_test_store();
        let before = store.get().unwrap();
        store.set_trash_retention_days(3).unwrap();
        assert_eq!(before.trash_retention_days, 30);
    }
}
