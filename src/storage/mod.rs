//! Storage layer for Spendbook
//!
//! Three stores (settings, categories, entries) share one persistence
//! adapter. On open the settings are rehydrated first so the two record
//! stores purge expired trash with the retention period that is current at
//! that moment.

pub mod adapter;
pub mod categories;
pub mod collection;
pub mod entries;
pub mod file_io;
pub mod images;
pub mod retention;
pub mod settings;

pub use adapter::{MemoryAdapter, PersistenceAdapter, CATEGORIES_KEY, ENTRIES_KEY, SETTINGS_KEY};
pub use categories::CategoryStore;
pub use entries::EntryStore;
pub use file_io::{write_json_atomic, JsonFileAdapter};
pub use images::{FsImageStore, ImageStore, NoopImageStore};
pub use settings::SettingsStore;

use std::sync::Arc;

use crate::config::paths::SpendbookPaths;
use crate::error::SpendbookResult;

/// What rehydration found and purged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RehydrateReport {
    pub retention_days: u32,
    pub purged_categories: usize,
    pub purged_entries: usize,
}

/// Main storage coordinator that owns all stores
pub struct Storage {
    pub settings: SettingsStore,
    pub categories: CategoryStore,
    pub entries: EntryStore,
}

impl Storage {
    /// Build empty stores over `adapter`; nothing is read yet
    pub fn new(adapter: Arc<dyn PersistenceAdapter>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            settings: SettingsStore::new(adapter.clone()),
            categories: CategoryStore::new(adapter.clone(), images),
            entries: EntryStore::new(adapter),
        }
    }

    /// Open the on-disk stores under `paths` and rehydrate them
    pub fn open(paths: &SpendbookPaths) -> SpendbookResult<Self> {
        paths.ensure_directories()?;

        let adapter = Arc::new(JsonFileAdapter::new(paths.data_dir()));
        let storage = Self::new(adapter, Arc::new(FsImageStore));
        storage.rehydrate()?;
        Ok(storage)
    }

    /// In-memory stores, already rehydrated (empty)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryAdapter::new()), Arc::new(NoopImageStore))
    }

    /// Load every store from the adapter and apply the retention policy
    ///
    /// The stores purge independently: an entry filed under a category that
    /// expires here keeps its `category_id` and is labelled as having no
    /// category. `TrashService` purges detach such entries.
    pub fn rehydrate(&self) -> SpendbookResult<RehydrateReport> {
        self.settings.load()?;
        let retention_days = self.settings.trash_retention_days()?;

        let report = RehydrateReport {
            retention_days,
            purged_categories: self.categories.load(retention_days)?,
            purged_entries: self.entries.load(retention_days)?,
        };

        if report.purged_categories + report.purged_entries > 0 {
            tracing::info!(
                retention_days,
                categories = report.purged_categories,
                entries = report.purged_entries,
                "purged expired trash on load"
            );
        }
        Ok(report)
    }

    /// Save all stores, reporting the first failure
    pub fn save_all(&self) -> SpendbookResult<()> {
        self.settings.save()?;
        self.categories.save()?;
        self.entries.save()?;
        Ok(())
    }
}
