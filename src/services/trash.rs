//! Trash service
//!
//! One view over the trashed records of both stores.

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Category, CategoryId, Entry, EntryId};
use crate::storage::Storage;

/// Everything currently in the trash
#[derive(Debug, Clone, Default)]
pub struct TrashContents {
    pub categories: Vec<Category>,
    pub entries: Vec<Entry>,
}

impl TrashContents {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.entries.is_empty()
    }
}

/// Counts of records removed for good
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    pub categories: usize,
    pub entries: usize,
}

impl PurgeSummary {
    pub fn total(&self) -> usize {
        self.categories + self.entries
    }
}

/// Service for the trash
pub struct TrashService<'a> {
    storage: &'a Storage,
}

impl<'a> TrashService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Trashed categories and entries, most recently trashed first
    pub fn contents(&self) -> SpendbookResult<TrashContents> {
        let mut categories = self.storage.categories.trashed()?;
        categories.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        let mut entries = self.storage.entries.trashed()?;
        entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(TrashContents {
            categories,
            entries,
        })
    }

    /// Empty the trash of both stores regardless of age
    ///
    /// Entries still filed under a purged category are detached from it.
    pub fn purge_all(&self) -> SpendbookResult<PurgeSummary> {
        let trashed = self.storage.categories.trashed()?;
        let categories = self.storage.categories.purge_trash()?;
        let entries = self.storage.entries.purge_trash()?;
        let detached = self.detach_purged(&trashed)?;

        tracing::info!(categories, entries, detached, "emptied trash");
        Ok(PurgeSummary { categories, entries })
    }

    /// Remove trash older than the configured retention period
    ///
    /// Entries still filed under a purged category are detached from it.
    pub fn purge_expired(&self) -> SpendbookResult<PurgeSummary> {
        let retention_days = self.storage.settings.trash_retention_days()?;
        let trashed = self.storage.categories.trashed()?;
        let categories = self.storage.categories.purge_expired(retention_days)?;
        let entries = self.storage.entries.purge_expired(retention_days)?;
        if categories > 0 {
            self.detach_purged(&trashed)?;
        }

        Ok(PurgeSummary { categories, entries })
    }

    /// Clear references to those of `candidates` that no longer exist
    fn detach_purged(&self, candidates: &[Category]) -> SpendbookResult<usize> {
        let mut detached = 0;
        for category in candidates {
            if self.storage.categories.get(&category.id)?.is_none() {
                detached += self
                    .storage
                    .entries
                    .remove_entries_by_category(&category.id, false)?;
            }
        }
        Ok(detached)
    }

    /// Take an entry out of the trash
    pub fn restore_entry(&self, id: &EntryId) -> SpendbookResult<Entry> {
        if !self.storage.entries.restore_entry(id)? {
            return Err(SpendbookError::Validation(format!(
                "Entry {} is not in the trash",
                id
            )));
        }
        self.storage
            .entries
            .get(id)?
            .ok_or_else(|| SpendbookError::entry_not_found(id.as_str()))
    }

    /// Take a category out of the trash
    pub fn restore_category(&self, id: &CategoryId) -> SpendbookResult<Category> {
        if !self.storage.categories.restore_category(id)? {
            return Err(SpendbookError::Validation(format!(
                "Category {} is not in the trash",
                id
            )));
        }
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| SpendbookError::category_not_found(id.as_str()))
    }
}
