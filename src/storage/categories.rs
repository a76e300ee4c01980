//! Category store
//!
//! Owns the category collection. Every mutation swaps in a new list and then
//! persists it under [`CATEGORIES_KEY`]; a failed write is logged and the
//! in-memory list stays authoritative.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::adapter::{load_json, save_json, PersistenceAdapter, CATEGORIES_KEY};
use super::collection::Collection;
use super::images::{release_images, ImageStore};
use super::retention::{partition_expired, partition_trashed};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Category, CategoryIcon, CategoryId, NewCategory, SoftDelete};

/// Persisted category data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryDataRef<'a> {
    categories: &'a [Category],
}

/// Store for categories
pub struct CategoryStore {
    adapter: Arc<dyn PersistenceAdapter>,
    images: Arc<dyn ImageStore>,
    categories: Collection<Category>,
}

impl CategoryStore {
    /// Create an empty store; call [`CategoryStore::load`] to rehydrate
    pub fn new(adapter: Arc<dyn PersistenceAdapter>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            adapter,
            images,
            categories: Collection::new(),
        }
    }

    /// Rehydrate from the adapter, then purge trash older than `retention_days`
    ///
    /// Returns how many expired categories were purged.
    pub fn load(&self, retention_days: u32) -> SpendbookResult<usize> {
        let data: CategoryData = load_json(self.adapter.as_ref(), CATEGORIES_KEY)?;
        let loaded = data.categories.len();
        self.categories.replace(data.categories)?;

        let purged = self.purge_expired(retention_days)?;
        tracing::info!(loaded, purged, "rehydrated categories");
        Ok(purged)
    }

    /// Persist the current collection, reporting failure
    pub fn save(&self) -> SpendbookResult<()> {
        let categories = self.categories.snapshot()?;
        self.write(&categories)
    }

    fn write(&self, categories: &[Category]) -> SpendbookResult<()> {
        save_json(
            self.adapter.as_ref(),
            CATEGORIES_KEY,
            &CategoryDataRef { categories },
        )
    }

    /// Persist after a mutation; the in-memory state is already visible
    fn persist(&self, categories: &[Category]) {
        if let Err(err) = self.write(categories) {
            tracing::warn!(error = %err, "Failed to persist categories");
        }
    }

    /// Create a category with a fresh id and timestamps
    pub fn add_category(&self, new: NewCategory) -> SpendbookResult<Category> {
        let category = new.into_category();
        category
            .validate()
            .map_err(|e| SpendbookError::Validation(e.to_string()))?;

        let added = category.clone();
        let next = self.categories.update(move |items| {
            let mut next = items.to_vec();
            next.push(category);
            Some(next)
        })?;

        if let Some(next) = next {
            self.persist(&next);
        }
        tracing::debug!(category = %added.id, name = %added.name, "added category");
        Ok(added)
    }

    /// Move a category to the trash (`soft`) or remove it for good
    ///
    /// Returns the affected record, or `None` without any change when the id
    /// is unknown. Soft-deleting a category already in the trash keeps its
    /// original `deleted_at`. A hard delete releases the category's custom
    /// image on a best-effort basis.
    pub fn remove_category(&self, id: &CategoryId, soft: bool) -> SpendbookResult<Option<Category>> {
        let mut affected = None;

        let next = self.categories.update(|items| {
            let position = items.iter().position(|c| &c.id == id)?;
            let current = &items[position];

            if soft {
                if current.is_trashed() {
                    affected = Some(current.clone());
                    return None;
                }
                let now = Utc::now();
                let mut next = items.to_vec();
                next[position].deleted_at = Some(now);
                next[position].updated_at = now;
                affected = Some(next[position].clone());
                Some(next)
            } else {
                affected = Some(current.clone());
                Some(items.iter().filter(|c| &c.id != id).cloned().collect())
            }
        })?;

        if let Some(next) = next {
            self.persist(&next);
            if !soft {
                release_images(self.images.as_ref(), affected.iter());
            }
            tracing::debug!(category = %id, soft, "removed category");
        }
        Ok(affected)
    }

    /// Take a category out of the trash; `false` if absent or already active
    pub fn restore_category(&self, id: &CategoryId) -> SpendbookResult<bool> {
        let next = self.categories.update(|items| {
            let position = items.iter().position(|c| &c.id == id && c.is_trashed())?;
            let mut next = items.to_vec();
            next[position].deleted_at = None;
            next[position].updated_at = Utc::now();
            Some(next)
        })?;

        match next {
            Some(next) => {
                self.persist(&next);
                tracing::debug!(category = %id, "restored category");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Permanently remove every trashed category regardless of age
    pub fn purge_trash(&self) -> SpendbookResult<usize> {
        let mut removed = Vec::new();
        let next = self.categories.update(|items| {
            let (kept, trashed) = partition_trashed(items);
            if trashed.is_empty() {
                return None;
            }
            removed = trashed;
            Some(kept)
        })?;

        self.finish_purge(next, &removed);
        Ok(removed.len())
    }

    /// Permanently remove trashed categories older than the retention period
    pub fn purge_expired(&self, retention_days: u32) -> SpendbookResult<usize> {
        self.purge_expired_at(retention_days, Utc::now())
    }

    /// [`CategoryStore::purge_expired`] with an explicit clock
    pub fn purge_expired_at(&self, retention_days: u32, now: DateTime<Utc>) -> SpendbookResult<usize> {
        let mut removed = Vec::new();
        let next = self.categories.update(|items| {
            let (kept, expired) = partition_expired(items, retention_days, now);
            if expired.is_empty() {
                return None;
            }
            removed = expired;
            Some(kept)
        })?;

        self.finish_purge(next, &removed);
        Ok(removed.len())
    }

    fn finish_purge(&self, next: Option<Arc<Vec<Category>>>, removed: &[Category]) {
        if let Some(next) = next {
            self.persist(&next);
            release_images(self.images.as_ref(), removed);
            tracing::debug!(count = removed.len(), "purged categories");
        }
    }

    /// Display attributes of a category, active or trashed
    pub fn get_category_icon(&self, id: &CategoryId) -> SpendbookResult<Option<CategoryIcon>> {
        let categories = self.categories.snapshot()?;
        Ok(categories
            .iter()
            .find(|c| &c.id == id)
            .map(Category::icon_info))
    }

    /// Replace the whole collection (restore path); persistence failures are reported
    pub fn set_categories(&self, categories: Vec<Category>) -> SpendbookResult<()> {
        let count = categories.len();
        self.categories.replace(categories)?;
        self.save()?;
        tracing::debug!(count, "replaced categories");
        Ok(())
    }

    /// Get a category by ID, active or trashed
    pub fn get(&self, id: &CategoryId) -> SpendbookResult<Option<Category>> {
        let categories = self.categories.snapshot()?;
        Ok(categories.iter().find(|c| &c.id == id).cloned())
    }

    /// Snapshot of every category, trashed ones included
    pub fn all(&self) -> SpendbookResult<Arc<Vec<Category>>> {
        self.categories.snapshot()
    }

    /// Categories not in the trash
    pub fn active(&self) -> SpendbookResult<Vec<Category>> {
        let categories = self.categories.snapshot()?;
        Ok(categories.iter().filter(|c| c.is_active()).cloned().collect())
    }

    /// Categories in the trash
    pub fn trashed(&self) -> SpendbookResult<Vec<Category>> {
        let categories = self.categories.snapshot()?;
        Ok(categories.iter().filter(|c| c.is_trashed()).cloned().collect())
    }

    /// Find an active category by name (case-insensitive)
    pub fn find_active_by_name(&self, name: &str) -> SpendbookResult<Option<Category>> {
        let categories = self.categories.snapshot()?;
        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .iter()
            .find(|c| c.is_active() && c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Count categories, trashed ones included
    pub fn count(&self) -> SpendbookResult<usize> {
        Ok(self.categories.snapshot()?.len())
    }
}
