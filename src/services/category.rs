//! Category service
//!
//! Resolves categories by id or name and sequences category deletion with
//! the matching change to the entries that reference the category.

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Category, CategoryId, CategoryKind, NewCategory, SoftDelete};
use crate::storage::Storage;

/// How a category is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Move to the trash
    Soft,
    /// Remove for good
    Hard,
}

impl DeleteMode {
    pub fn is_soft(self) -> bool {
        self == Self::Soft
    }
}

/// What happens to the entries of a deleted category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryCascade {
    /// Leave entries as they are
    #[default]
    Untouched,
    /// Keep entries active and clear their category
    Detach,
    /// Move entries to the trash with the category
    Trash,
}

/// Outcome of a category deletion
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    pub entries_affected: usize,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(
        &self,
        name: &str,
        kind: CategoryKind,
        color: Option<String>,
        icon: Option<String>,
        icon_image: Option<String>,
    ) -> SpendbookResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SpendbookError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let mut new = NewCategory::new(name, kind);
        new.color = color;
        new.icon = icon;
        new.icon_image = icon_image;

        self.storage.categories.add_category(new)
    }

    /// Find a category by ID, or by name among active categories
    pub fn find(&self, identifier: &str) -> SpendbookResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(&id)? {
                return Ok(Some(category));
            }
        }

        self.storage.categories.find_active_by_name(identifier)
    }

    /// Find a category or fail with `NotFound`
    pub fn resolve(&self, identifier: &str) -> SpendbookResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| SpendbookError::category_not_found(identifier))
    }

    /// List categories, optionally including the trash, income first
    pub fn list(&self, include_trashed: bool) -> SpendbookResult<Vec<Category>> {
        let mut categories = if include_trashed {
            self.storage.categories.all()?.to_vec()
        } else {
            self.storage.categories.active()?
        };
        categories.sort_by(|a, b| {
            b.is_income()
                .cmp(&a.is_income())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Delete a category, then apply `cascade` to its entries
    ///
    /// The category is removed first; the entries are changed only once the
    /// deletion has been applied. After a hard delete no entry, active or
    /// trashed, references the category: `Untouched` becomes `Detach`, and
    /// `Trash` trashes the active entries and then detaches every entry.
    pub fn delete(
        &self,
        id: &CategoryId,
        mode: DeleteMode,
        cascade: EntryCascade,
    ) -> SpendbookResult<CategoryDeletion> {
        let category = self
            .storage
            .categories
            .remove_category(id, mode.is_soft())?
            .ok_or_else(|| SpendbookError::category_not_found(id.as_str()))?;

        let cascade = match (mode, cascade) {
            (DeleteMode::Hard, EntryCascade::Untouched) => EntryCascade::Detach,
            (_, cascade) => cascade,
        };

        let entries_affected = match cascade {
            EntryCascade::Untouched => 0,
            EntryCascade::Detach => self.storage.entries.remove_entries_by_category(id, false)?,
            EntryCascade::Trash if mode.is_soft() => {
                self.storage.entries.remove_entries_by_category(id, true)?
            }
            EntryCascade::Trash => {
                self.storage.entries.remove_entries_by_category(id, true)?;
                self.storage.entries.remove_entries_by_category(id, false)?
            }
        };

        tracing::info!(
            category = %id,
            ?mode,
            ?cascade,
            entries_affected,
            "deleted category"
        );

        Ok(CategoryDeletion {
            category,
            entries_affected,
        })
    }

    /// Find a category by ID, else a trashed category by name
    ///
    /// Several trashed categories can share a name; the most recently
    /// trashed one wins.
    pub fn find_trashed(&self, identifier: &str) -> SpendbookResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(&id)? {
                return Ok(Some(category));
            }
        }

        let name_lower = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .categories
            .trashed()?
            .into_iter()
            .filter(|c| c.name.to_lowercase() == name_lower)
            .max_by_key(|c| c.deleted_at))
    }

    /// Restore a trashed category
    pub fn restore(&self, id: &CategoryId) -> SpendbookResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| SpendbookError::category_not_found(id.as_str()))?;

        if category.is_active() {
            return Err(SpendbookError::Validation(format!(
                "Category '{}' is not in the trash",
                category.name
            )));
        }

        self.storage.categories.restore_category(id)?;
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| SpendbookError::category_not_found(id.as_str()))
    }

    /// Label shown next to an entry: the name, marked when trashed
    pub fn label(&self, id: Option<&CategoryId>) -> SpendbookResult<String> {
        let category = match id {
            Some(id) => self.storage.categories.get(id)?,
            None => None,
        };
        Ok(category_label(category.as_ref()))
    }
}

/// Label for an optional category
pub fn category_label(category: Option<&Category>) -> String {
    match category {
        Some(c) if c.is_trashed() => format!("{} (Deleted)", c.name),
        Some(c) => c.name.clone(),
        None => "Category N/A".to_string(),
    }
}
