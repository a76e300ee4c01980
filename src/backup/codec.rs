//! Export and import of the whole store
//!
//! Import is all-or-nothing. The document is checked before anything is
//! touched, and the previous state of all three stores is kept aside; if any
//! replacement fails to persist, every store is put back to that state.
//! Import never purges: expired trash in the document is dropped at the next
//! rehydration.

use chrono::{DateTime, Utc};

use super::document::{BackupDocument, BackupSettings};
use crate::config::Settings;
use crate::error::{SpendbookError, SpendbookResult};
use crate::storage::Storage;

/// What an import replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories: usize,
    pub entries: usize,
    pub settings_applied: bool,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        let settings = if self.settings_applied {
            "settings applied"
        } else {
            "settings unchanged"
        };
        format!(
            "Imported {} categories and {} entries ({})",
            self.categories, self.entries, settings
        )
    }
}

/// Snapshot every store into a backup document
pub fn export_data(storage: &Storage) -> SpendbookResult<BackupDocument> {
    export_data_at(storage, Utc::now())
}

/// [`export_data`] with an explicit export time
pub fn export_data_at(storage: &Storage, now: DateTime<Utc>) -> SpendbookResult<BackupDocument> {
    let settings = storage.settings.get()?;
    let doc = BackupDocument {
        categories: storage.categories.all()?.to_vec(),
        entries: storage.entries.all()?.to_vec(),
        settings: Some(BackupSettings::from(settings.as_ref())),
        exported_at: now,
    };

    tracing::info!(
        categories = doc.categories.len(),
        entries = doc.entries.len(),
        "exported backup"
    );
    Ok(doc)
}

/// Settings the document would leave in place, or `None` if it has no settings section
fn staged_settings(doc: &BackupDocument, current: &Settings) -> SpendbookResult<Option<Settings>> {
    let Some(section) = &doc.settings else {
        return Ok(None);
    };

    let next = section.apply_to(current);
    next.validate()
        .map_err(|e| SpendbookError::Import(format!("Invalid settings in backup: {}", e)))?;
    Ok(Some(next))
}

/// Replace every store with the contents of `doc`
pub fn import_data(storage: &Storage, doc: BackupDocument) -> SpendbookResult<ImportSummary> {
    let previous_settings = storage.settings.get()?;
    let previous_categories = storage.categories.all()?;
    let previous_entries = storage.entries.all()?;

    let settings = staged_settings(&doc, &previous_settings)?;
    let summary = ImportSummary {
        categories: doc.categories.len(),
        entries: doc.entries.len(),
        settings_applied: settings.is_some(),
    };

    let applied = (|| -> SpendbookResult<()> {
        if let Some(settings) = settings {
            storage.settings.replace(settings)?;
        }
        storage.categories.set_categories(doc.categories)?;
        storage.entries.set_entries(doc.entries)?;
        Ok(())
    })();

    if let Err(err) = applied {
        tracing::warn!(error = %err, "Import failed, rolling back");
        if let Err(e) = storage.settings.replace((*previous_settings).clone()) {
            tracing::warn!(error = %e, "Failed to persist settings during rollback");
        }
        if let Err(e) = storage.categories.set_categories(previous_categories.to_vec()) {
            tracing::warn!(error = %e, "Failed to persist categories during rollback");
        }
        if let Err(e) = storage.entries.set_entries(previous_entries.to_vec()) {
            tracing::warn!(error = %e, "Failed to persist entries during rollback");
        }
        return Err(SpendbookError::Import(format!(
            "Backup was not applied: {}",
            err
        )));
    }

    tracing::info!(
        categories = summary.categories,
        entries = summary.entries,
        settings = summary.settings_applied,
        "imported backup"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Category, CategoryKind, Entry, NewCategory, NewEntry};
    use crate::storage::{MemoryAdapter, NoopImageStore};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        let salary = storage
            .categories
            .add_category(NewCategory::new("Salary", CategoryKind::Income))
            .unwrap();
        let food = storage
            .categories
            .add_category(NewCategory::new("Food", CategoryKind::Expense).color("#FF6B6B"))
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        storage
            .entries
            .add_entry(NewEntry::new(salary.id, Amount::from_units(500), day))
            .unwrap();
        let lunch = storage
            .entries
            .add_entry(NewEntry::new(food.id.clone(), Amount::parse("12.50").unwrap(), day))
            .unwrap();
        storage.entries.remove_entry(&lunch.id, true).unwrap();
        storage.categories.remove_category(&food.id, true).unwrap();
        storage.settings.set_trash_retention_days(14).unwrap();
        storage
    }

    #[test]
    fn test_export_includes_trash_and_settings() {
        let storage = seeded();
        let doc = export_data(&storage).unwrap();

        assert_eq!(doc.categories.len(), 2);
        assert_eq!(doc.entries.len(), 2);
        let settings = doc.settings.unwrap();
        assert_eq!(settings.trash_retention_days, Some(14));
        assert_eq!(settings.currency_symbol.as_deref(), Some("₹"));
    }

    #[test]
    fn test_round_trip() {
        let source = seeded();
        let doc = export_data(&source).unwrap();
        let json = serde_json::to_string(&doc).unwrap();

        let target = Storage::in_memory();
        let summary = import_data(&target, serde_json::from_str(&json).unwrap()).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                categories: 2,
                entries: 2,
                settings_applied: true,
            }
        );

        assert_eq!(*target.categories.all().unwrap(), *source.categories.all().unwrap());
        assert_eq!(*target.entries.all().unwrap(), *source.entries.all().unwrap());
        assert_eq!(*target.settings.get().unwrap(), *source.settings.get().unwrap());

        // Exporting the restored store gives the same document apart from the time
        let again = export_data_at(&target, doc.exported_at).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_import_without_settings_keeps_current() {
        let storage = Storage::in_memory();
        storage.settings.set_currency_symbol("$").unwrap();

        let doc = BackupDocument {
            categories: vec![Category::new("Rent", CategoryKind::Expense)],
            entries: Vec::new(),
            settings: None,
            exported_at: Utc::now(),
        };
        let summary = import_data(&storage, doc).unwrap();

        assert!(!summary.settings_applied);
        assert_eq!(storage.settings.currency_symbol().unwrap(), "$");
        assert_eq!(storage.categories.count().unwrap(), 1);
    }

    #[test]
    fn test_import_does_not_purge() {
        let storage = Storage::in_memory();
        let mut entry = Entry::new(None, Amount::from_units(1), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().into());
        entry.deleted_at = Some(Utc::now() - chrono::Duration::days(400));

        let doc = BackupDocument {
            categories: Vec::new(),
            entries: vec![entry],
            settings: None,
            exported_at: Utc::now(),
        };
        import_data(&storage, doc).unwrap();
        assert_eq!(storage.entries.count().unwrap(), 1);
    }

    #[test]
    fn test_invalid_settings_are_rejected_before_apply() {
        let storage = seeded();
        let doc = BackupDocument {
            categories: Vec::new(),
            entries: Vec::new(),
            settings: Some(BackupSettings {
                trash_retention_days: Some(0),
                currency_symbol: None,
            }),
            exported_at: Utc::now(),
        };

        let err = import_data(&storage, doc).unwrap_err();
        assert!(matches!(err, SpendbookError::Import(_)));
        assert_eq!(storage.categories.count().unwrap(), 2);
        assert_eq!(storage.settings.trash_retention_days().unwrap(), 14);
    }

    #[test]
    fn test_rollback_on_persist_failure() {
        let adapter = Arc::new(MemoryAdapter::new());
        let storage = Storage::new(adapter.clone(), Arc::new(NoopImageStore));
        storage.rehydrate().unwrap();
        let rent = storage
            .categories
            .add_category(NewCategory::new("Rent", CategoryKind::Expense))
            .unwrap();

        adapter.set_simulate_write_error(true);
        let doc = BackupDocument {
            categories: vec![Category::new("Other", CategoryKind::Income)],
            entries: Vec::new(),
            settings: Some(BackupSettings {
                trash_retention_days: Some(3),
                currency_symbol: Some("£".into()),
            }),
            exported_at: Utc::now(),
        };

        let err = import_data(&storage, doc).unwrap_err();
        assert!(matches!(err, SpendbookError::Import(_)));

        let categories = storage.categories.all().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, rent.id);
        assert_eq!(storage.settings.trash_retention_days().unwrap(), 30);
        assert_eq!(storage.settings.currency_symbol().unwrap(), "₹");

        // Persisted copy was never replaced either
        adapter.set_simulate_write_error(false);
        let reopened = Storage::new(adapter, Arc::new(NoopImageStore));
        reopened.rehydrate().unwrap();
        assert_eq!(reopened.categories.get(&rent.id).unwrap().unwrap().name, "Rent");
    }
}
