//! Entry service
//!
//! Checks the category an entry is filed under before it reaches the store
//! and produces the sorted day and range listings front ends show.

use chrono::NaiveDate;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Amount, CategoryId, Entry, EntryDate, EntryId, EntryUpdate, NewEntry, SoftDelete};
use crate::storage::Storage;

/// Service for entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check that a category exists and is not in the trash
    fn require_active_category(&self, id: &CategoryId) -> SpendbookResult<()> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| SpendbookError::category_not_found(id.as_str()))?;

        if category.is_trashed() {
            return Err(SpendbookError::Validation(format!(
                "Category '{}' is in the trash",
                category.name
            )));
        }
        Ok(())
    }

    /// Record a new entry under an active category
    pub fn create(
        &self,
        category_id: &CategoryId,
        amount: Amount,
        date: EntryDate,
        note: Option<String>,
    ) -> SpendbookResult<Entry> {
        self.require_active_category(category_id)?;

        let mut new = NewEntry::new(category_id.clone(), amount, date);
        new.note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        self.storage.entries.add_entry(new)
    }

    /// Update an entry; a new category must be active
    pub fn update(&self, id: &EntryId, update: EntryUpdate) -> SpendbookResult<Entry> {
        if update.is_empty() {
            return Err(SpendbookError::Validation("No changes specified".into()));
        }

        if let Some(Some(category_id)) = &update.category_id {
            self.require_active_category(category_id)?;
        }

        self.storage
            .entries
            .update_entry(id, update)?
            .ok_or_else(|| SpendbookError::entry_not_found(id.as_str()))
    }

    /// Find an entry by full ID or by a unique ID prefix
    pub fn find(&self, identifier: &str) -> SpendbookResult<Option<Entry>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        let entries = self.storage.entries.all()?;
        if let Some(entry) = entries.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(Some(entry.clone()));
        }

        let mut matches = entries.iter().filter(|e| e.id.as_str().starts_with(identifier));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(Some(entry.clone())),
            (Some(_), Some(_)) => Err(SpendbookError::Validation(format!(
                "Entry ID prefix '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Find an entry or fail with `NotFound`
    pub fn resolve(&self, identifier: &str) -> SpendbookResult<Entry> {
        self.find(identifier)?
            .ok_or_else(|| SpendbookError::entry_not_found(identifier))
    }

    /// Active entries of one day, newest first
    pub fn list_for_day(&self, day: NaiveDate) -> SpendbookResult<Vec<Entry>> {
        let mut entries = self.storage.entries.get_entries_by_date(day)?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Active entries between two days (inclusive), newest first
    pub fn list_range(&self, start: NaiveDate, end: NaiveDate) -> SpendbookResult<Vec<Entry>> {
        if start > end {
            return Err(SpendbookError::Validation(format!(
                "Range start {} is after end {}",
                start, end
            )));
        }

        let mut entries = self.storage.entries.get_entries_in_range(start, end)?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}

/// Sort by date, then creation time, both descending
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.date
            .sort_key()
            .cmp(&a.date.sort_key())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryKind, NewCategory};

    fn setup() -> (Storage, CategoryId) {
        let storage = Storage::in_memory();
        let food = storage
            .categories
            .add_category(NewCategory::new("Food", CategoryKind::Expense))
            .unwrap();
        (storage, food.id)
    }

    fn date(s: &str) -> EntryDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_requires_active_category() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);

        let entry = service
            .create(&food, Amount::from_units(12), date("2025-06-01"), Some("  lunch ".into()))
            .unwrap();
        assert_eq!(entry.note.as_deref(), Some("lunch"));

        let err = service
            .create(&CategoryId::new(), Amount::from_units(1), date("2025-06-01"), None)
            .unwrap_err();
        assert!(err.is_not_found());

        storage.categories.remove_category(&food, true).unwrap();
        let err = service
            .create(&food, Amount::from_units(1), date("2025-06-01"), None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_zero_amount() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);
        let err = service
            .create(&food, Amount::zero(), date("2025-06-01"), None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);
        let entry = service
            .create(&food, Amount::from_units(3), date("2025-06-01"), Some("   ".into()))
            .unwrap();
        assert!(entry.note.is_none());
    }

    #[test]
    fn test_update() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);
        let entry = service
            .create(&food, Amount::from_units(12), date("2025-06-01"), None)
            .unwrap();

        let updated = service
            .update(&entry.id, EntryUpdate::new().amount(Amount::from_units(15)))
            .unwrap();
        assert_eq!(updated.amount, Amount::from_units(15));

        assert!(service.update(&entry.id, EntryUpdate::new()).unwrap_err().is_validation());
        assert!(service
            .update(&EntryId::new(), EntryUpdate::new().note(None))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .update(&entry.id, EntryUpdate::new().category(CategoryId::new()))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_find_by_prefix() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);
        let entry = service
            .create(&food, Amount::from_units(12), date("2025-06-01"), None)
            .unwrap();

        assert_eq!(service.find(entry.id.as_str()).unwrap().unwrap().id, entry.id);
        assert_eq!(service.find(entry.id.short()).unwrap().unwrap().id, entry.id);
        assert!(service.find("").unwrap().is_none());
        assert!(service.resolve("zzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_ambiguous_prefix() {
        let (storage, _food) = setup();
        let service = EntryService::new(&storage);
        let mut first = Entry::new(None, Amount::from_units(1), date("2025-06-01"));
        first.id = "abc1".parse().unwrap();
        let mut second = Entry::new(None, Amount::from_units(2), date("2025-06-01"));
        second.id = "abc2".parse().unwrap();
        storage.entries.set_entries(vec![first, second]).unwrap();

        assert!(service.find("abc").unwrap_err().is_validation());
        assert_eq!(service.find("abc2").unwrap().unwrap().amount, Amount::from_units(2));
    }

    #[test]
    fn test_list_for_day_newest_first() {
        let (storage, food) = setup();
        let service = EntryService::new(&storage);
        let morning = service
            .create(&food, Amount::from_units(1), date("2025-01-15T08:00:00.000Z"), None)
            .unwrap();
        let evening = service
            .create(&food, Amount::from_units(2), date("2025-01-15T20:00:00.000Z"), None)
            .unwrap();
        service
            .create(&food, Amount::from_units(3), date("2025-01-16"), None)
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let ids: Vec<_> = service
            .list_for_day(day)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![evening.id, morning.id]);
    }

    #[test]
    fn test_list_range_validates_order() {
        let (storage, _food) = setup();
        let service = EntryService::new(&storage);
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(service.list_range(start, end).unwrap_err().is_validation());
        assert!(service.list_range(end, start).unwrap().is_empty());
    }
}
