//! Entry store
//!
//! Owns the entry collection and the date queries front ends build their
//! day views from. Entries reference categories by id only; this store never
//! looks a category up.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::adapter::{load_json, save_json, PersistenceAdapter, ENTRIES_KEY};
use super::collection::Collection;
use super::retention::{partition_expired, partition_trashed};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{Amount, CategoryId, Entry, EntryId, EntryUpdate, NewEntry, SoftDelete};

/// Persisted entry data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryData {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

#[derive(Serialize)]
struct EntryDataRef<'a> {
    entries: &'a [Entry],
}

fn validate_amount(amount: Amount) -> SpendbookResult<()> {
    if !amount.is_positive() {
        return Err(SpendbookError::Validation(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }
    Ok(())
}

/// Store for entries
pub struct EntryStore {
    adapter: Arc<dyn PersistenceAdapter>,
    entries: Collection<Entry>,
}

impl EntryStore {
    /// Create an empty store; call [`EntryStore::load`] to rehydrate
    pub fn new(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        Self {
            adapter,
            entries: Collection::new(),
        }
    }

    /// Rehydrate from the adapter, then purge trash older than `retention_days`
    pub fn load(&self, retention_days: u32) -> SpendbookResult<usize> {
        let data: EntryData = load_json(self.adapter.as_ref(), ENTRIES_KEY)?;
        let loaded = data.entries.len();
        self.entries.replace(data.entries)?;

        let purged = self.purge_expired(retention_days)?;
        tracing::info!(loaded, purged, "rehydrated entries");
        Ok(purged)
    }

    /// Persist the current collection, reporting failure
    pub fn save(&self) -> SpendbookResult<()> {
        let entries = self.entries.snapshot()?;
        self.write(&entries)
    }

    fn write(&self, entries: &[Entry]) -> SpendbookResult<()> {
        save_json(self.adapter.as_ref(), ENTRIES_KEY, &EntryDataRef { entries })
    }

    fn persist(&self, entries: &[Entry]) {
        if let Err(err) = self.write(entries) {
            tracing::warn!(error = %err, "Failed to persist entries");
        }
    }

    /// Record a new entry; the category reference is not checked here
    pub fn add_entry(&self, new: NewEntry) -> SpendbookResult<Entry> {
        validate_amount(new.amount)?;

        let entry = new.into_entry();
        let added = entry.clone();
        let next = self.entries.update(move |items| {
            let mut next = items.to_vec();
            next.push(entry);
            Some(next)
        })?;

        if let Some(next) = next {
            self.persist(&next);
        }
        tracing::debug!(entry = %added.id, amount = %added.amount, "added entry");
        Ok(added)
    }

    /// Merge `update` into the entry with `id`
    ///
    /// Returns the updated entry, or `None` if the id is unknown.
    pub fn update_entry(&self, id: &EntryId, update: EntryUpdate) -> SpendbookResult<Option<Entry>> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        let mut updated = None;
        let next = self.entries.update(|items| {
            let position = items.iter().position(|e| &e.id == id)?;
            let mut next = items.to_vec();
            next[position].apply(update);
            updated = Some(next[position].clone());
            Some(next)
        })?;

        if let Some(next) = next {
            self.persist(&next);
            tracing::debug!(entry = %id, "updated entry");
        }
        Ok(updated)
    }

    /// Move an entry to the trash (`soft`) or remove it for good
    pub fn remove_entry(&self, id: &EntryId, soft: bool) -> SpendbookResult<Option<Entry>> {
        let mut affected = None;

        let next = self.entries.update(|items| {
            let position = items.iter().position(|e| &e.id == id)?;
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
                Some(items.iter().filter(|e| &e.id != id).cloned().collect())
            }
        })?;

        if let Some(next) = next {
            self.persist(&next);
            tracing::debug!(entry = %id, soft, "removed entry");
        }
        Ok(affected)
    }

    /// Take an entry out of the trash; `false` if absent or already active
    pub fn restore_entry(&self, id: &EntryId) -> SpendbookResult<bool> {
        let next = self.entries.update(|items| {
            let position = items.iter().position(|e| &e.id == id && e.is_trashed())?;
            let mut next = items.to_vec();
            next[position].deleted_at = None;
            next[position].updated_at = Utc::now();
            Some(next)
        })?;

        match next {
            Some(next) => {
                self.persist(&next);
                tracing::debug!(entry = %id, "restored entry");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply a category deletion to the entries referencing it
    ///
    /// With `cascade_delete` every active referencing entry is trashed.
    /// Otherwise every referencing entry, trashed or not, is detached
    /// (`category_id` cleared) and keeps its trash state. Returns how many
    /// entries changed.
    pub fn remove_entries_by_category(
        &self,
        category_id: &CategoryId,
        cascade_delete: bool,
    ) -> SpendbookResult<usize> {
        let mut changed = 0;
        let next = self.entries.update(|items| {
            let now = Utc::now();
            let next: Vec<Entry> = items
                .iter()
                .map(|entry| {
                    if !entry.belongs_to(category_id) {
                        return entry.clone();
                    }
                    let mut entry = entry.clone();
                    if cascade_delete {
                        if entry.is_trashed() {
                            return entry;
                        }
                        entry.deleted_at = Some(now);
                    } else {
                        entry.category_id = None;
                    }
                    entry.updated_at = now;
                    changed += 1;
                    entry
                })
                .collect();

            if changed == 0 {
                None
            } else {
                Some(next)
            }
        })?;

        if let Some(next) = next {
            self.persist(&next);
            tracing::debug!(category = %category_id, cascade_delete, count = changed, "cascaded category removal to entries");
        }
        Ok(changed)
    }

    /// Permanently remove every trashed entry regardless of age
    pub fn purge_trash(&self) -> SpendbookResult<usize> {
        let mut removed = 0;
        let next = self.entries.update(|items| {
            let (kept, trashed) = partition_trashed(items);
            removed = trashed.len();
            (removed > 0).then_some(kept)
        })?;

        if let Some(next) = next {
            self.persist(&next);
            tracing::debug!(count = removed, "purged entries");
        }
        Ok(removed)
    }

    /// Permanently remove trashed entries older than the retention period
    pub fn purge_expired(&self, retention_days: u32) -> SpendbookResult<usize> {
        self.purge_expired_at(retention_days, Utc::now())
    }

    /// [`EntryStore::purge_expired`] with an explicit clock
    pub fn purge_expired_at(&self, retention_days: u32, now: DateTime<Utc>) -> SpendbookResult<usize> {
        let mut removed = 0;
        let next = self.entries.update(|items| {
            let (kept, expired) = partition_expired(items, retention_days, now);
            removed = expired.len();
            (removed > 0).then_some(kept)
        })?;

        if let Some(next) = next {
            self.persist(&next);
            tracing::debug!(count = removed, retention_days, "purged expired entries");
        }
        Ok(removed)
    }

    /// Active entries dated on `day`, whatever their time of day
    pub fn get_entries_by_date(&self, day: NaiveDate) -> SpendbookResult<Vec<Entry>> {
        let entries = self.entries.snapshot()?;
        Ok(entries
            .iter()
            .filter(|e| e.is_active() && e.date.is_on(day))
            .cloned()
            .collect())
    }

    /// Active entries dated on the current local day
    pub fn get_today_entries(&self) -> SpendbookResult<Vec<Entry>> {
        self.get_entries_by_date(Local::now().date_naive())
    }

    /// Active entries dated between `start` and `end`, both inclusive
    pub fn get_entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> SpendbookResult<Vec<Entry>> {
        let entries = self.entries.snapshot()?;
        Ok(entries
            .iter()
            .filter(|e| e.is_active() && e.day() >= start && e.day() <= end)
            .cloned()
            .collect())
    }

    /// Replace the whole collection (restore path); persistence failures are reported
    pub fn set_entries(&self, entries: Vec<Entry>) -> SpendbookResult<()> {
        let count = entries.len();
        self.entries.replace(entries)?;
        self.save()?;
        tracing::debug!(count, "replaced entries");
        Ok(())
    }

    /// Get an entry by ID, active or trashed
    pub fn get(&self, id: &EntryId) -> SpendbookResult<Option<Entry>> {
        let entries = self.entries.snapshot()?;
        Ok(entries.iter().find(|e| &e.id == id).cloned())
    }

    /// Snapshot of every entry, trashed ones included
    pub fn all(&self) -> SpendbookResult<Arc<Vec<Entry>>> {
        self.entries.snapshot()
    }

    /// Entries not in the trash
    pub fn active(&self) -> SpendbookResult<Vec<Entry>> {
        let entries = self.entries.snapshot()?;
        Ok(entries.iter().filter(|e| e.is_active()).cloned().collect())
    }

    /// Entries in the trash
    pub fn trashed(&self) -> SpendbookResult<Vec<Entry>> {
        let entries = self.entries.snapshot()?;
        Ok(entries.iter().filter(|e| e.is_trashed()).cloned().collect())
    }

    /// Count entries, trashed ones included
    pub fn count(&self) -> SpendbookResult<usize> {
        Ok(self.entries.snapshot()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDate;
    use crate::storage::adapter::MemoryAdapter;
    use chrono::Duration;

    fn create_test_store() -> (Arc<MemoryAdapter>, EntryStore) {
        let adapter = Arc::new(MemoryAdapter::new());
        let store = EntryStore::new(adapter.clone());
        (adapter, store)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn date(s: &str) -> EntryDate {
        s.parse().unwrap()
    }

    fn ids(entries: &[Entry]) -> Vec<EntryId> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_salary_scenario() {
        let (_adapter, store) = create_test_store();
        let salary = CategoryId::new();

        let e1 = store
            .add_entry(NewEntry::new(salary, Amount::from_units(500), day(2025, 6, 1)))
            .unwrap();
        assert_eq!(ids(&store.get_entries_by_date(day(2025, 6, 1)).unwrap()), vec![e1.id.clone()]);

        store.remove_entry(&e1.id, true).unwrap();
        assert!(store.get_entries_by_date(day(2025, 6, 1)).unwrap().is_empty());

        // Trashed today: not yet expired
        assert_eq!(store.purge_expired(30).unwrap(), 0);
        assert!(store.get(&e1.id).unwrap().is_some());

        // Thirty-one days later it is gone for good
        let later = Utc::now() + Duration::days(31);
        assert_eq!(store.purge_expired_at(30, later).unwrap(), 1);
        assert!(store.get(&e1.id).unwrap().is_none());
        assert!(!store.restore_entry(&e1.id).unwrap());
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let (adapter, store) = create_test_store();
        let err = store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::zero(), day(2025, 6, 1)))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.count().unwrap(), 0);
        assert_eq!(adapter.save_count(), 0);
    }

    #[test]
    fn test_add_accepts_unknown_category() {
        let (_adapter, store) = create_test_store();
        let entry = store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(1), day(2025, 6, 1)))
            .unwrap();
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn test_date_filter_ignores_time_of_day() {
        let (_adapter, store) = create_test_store();
        let category = CategoryId::new();
        let add = |d: &str| {
            store
                .add_entry(NewEntry::new(category.clone(), Amount::from_units(10), date(d)))
                .unwrap()
        };

        let morning = add("2025-01-15T00:00:00.000Z");
        let evening = add("2025-01-15T23:59:59.999Z");
        let plain = add("2025-01-15");
        let _before = add("2025-01-14T23:59:59.000Z");
        let _after = add("2025-01-16");
        let trashed = add("2025-01-15T12:00:00.000Z");
        store.remove_entry(&trashed.id, true).unwrap();

        let mut found = ids(&store.get_entries_by_date(day(2025, 1, 15)).unwrap());
        found.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let mut expected = vec![morning.id, evening.id, plain.id];
        expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(found, expected);
    }

    #[test]
    fn test_update_entry() {
        let (_adapter, store) = create_test_store();
        let entry = store
            .add_entry(
                NewEntry::new(CategoryId::new(), Amount::from_units(10), day(2025, 6, 1)).note("lunch"),
            )
            .unwrap();

        let updated = store
            .update_entry(
                &entry.id,
                EntryUpdate::new().amount(Amount::from_units(15)).note(Some("brunch".into())),
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.amount, Amount::from_units(15));
        assert_eq!(updated.note.as_deref(), Some("brunch"));
        assert_eq!(updated.created_at, entry.created_at);
        assert!(updated.updated_at >= entry.updated_at);
        assert_eq!(store.get(&entry.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_rejects_zero_amount() {
        let (_adapter, store) = create_test_store();
        let entry = store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(10), day(2025, 6, 1)))
            .unwrap();

        let err = store
            .update_entry(&entry.id, EntryUpdate::new().amount(Amount::zero()))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(&entry.id).unwrap().unwrap().amount, Amount::from_units(10));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (adapter, store) = create_test_store();
        let missing = EntryId::new();
        assert!(store
            .update_entry(&missing, EntryUpdate::new().note(None))
            .unwrap()
            .is_none());
        assert!(store.remove_entry(&missing, true).unwrap().is_none());
        assert!(!store.restore_entry(&missing).unwrap());
        assert_eq!(adapter.save_count(), 0);
    }

    #[test]
    fn test_soft_delete_round_trip() {
        let (_adapter, store) = create_test_store();
        let entry = store
            .add_entry(
                NewEntry::new(CategoryId::new(), Amount::parse("42.50").unwrap(), day(2025, 3, 9))
                    .note("books"),
            )
            .unwrap();

        store.remove_entry(&entry.id, true).unwrap();
        assert_eq!(store.trashed().unwrap().len(), 1);
        assert!(store.restore_entry(&entry.id).unwrap());

        let restored = store.get(&entry.id).unwrap().unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(restored.amount, entry.amount);
        assert_eq!(restored.date, entry.date);
        assert_eq!(restored.note, entry.note);
        assert_eq!(restored.category_id, entry.category_id);
        assert_eq!(restored.created_at, entry.created_at);
    }

    #[test]
    fn test_hard_delete() {
        let (_adapter, store) = create_test_store();
        let entry = store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(3), day(2025, 3, 9)))
            .unwrap();
        let removed = store.remove_entry(&entry.id, false).unwrap().unwrap();
        assert_eq!(removed.id, entry.id);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_cascade_trash() {
        let (_adapter, store) = create_test_store();
        let food = CategoryId::new();
        let rent = CategoryId::new();
        let lunch = store
            .add_entry(NewEntry::new(food.clone(), Amount::from_units(10), day(2025, 6, 1)))
            .unwrap();
        let dinner = store
            .add_entry(NewEntry::new(food.clone(), Amount::from_units(20), day(2025, 6, 1)))
            .unwrap();
        let june = store
            .add_entry(NewEntry::new(rent, Amount::from_units(900), day(2025, 6, 1)))
            .unwrap();

        assert_eq!(store.remove_entries_by_category(&food, true).unwrap(), 2);

        assert_eq!(ids(&store.get_entries_by_date(day(2025, 6, 1)).unwrap()), vec![june.id]);
        assert!(store.get(&lunch.id).unwrap().unwrap().is_trashed());
        let dinner = store.get(&dinner.id).unwrap().unwrap();
        assert!(dinner.is_trashed());
        assert!(dinner.belongs_to(&food));
    }

    #[test]
    fn test_cascade_detach() {
        let (_adapter, store) = create_test_store();
        let food = CategoryId::new();
        let lunch = store
            .add_entry(NewEntry::new(food.clone(), Amount::from_units(10), day(2025, 6, 1)))
            .unwrap();
        let old = store
            .add_entry(NewEntry::new(food.clone(), Amount::from_units(5), day(2025, 5, 1)))
            .unwrap();
        store.remove_entry(&old.id, true).unwrap();

        assert_eq!(store.remove_entries_by_category(&food, false).unwrap(), 2);

        let lunch = store.get(&lunch.id).unwrap().unwrap();
        assert!(lunch.is_active());
        assert!(lunch.is_uncategorized());
        assert_eq!(store.get_entries_by_date(day(2025, 6, 1)).unwrap().len(), 1);

        let old = store.get(&old.id).unwrap().unwrap();
        assert!(old.is_trashed());
        assert!(old.is_uncategorized());
    }

    #[test]
    fn test_cascade_without_matches_changes_nothing() {
        let (adapter, store) = create_test_store();
        store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(10), day(2025, 6, 1)))
            .unwrap();
        let saves = adapter.save_count();
        assert_eq!(store.remove_entries_by_category(&CategoryId::new(), true).unwrap(), 0);
        assert_eq!(adapter.save_count(), saves);
    }

    #[test]
    fn test_purge_trash() {
        let (_adapter, store) = create_test_store();
        let category = CategoryId::new();
        let keep = store
            .add_entry(NewEntry::new(category.clone(), Amount::from_units(1), day(2025, 6, 1)))
            .unwrap();
        let drop = store
            .add_entry(NewEntry::new(category, Amount::from_units(2), day(2025, 6, 1)))
            .unwrap();
        store.remove_entry(&drop.id, true).unwrap();

        assert_eq!(store.purge_trash().unwrap(), 1);
        assert_eq!(ids(&store.all().unwrap()), vec![keep.id]);
        assert!(!store.restore_entry(&drop.id).unwrap());
    }

    #[test]
    fn test_purge_expired_boundary() {
        let (_adapter, store) = create_test_store();
        let now = Utc::now();
        let trashed_days_ago = |days: i64| {
            let mut entry = Entry::new(None, Amount::from_units(1), day(2025, 1, 1).into());
            entry.deleted_at = Some(now - Duration::days(days));
            entry
        };
        let young = trashed_days_ago(29);
        let exact = trashed_days_ago(30);
        let old = trashed_days_ago(31);
        store.set_entries(vec![young.clone(), exact, old]).unwrap();

        assert_eq!(store.purge_expired_at(30, now).unwrap(), 2);
        assert_eq!(ids(&store.all().unwrap()), vec![young.id]);
    }

    #[test]
    fn test_entries_in_range() {
        let (_adapter, store) = create_test_store();
        let category = CategoryId::new();
        for d in [1, 10, 30] {
            store
                .add_entry(NewEntry::new(category.clone(), Amount::from_units(d), day(2025, 6, d as u32)))
                .unwrap();
        }
        store
            .add_entry(NewEntry::new(category, Amount::from_units(7), day(2025, 7, 1)))
            .unwrap();

        let june = store.get_entries_in_range(day(2025, 6, 1), day(2025, 6, 30)).unwrap();
        assert_eq!(june.len(), 3);
    }

    #[test]
    fn test_today_entries() {
        let (_adapter, store) = create_test_store();
        let today = Local::now().date_naive();
        store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(4), today))
            .unwrap();
        assert_eq!(store.get_today_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (adapter, store) = create_test_store();
        let entry = store
            .add_entry(
                NewEntry::new(CategoryId::new(), Amount::parse("300.75").unwrap(), date("2025-01-15T18:45:00.000Z"))
                    .note("Dinner with friends"),
            )
            .unwrap();

        let reloaded = EntryStore::new(adapter);
        reloaded.load(30).unwrap();
        assert_eq!(reloaded.get(&entry.id).unwrap().unwrap(), entry);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let (adapter, store) = create_test_store();
        adapter.set_simulate_write_error(true);

        let entry = store
            .add_entry(NewEntry::new(CategoryId::new(), Amount::from_units(9), day(2025, 6, 1)))
            .unwrap();
        assert!(store.get(&entry.id).unwrap().is_some());
        assert!(store.save().is_err());
    }
}
