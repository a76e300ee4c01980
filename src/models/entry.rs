//! Entry model
//!
//! An entry is a single income or expense record. It stores only the
//! magnitude; whether it counts as income or expense comes from the category
//! it references.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::entry_date::EntryDate;
use super::ids::{CategoryId, EntryId};
use super::SoftDelete;

/// A financial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier
    pub id: EntryId,

    /// Owner id carried through from synced data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Category reference; `None` once detached from a deleted category
    pub category_id: Option<CategoryId>,

    /// Non-negative magnitude
    pub amount: Amount,

    /// Logical transaction date
    pub date: EntryDate,

    /// Free text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,

    /// When the entry was moved to the trash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Create a new entry
    pub fn new(category_id: Option<CategoryId>, amount: Amount, date: EntryDate) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            user_id: None,
            category_id,
            amount,
            date,
            note: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Calendar day of the entry
    pub fn day(&self) -> NaiveDate {
        self.date.day()
    }

    /// Check if the entry references the given category
    pub fn belongs_to(&self, category_id: &CategoryId) -> bool {
        self.category_id.as_ref() == Some(category_id)
    }

    /// Check if the entry has lost its category
    pub fn is_uncategorized(&self) -> bool {
        self.category_id.is_none()
    }

    /// Apply a partial update and bump `updated_at`
    pub fn apply(&mut self, update: EntryUpdate) {
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
        self.updated_at = Utc::now();
    }
}

impl SoftDelete for Entry {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.note {
            Some(note) if !note.is_empty() => write!(f, "{} {} {}", self.date, self.amount, note),
            _ => write!(f, "{} {}", self.date, self.amount),
        }
    }
}

/// Input for creating an entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub category_id: Option<CategoryId>,
    pub amount: Amount,
    pub date: EntryDate,
    pub note: Option<String>,
}

impl NewEntry {
    pub fn new(category_id: CategoryId, amount: Amount, date: impl Into<EntryDate>) -> Self {
        Self {
            category_id: Some(category_id),
            amount,
            date: date.into(),
            note: None,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Build the entry record, assigning id and timestamps
    pub fn into_entry(self) -> Entry {
        let mut entry = Entry::new(self.category_id, self.amount, self.date);
        entry.note = self.note;
        entry
    }
}

/// Partial update for an entry; `id` and `created_at` are not updatable
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    /// `Some(None)` detaches the entry from its category
    pub category_id: Option<Option<CategoryId>>,
    pub amount: Option<Amount>,
    pub date: Option<EntryDate>,
    /// `Some(None)` clears the note
    pub note: Option<Option<String>>,
}

impl EntryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(Some(category_id));
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: impl Into<EntryDate>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = Some(note);
        self
    }

    /// Check if the update carries no changes
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.note.is_none()
    }
}
