//! Core data models for Spendbook
//!
//! This module contains the records the stores hold: categories, entries,
//! and the value types they are built from.

pub mod amount;
pub mod category;
pub mod entry;
pub mod entry_date;
pub mod ids;

pub use amount::Amount;
pub use category::{Category, CategoryIcon, CategoryKind, IconGlyph, NewCategory};
pub use entry::{Entry, EntryUpdate, NewEntry};
pub use entry_date::{EntryDate, TimeForm};
pub use ids::{new_id, CategoryId, EntryId};

use chrono::{DateTime, Utc};

/// Records that move to the trash before being removed for good
pub trait SoftDelete {
    /// When the record was trashed, if it is in the trash
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Check if the record is in the trash
    fn is_trashed(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Check if the record is active
    fn is_active(&self) -> bool {
        !self.is_trashed()
    }
}
