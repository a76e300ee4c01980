//! Backup document format
//!
//! ```json
//! {
//!   "categories": [ ... ],
//!   "entries": [ ... ],
//!   "settings": { "trashRetentionDays": 30, "currencySymbol": "₹" },
//!   "exportedAt": "2025-06-01T10:00:00.000Z"
//! }
//! ```
//!
//! `settings` is optional so documents written before it existed still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{Category, Entry, SoftDelete};

/// Point-in-time copy of every store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// All categories, trashed ones included
    pub categories: Vec<Category>,

    /// All entries, trashed ones included
    pub entries: Vec<Entry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BackupSettings>,

    pub exported_at: DateTime<Utc>,
}

/// Settings section of a backup; each field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_retention_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
}

impl From<&Settings> for BackupSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            trash_retention_days: Some(settings.trash_retention_days),
            currency_symbol: Some(settings.currency_symbol.clone()),
        }
    }
}

impl BackupSettings {
    /// Overlay the fields present here onto `current`
    pub fn apply_to(&self, current: &Settings) -> Settings {
        let mut next = current.clone();
        if let Some(days) = self.trash_retention_days {
            next.trash_retention_days = days;
        }
        if let Some(symbol) = &self.currency_symbol {
            next.currency_symbol = symbol.trim().to_string();
        }
        next
    }
}

impl BackupDocument {
    /// One-line description of what the document holds
    pub fn summary(&self) -> String {
        let trashed_categories = self.categories.iter().filter(|c| c.is_trashed()).count();
        let trashed_entries = self.entries.iter().filter(|e| e.is_trashed()).count();
        let settings = if self.settings.is_some() {
            "with settings"
        } else {
            "without settings"
        };

        format!(
            "{} categories ({} trashed), {} entries ({} trashed), {}, exported {}",
            self.categories.len(),
            trashed_categories,
            self.entries.len(),
            trashed_entries,
            settings,
            self.exported_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}
