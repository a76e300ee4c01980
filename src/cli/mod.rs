//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod category;
pub mod entry;
pub mod settings;
pub mod summary;
pub mod trash;

pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use summary::{handle_summary_command, SummaryArgs};
pub use trash::{handle_trash_command, TrashCommands};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::Amount;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> SpendbookResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a `YYYY-MM-DD` day argument
pub(crate) fn parse_day(s: &str) -> SpendbookResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendbookError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an amount argument
pub(crate) fn parse_amount(s: &str) -> SpendbookResult<Amount> {
    Amount::parse(s).map_err(|e| SpendbookError::Validation(e.to_string()))
}
