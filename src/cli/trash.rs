//! Trash CLI commands

use clap::Subcommand;

use crate::display::entry::CategoryIndex;
use crate::display::summary::format_trash;
use crate::error::{SpendbookError, SpendbookResult};
use crate::services::{CategoryService, EntryService, TrashService};
use crate::storage::Storage;

/// Trash subcommands
#[derive(Subcommand)]
pub enum TrashCommands {
    /// Show what is in the trash
    List,

    /// Restore a trashed entry
    #[command(name = "restore-entry")]
    RestoreEntry {
        /// Entry ID or unique prefix
        id: String,
    },

    /// Restore a trashed category
    #[command(name = "restore-category")]
    RestoreCategory {
        /// Category name or ID
        category: String,
    },

    /// Permanently remove trash older than the retention period
    Purge,

    /// Permanently remove everything in the trash
    Empty {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a trash command
pub fn handle_trash_command(storage: &Storage, cmd: TrashCommands) -> SpendbookResult<()> {
    let trash = TrashService::new(storage);

    match cmd {
        TrashCommands::List => {
            let contents = trash.contents()?;
            let categories = storage.categories.all()?;
            let settings = storage.settings.get()?;
            print!(
                "{}",
                format_trash(
                    &contents,
                    &CategoryIndex::new(&categories),
                    settings.trash_retention_days,
                    &settings.currency_symbol
                )
            );
        }

        TrashCommands::RestoreEntry { id } => {
            let entry = EntryService::new(storage).resolve(&id)?;
            let restored = trash.restore_entry(&entry.id)?;
            println!("Restored entry: {}", restored.id);
        }

        TrashCommands::RestoreCategory { category } => {
            let category = CategoryService::new(storage)
                .find_trashed(&category)?
                .ok_or_else(|| SpendbookError::category_not_found(category.as_str()))?;
            let restored = trash.restore_category(&category.id)?;
            println!("Restored category: {}", restored.name);
        }

        TrashCommands::Purge => {
            let summary = trash.purge_expired()?;
            println!(
                "Purged {} expired categories and {} expired entries.",
                summary.categories, summary.entries
            );
        }

        TrashCommands::Empty { force } => {
            let contents = trash.contents()?;
            if contents.is_empty() {
                println!("Trash is already empty.");
                return Ok(());
            }

            if !force {
                println!(
                    "This will permanently remove {} categories and {} entries.",
                    contents.categories.len(),
                    contents.entries.len()
                );
                println!("To proceed, run again with --force flag:");
                println!("  spendbook trash empty --force");
                return Ok(());
            }

            let summary = trash.purge_all()?;
            println!("Removed {} items permanently.", summary.total());
        }
    }

    Ok(())
}
