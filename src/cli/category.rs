//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::{Subcommand, ValueEnum};

use super::print_json;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::CategoryKind;
use crate::services::{CategoryService, DeleteMode, EntryCascade};
use crate::storage::Storage;

/// What to do with a deleted category's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CascadeArg {
    /// Leave entries alone (a permanent delete still detaches them)
    Keep,
    /// Keep entries but clear their category
    Detach,
    /// Move entries to the trash
    Trash,
}

impl From<CascadeArg> for EntryCascade {
    fn from(arg: CascadeArg) -> Self {
        match arg {
            CascadeArg::Keep => EntryCascade::Untouched,
            CascadeArg::Detach => EntryCascade::Detach,
            CascadeArg::Trash => EntryCascade::Trash,
        }
    }
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Include trashed categories
        #[arg(short, long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: CategoryKind,
        /// Display color (e.g. "#FF6B6B")
        #[arg(short, long)]
        color: Option<String>,
        /// Symbolic icon name
        #[arg(short, long)]
        icon: Option<String>,
        /// Path to a custom icon image
        #[arg(long)]
        image: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Remove permanently instead of moving to the trash
        #[arg(long)]
        hard: bool,
        /// What happens to the category's entries
        #[arg(long, value_enum, default_value_t = CascadeArg::Keep)]
        entries: CascadeArg,
    },

    /// Restore a trashed category
    Restore {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SpendbookResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { all, json } => {
            let categories = service.list(all)?;
            if json {
                print_json(&categories)?;
            } else {
                print!("{}", format_category_list(&categories));
            }
        }

        CategoryCommands::Add {
            name,
            kind,
            color,
            icon,
            image,
        } => {
            let category = service.create(&name, kind, color, icon, image)?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = service.resolve(&category)?;
            let entry_count = storage
                .entries
                .all()?
                .iter()
                .filter(|e| e.belongs_to(&cat.id))
                .count();
            print!("{}", format_category_details(&cat, entry_count));
        }

        CategoryCommands::Delete {
            category,
            hard,
            entries,
        } => {
            let cat = service.resolve(&category)?;
            let mode = if hard { DeleteMode::Hard } else { DeleteMode::Soft };

            let deletion = service.delete(&cat.id, mode, entries.into())?;
            if hard {
                println!("Deleted category permanently: {}", deletion.category.name);
            } else {
                println!("Moved category to trash: {}", deletion.category.name);
            }
            if deletion.entries_affected > 0 {
                println!("  Entries updated: {}", deletion.entries_affected);
            }
        }

        CategoryCommands::Restore { category } => {
            let cat = service
                .find_trashed(&category)?
                .ok_or_else(|| SpendbookError::category_not_found(category.as_str()))?;
            let restored = service.restore(&cat.id)?;
            println!("Restored category: {}", restored.name);
        }
    }

    Ok(())
}
