//! Entry CLI commands
//!
//! Implements CLI commands for recording and browsing entries.

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_day, print_json};
use crate::display::entry::{format_entry_details, format_entry_list, CategoryIndex};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{EntryDate, EntryUpdate};
use crate::services::{CategoryService, EntryService};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "500" or "12.50")
        amount: String,
        /// Entry date (YYYY-MM-DD or RFC 3339), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List entries of a day (today by default) or a date range
    List {
        /// Day to list (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        date: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show entry details
    Show {
        /// Entry ID or unique prefix
        id: String,
    },

    /// Edit an entry
    Edit {
        /// Entry ID or unique prefix
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New note
        #[arg(short, long, conflicts_with = "clear_note")]
        note: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_note: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry ID or unique prefix
        id: String,
        /// Remove permanently instead of moving to the trash
        #[arg(long)]
        hard: bool,
    },
}

fn parse_entry_date(s: &str) -> SpendbookResult<EntryDate> {
    s.parse().map_err(|e| SpendbookError::Validation(format!("{}", e)))
}

/// Handle an entry command
pub fn handle_entry_command(storage: &Storage, cmd: EntryCommands) -> SpendbookResult<()> {
    let service = EntryService::new(storage);
    let categories = CategoryService::new(storage);
    let symbol = storage.settings.currency_symbol()?;

    match cmd {
        EntryCommands::Add {
            category,
            amount,
            date,
            note,
        } => {
            let category = categories.resolve(&category)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_entry_date(&d)?,
                None => EntryDate::Day(Local::now().date_naive()),
            };

            let entry = service.create(&category.id, amount, date, note)?;
            println!("Added entry: {}", entry.id);
            print!("{}", format_entry_details(&entry, Some(&category), &symbol));
        }

        EntryCommands::List {
            date,
            from,
            to,
            json,
        } => {
            let entries = match (from, to) {
                (Some(from), Some(to)) => service.list_range(parse_day(&from)?, parse_day(&to)?)?,
                _ => {
                    let day = match date {
                        Some(d) => parse_day(&d)?,
                        None => Local::now().date_naive(),
                    };
                    service.list_for_day(day)?
                }
            };

            if json {
                print_json(&entries)?;
            } else {
                let all = storage.categories.all()?;
                print!("{}", format_entry_list(&entries, &CategoryIndex::new(&all), &symbol));
            }
        }

        EntryCommands::Show { id } => {
            let entry = service.resolve(&id)?;
            let category = match &entry.category_id {
                Some(category_id) => storage.categories.get(category_id)?,
                None => None,
            };
            print!("{}", format_entry_details(&entry, category.as_ref(), &symbol));
        }

        EntryCommands::Edit {
            id,
            amount,
            category,
            date,
            note,
            clear_note,
        } => {
            let entry = service.resolve(&id)?;

            let mut update = EntryUpdate::new();
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                update = update.category(categories.resolve(&category)?.id);
            }
            if let Some(date) = date {
                update = update.date(parse_entry_date(&date)?);
            }
            if clear_note {
                update = update.note(None);
            } else if let Some(note) = note {
                update = update.note(Some(note));
            }

            if update.is_empty() {
                println!("No changes specified. Use --amount, --category, --date, --note or --clear-note.");
                return Ok(());
            }

            let updated = service.update(&entry.id, update)?;
            println!("Updated entry: {}", updated.id);
        }

        EntryCommands::Delete { id, hard } => {
            let entry = service.resolve(&id)?;
            storage.entries.remove_entry(&entry.id, !hard)?;
            if hard {
                println!("Deleted entry permanently: {}", entry.id);
            } else {
                println!("Moved entry to trash: {}", entry.id);
            }
        }
    }

    Ok(())
}
