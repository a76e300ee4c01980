//! Settings CLI commands

use clap::Subcommand;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::print_json;
use crate::config::settings::{currency_by_code, CURRENCIES};
use crate::error::SpendbookResult;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Set how many days trashed items are kept
    Retention {
        /// Number of days, at least 1
        days: u32,
    },

    /// Set the currency symbol
    Currency {
        /// A symbol such as "$", or a preset code such as "USD"
        symbol: String,
    },

    /// List currency presets
    Currencies,
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Name")]
    label: &'static str,
}

/// Handle a settings command
pub fn handle_settings_command(storage: &Storage, cmd: SettingsCommands) -> SpendbookResult<()> {
    match cmd {
        SettingsCommands::Show { json } => {
            let settings = storage.settings.get()?;
            if json {
                print_json(&*settings)?;
            } else {
                println!("Settings");
                println!("========");
                println!("Trash retention: {} days", settings.trash_retention_days);
                println!("Currency symbol: {}", settings.currency_symbol);
            }
        }

        SettingsCommands::Retention { days } => {
            storage.settings.set_trash_retention_days(days)?;
            println!("Trash retention set to {} days.", days);
        }

        SettingsCommands::Currency { symbol } => {
            let symbol = match currency_by_code(&symbol) {
                Some(currency) => currency.symbol.to_string(),
                None => symbol,
            };
            storage.settings.set_currency_symbol(&symbol)?;
            println!("Currency symbol set to {}", storage.settings.currency_symbol()?);
        }

        SettingsCommands::Currencies => {
            let rows = CURRENCIES.iter().map(|c| CurrencyRow {
                code: c.code,
                symbol: c.symbol,
                label: c.label,
            });
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }

    Ok(())
}
