use anyhow::Result;
use clap::{Parser, Subcommand};

use spendbook::cli::{
    handle_backup_command, handle_category_command, handle_entry_command,
    handle_settings_command, handle_summary_command, handle_trash_command,
};
use spendbook::config::SpendbookPaths;
use spendbook::logging;
use spendbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendbook",
    version,
    about = "Local-first expense and income tracker",
    long_about = "Spendbook records income and expense entries against categories. \
                  Deleted items go to a trash and are removed for good once the \
                  retention period passes. All data can be exported to and \
                  imported from a single JSON backup file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(spendbook::cli::CategoryCommands),

    /// Entry management commands
    #[command(subcommand)]
    Entry(spendbook::cli::EntryCommands),

    /// Income, expense and balance totals
    Summary(spendbook::cli::SummaryArgs),

    /// Trash commands
    #[command(subcommand)]
    Trash(spendbook::cli::TrashCommands),

    /// Settings commands
    #[command(subcommand)]
    Settings(spendbook::cli::SettingsCommands),

    /// Backup export and import
    #[command(subcommand)]
    Backup(spendbook::cli::BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    let paths = SpendbookPaths::new()?;
    let storage = Storage::open(&paths)?;

    match cli.command {
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Entry(cmd)) => handle_entry_command(&storage, cmd)?,
        Some(Commands::Summary(args)) => handle_summary_command(&storage, args)?,
        Some(Commands::Trash(cmd)) => handle_trash_command(&storage, cmd)?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&storage, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, &paths, cmd)?,
        Some(Commands::Config) => {
            let settings = storage.settings.get()?;
            println!("Spendbook Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Images directory: {}", paths.images_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Trash retention: {} days", settings.trash_retention_days);
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
        None => {
            println!("Spendbook - local-first expense and income tracker");
            println!();
            println!("Run 'spendbook --help' for usage information.");
        }
    }

    Ok(())
}
