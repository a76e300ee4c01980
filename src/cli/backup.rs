//! Backup CLI commands
//!
//! Implements CLI commands for exporting and importing backup files.

use chrono::Utc;
use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{
    default_backup_path, export_data, import_data, list_backups, read_backup, write_backup,
};
use crate::config::paths::SpendbookPaths;
use crate::error::{SpendbookError, SpendbookResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Export all data to a backup file
    #[command(alias = "create")]
    Export {
        /// Output file (defaults to a timestamped file in the backup directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with the contents of a backup file
    #[command(alias = "restore")]
    Import {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List backups in the backup directory
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path
        backup: String,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    paths: &SpendbookPaths,
    cmd: BackupCommands,
) -> SpendbookResult<()> {
    match cmd {
        BackupCommands::Export { output } => {
            let path = output.unwrap_or_else(|| default_backup_path(&paths.backup_dir(), Utc::now()));
            let doc = export_data(storage)?;
            write_backup(&path, &doc)?;
            println!("Backup written: {}", path.display());
            println!("{}", doc.summary());
        }

        BackupCommands::Import { backup, force } => {
            let backup_path = resolve_backup_path(paths, &backup)?;
            let doc = read_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!("Contents: {}", doc.summary());
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  spendbook backup import {} --force", backup);
                return Ok(());
            }

            println!("Creating backup of current data before import...");
            let safety_path = default_backup_path(&paths.backup_dir(), Utc::now());
            write_backup(&safety_path, &export_data(storage)?)?;
            println!("Pre-import backup saved: {}", safety_path.display());
            println!();

            let summary = import_data(storage, doc)?;
            println!("Import complete!");
            println!("{}", summary.summary());
        }

        BackupCommands::List { verbose } => {
            let backups = list_backups(&paths.backup_dir())?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: spendbook backup export");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = Utc::now().signed_duration_since(backup.created_at);
                let age_str = format_duration(age);

                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age_str,
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age_str,
                        format_size(backup.size_bytes),
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(paths, &backup)?;
            let doc = read_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            println!(
                "Exported: {}",
                doc.exported_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!();
            println!("Contents:");
            println!("  Categories: {}", doc.categories.len());
            println!("  Entries:    {}", doc.entries.len());
            match &doc.settings {
                Some(settings) => {
                    let days = settings
                        .trash_retention_days
                        .map(|d| format!("{} days", d))
                        .unwrap_or_else(|| "-".to_string());
                    let symbol = settings.currency_symbol.as_deref().unwrap_or("-");
                    println!("  Settings:   retention {}, currency {}", days, symbol);
                }
                None => println!("  Settings:   No"),
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(paths: &SpendbookPaths, backup: &str) -> SpendbookResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return list_backups(&paths.backup_dir())?
            .into_iter()
            .next()
            .map(|b| b.path)
            .ok_or_else(|| SpendbookError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let backup_path = paths.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    let with_ext = paths.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(SpendbookError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(5)), "5m");
        assert_eq!(format_duration(chrono::Duration::hours(3)), "3h");
        assert_eq!(format_duration(chrono::Duration::days(2)), "2d");
        assert_eq!(format_duration(chrono::Duration::days(65)), "2mo");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_resolve_backup_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        assert!(resolve_backup_path(&paths, "latest").unwrap_err().is_not_found());

        let file = paths.backup_dir().join("backup-20250601-120000.json");
        std::fs::write(&file, "{}").unwrap();

        assert_eq!(resolve_backup_path(&paths, "latest").unwrap(), file);
        assert_eq!(resolve_backup_path(&paths, "backup-20250601-120000").unwrap(), file);
        assert!(resolve_backup_path(&paths, "missing.json").unwrap_err().is_not_found());
    }
}
