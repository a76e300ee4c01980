//! Backup and restore for Spendbook
//!
//! - `document`: the JSON backup format
//! - `codec`: export from and import into a [`Storage`](crate::storage::Storage)
//! - `file`: reading, writing and listing backup files
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::backup::{export_data, import_data, read_backup, write_backup};
//!
//! let doc = export_data(&storage)?;
//! write_backup(&path, &doc)?;
//!
//! // Later, on another device
//! let summary = import_data(&storage, read_backup(&path)?)?;
//! println!("{}", summary.summary());
//! ```

pub mod codec;
pub mod document;
pub mod file;

pub use codec::{export_data, export_data_at, import_data, ImportSummary};
pub use document::{BackupDocument, BackupSettings};
pub use file::{default_backup_path, list_backups, read_backup, write_backup, BackupInfo};
