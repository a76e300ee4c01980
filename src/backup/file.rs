//! Backup files on disk
//!
//! Backups are pretty-printed JSON written atomically. Files created by
//! `backup export` without an explicit path are named
//! `backup-YYYYMMDD-HHMMSS.json` in the backup directory, which is what
//! [`list_backups`] looks for.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::document::BackupDocument;
use crate::error::{SpendbookError, SpendbookResult};
use crate::storage::file_io::{read_json_required, write_json_atomic};

const FILENAME_PREFIX: &str = "backup-";
const FILENAME_SUFFIX: &str = ".json";

/// A backup file found in the backup directory
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Time encoded in the filename
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Path for a new backup taken at `now`
pub fn default_backup_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "{}{}{}",
        FILENAME_PREFIX,
        now.format("%Y%m%d-%H%M%S"),
        FILENAME_SUFFIX
    ))
}

/// Write a backup document to `path`
pub fn write_backup(path: &Path, doc: &BackupDocument) -> SpendbookResult<()> {
    write_json_atomic(path, doc)
        .map_err(|e| SpendbookError::Export(format!("Failed to write backup file: {}", e)))?;

    tracing::info!(path = %path.display(), "wrote backup file");
    Ok(())
}

/// Read and parse a backup document
pub fn read_backup(path: &Path) -> SpendbookResult<BackupDocument> {
    read_json_required(path).map_err(|e| match e {
        SpendbookError::Json(msg) => SpendbookError::Import(msg),
        other => other,
    })
}

/// Backups in `dir`, newest first
pub fn list_backups(dir: &Path) -> SpendbookResult<Vec<BackupInfo>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)
        .map_err(|e| SpendbookError::Io(format!("Failed to read backup directory: {}", e)))?
    {
        let entry = entry
            .map_err(|e| SpendbookError::Io(format!("Failed to read directory entry: {}", e)))?;
        if let Some(info) = parse_backup_info(&entry.path()) {
            backups.push(info);
        }
    }

    backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(backups)
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(FILENAME_PREFIX)?
        .strip_suffix(FILENAME_SUFFIX)?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse the `YYYYMMDD-HHMMSS` part of a backup filename
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let (date_part, time_part) = stamp.split_once('-')?;
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
