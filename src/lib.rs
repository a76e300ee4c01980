//! Spendbook - local-first expense and income tracker
//!
//! This library provides the store behind Spendbook: categories and entries
//! with soft delete, a trash with a retention-based purge, user settings,
//! and JSON backups that can be exported and imported wholesale.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (categories, entries, amounts, dates)
//! - `storage`: Copy-on-write stores over a key/value persistence adapter
//! - `services`: Business logic layer (cascades, summaries, trash)
//! - `backup`: Backup document format, export and import
//! - `cli`: Command handlers for the `spendbook` binary
//! - `display`: Table and text formatting
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::config::SpendbookPaths;
//! use spendbook::storage::Storage;
//!
//! let paths = SpendbookPaths::new()?;
//! let storage = Storage::open(&paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SpendbookError, SpendbookResult};
