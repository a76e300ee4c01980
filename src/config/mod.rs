//! Configuration module for Spendbook
//!
//! This module provides:
//! - Data directory resolution
//! - The settings record shared by the stores and front ends

pub mod paths;
pub mod settings;

pub use paths::SpendbookPaths;
pub use settings::Settings;
