//! User settings for Spendbook
//!
//! Holds the trash retention period used by the purge policy and the
//! currency symbol front ends display amounts with.

use serde::{Deserialize, Serialize};

use crate::error::SpendbookError;

/// Default number of days a trashed record is kept
pub const DEFAULT_TRASH_RETENTION_DAYS: u32 = 30;

/// Default currency symbol
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// A currency preset offered to front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub label: &'static str,
    pub locale: &'static str,
}

/// Supported currency presets
pub const CURRENCIES: &[Currency] = &[
    Currency {
        code: "INR",
        symbol: "₹",
        label: "Indian Rupee",
        locale: "en-IN",
    },
    Currency {
        code: "USD",
        symbol: "$",
        label: "US Dollar",
        locale: "en-US",
    },
    Currency {
        code: "EUR",
        symbol: "€",
        label: "Euro",
        locale: "de-DE",
    },
    Currency {
        code: "GBP",
        symbol: "£",
        label: "British Pound",
        locale: "en-GB",
    },
    Currency {
        code: "JPY",
        symbol: "¥",
        label: "Japanese Yen",
        locale: "ja-JP",
    },
];

/// Look up a preset by ISO code (case-insensitive)
pub fn currency_by_code(code: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

/// User settings for Spendbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Days a trashed record survives before the purge policy removes it
    #[serde(default = "default_trash_retention_days")]
    pub trash_retention_days: u32,

    /// Symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_trash_retention_days() -> u32 {
    DEFAULT_TRASH_RETENTION_DAYS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trash_retention_days: default_trash_retention_days(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Validate a retention period
    pub fn validate_retention_days(days: u32) -> Result<(), SpendbookError> {
        if days == 0 {
            return Err(SpendbookError::Validation(
                "Trash retention must be at least 1 day".into(),
            ));
        }
        Ok(())
    }

    /// Validate a currency symbol
    pub fn validate_currency_symbol(symbol: &str) -> Result<(), SpendbookError> {
        if symbol.trim().is_empty() {
            return Err(SpendbookError::Validation(
                "Currency symbol cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Validate all fields
    pub fn validate(&self) -> Result<(), SpendbookError> {
        Self::validate_retention_days(self.trash_retention_days)?;
        Self::validate_currency_symbol(&self.currency_symbol)
    }
}
