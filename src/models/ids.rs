//! Identifier generation and strongly-typed ID wrappers
//!
//! New identifiers are random UUID v4 values rendered as 32 lowercase hex
//! characters. Identifiers read back from storage or from a backup are opaque
//! strings and are kept verbatim, so documents written by other versions of
//! the app (which may use other id schemes) still round-trip.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a new collision-resistant identifier
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Error returned when parsing an empty identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyIdError;

impl fmt::Display for EmptyIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier cannot be empty")
    }
}

impl std::error::Error for EmptyIdError {}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(new_id())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First eight characters, for compact display
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, EmptyIdError> {
                s.parse()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = EmptyIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(EmptyIdError);
                }
                Ok(Self(s.to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(EntryId);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_format() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_id_display_and_short() {
        let id = CategoryId::new();
        assert_eq!(id.to_string().len(), 32);
        assert_eq!(id.short().len(), 8);
        assert!(id.as_str().starts_with(id.short()));

        let foreign: EntryId = "V1StGXR8".parse().unwrap();
        assert_eq!(foreign.short(), "V1StGXR8");
        let tiny: EntryId = "abc".parse().unwrap();
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn test_foreign_ids_kept_verbatim() {
        let json = r#""V1StGXR8_Z5jdHi6B-myT""#;
        let id: EntryId = serde_json::from_str(json).unwrap();
        assert_eq!(id.as_str(), "V1StGXR8_Z5jdHi6B-myT");
        assert_eq!(serde_json::to_string(&id).unwrap(), json);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(CategoryId::parse("   "), Err(EmptyIdError));
        assert_eq!(CategoryId::parse(" c1 ").unwrap().as_str(), "c1");
    }
}
