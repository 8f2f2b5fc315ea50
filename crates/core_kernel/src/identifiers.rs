//! Strongly-typed ledger keys for domain entities
//!
//! Every entity is stored under its own identifier. Identifiers are opaque,
//! caller-supplied text; the newtypes keep a person id from being passed
//! where a policy number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_key {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from caller-supplied text
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as the raw ledger key
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Human-readable name of the identified entity
            pub fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(PersonId, "person");
define_key!(PolicyNum, "policy");
define_key!(ClaimId, "claim");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_key() {
        let id = PersonId::new("P1");
        assert_eq!(id.to_string(), "P1");
        assert_eq!(id.as_str(), "P1");
    }

    #[test]
    fn test_serializes_transparently() {
        let num = PolicyNum::from("POL1");
        assert_eq!(serde_json::to_string(&num).unwrap(), "\"POL1\"");

        let back: PolicyNum = serde_json::from_str("\"POL1\"").unwrap();
        assert_eq!(back, num);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PersonId::label(), "person");
        assert_eq!(PolicyNum::label(), "policy");
        assert_eq!(ClaimId::label(), "claim");
    }
}
