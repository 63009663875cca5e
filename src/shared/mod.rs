//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the price endpoint sends, so they can be used directly in wire
//! types without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CurrencySymbol ──────────────────────────────────────────────────────────

/// Newtype for token symbols (e.g. `"ETH"`, `"USDC"`).
///
/// Symbols are compared exactly as received; no case folding is applied.
/// The empty symbol means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencySymbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CurrencySymbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CurrencySymbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CurrencySymbol(s.to_string()))
    }
}

impl AsRef<str> for CurrencySymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CurrencySymbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencySymbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CurrencySymbol(s))
    }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "Success"),
            Status::Error => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_symbol_serde() {
        let sym = CurrencySymbol::from("ETH");
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"ETH\"");
        let back: CurrencySymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(sym, back);
    }

    #[test]
    fn test_currency_symbol_default_is_unset() {
        assert!(CurrencySymbol::default().is_empty());
        assert!(!CurrencySymbol::new("USDC").is_empty());
    }

    #[test]
    fn test_currency_symbol_is_case_sensitive() {
        assert_ne!(CurrencySymbol::from("eth"), CurrencySymbol::from("ETH"));
    }

    #[test]
    fn test_status_serde() {
        let s: Status = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(s, Status::Error);
        assert_eq!(Status::Success.to_string(), "Success");
    }
}
