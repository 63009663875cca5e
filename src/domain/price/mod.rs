//! Price domain: price points, the deduplicated price table, the TTL cache.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod table;
pub mod wire;

use crate::shared::CurrencySymbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use convert::parse_price_list;
pub use state::{CacheLookup, PriceCache};
pub use table::PriceTable;

// ─── PricePoint ──────────────────────────────────────────────────────────────

/// A single currency's quoted price at a point in time.
///
/// Only produced by validation: the symbol is non-empty and the price is
/// finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub currency: CurrencySymbol,
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    /// Whether this price can be used as a conversion leg.
    pub fn is_quotable(&self) -> bool {
        self.price > 0.0
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NotAnArray,
    NotAnObject(usize),
    MissingCurrency(usize),
    MissingDate(usize),
    InvalidDate(usize, String),
    MissingPrice(usize),
    InvalidPrice(usize, f64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnArray => write!(f, "Price payload is not a JSON array"),
            ValidationError::NotAnObject(i) => write!(f, "Entry {i}: not an object"),
            ValidationError::MissingCurrency(i) => write!(f, "Entry {i}: missing currency"),
            ValidationError::MissingDate(i) => write!(f, "Entry {i}: missing date"),
            ValidationError::InvalidDate(i, raw) => write!(f, "Entry {i}: invalid date {raw:?}"),
            ValidationError::MissingPrice(i) => write!(f, "Entry {i}: missing or non-numeric price"),
            ValidationError::InvalidPrice(i, p) => write!(f, "Entry {i}: invalid price {p}"),
        }
    }
}

impl std::error::Error for ValidationError {}
