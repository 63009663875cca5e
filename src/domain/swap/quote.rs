//! Conversion calculator.
//!
//! `amount × price(source) / price(target)`, rounded to six fractional
//! digits. Anything that cannot be computed yet (empty amount, unset or
//! unknown currency, zero price) is `None`, never an error: it is the
//! normal state while a user is still typing.

use crate::domain::price::PriceTable;
use crate::shared::fmt::num;
use crate::shared::CurrencySymbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fractional digits in a quoted amount.
pub const QUOTE_DECIMALS: usize = 6;

/// One conversion to compute. Built per form edit, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source_currency: CurrencySymbol,
    pub target_currency: CurrencySymbol,
    pub source_amount: String,
}

impl ConversionRequest {
    pub fn new(
        source_currency: impl Into<CurrencySymbol>,
        target_currency: impl Into<CurrencySymbol>,
        source_amount: impl Into<String>,
    ) -> Self {
        Self {
            source_currency: source_currency.into(),
            target_currency: target_currency.into(),
            source_amount: source_amount.into(),
        }
    }

    /// The same request pointed the other way, with `amount` as input.
    pub fn reversed(&self, amount: impl Into<String>) -> Self {
        Self {
            source_currency: self.target_currency.clone(),
            target_currency: self.source_currency.clone(),
            source_amount: amount.into(),
        }
    }
}

/// A computed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// `price(source) / price(target)`, unrounded.
    pub rate: f64,
    /// Target amount with scale `QUOTE_DECIMALS`.
    pub amount: Decimal,
}

impl Quote {
    /// Fixed six-digit rendering, e.g. `"83.333333"`.
    pub fn display(&self) -> String {
        self.amount.to_string()
    }

    /// Trimmed rendering with thousands separators, e.g. `"1,234.5"`.
    pub fn display_grouped(&self) -> String {
        num::display_grouped(&self.display())
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}

/// Parse a user-typed amount. Empty, non-numeric, negative and non-finite
/// inputs are rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = trimmed.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Strictly positive price for `currency`, if it is set and known.
fn positive_price(table: &PriceTable, currency: &CurrencySymbol) -> Option<f64> {
    if currency.is_empty() {
        return None;
    }
    table.price_of(currency).filter(|p| *p > 0.0)
}

/// Compute the target amount for `request` against `table`.
pub fn quote(table: &PriceTable, request: &ConversionRequest) -> Option<Quote> {
    let amount = parse_amount(&request.source_amount)?;
    let source_price = positive_price(table, &request.source_currency)?;
    let target_price = positive_price(table, &request.target_currency)?;

    let rate = source_price / target_price;
    let fixed = num::to_fixed(amount * rate, QUOTE_DECIMALS)?;
    let amount = Decimal::from_str(&fixed).ok()?;
    // Past 28 significant digits the parse silently drops fractional digits.
    if amount.scale() != QUOTE_DECIMALS as u32 {
        return None;
    }

    Some(Quote { rate, amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;
    use chrono::Utc;

    fn table(entries: &[(&str, f64)]) -> PriceTable {
        entries
            .iter()
            .map(|(c, p)| PricePoint {
                currency: (*c).into(),
                date: Utc::now(),
                price: *p,
            })
            .collect()
    }

    #[test]
    fn test_basic_conversion() {
        let t = table(&[("A", 2.5), ("B", 0.3)]);
        let q = quote(&t, &ConversionRequest::new("A", "B", "10")).unwrap();
        assert_eq!(q.display(), "83.333333");
        assert_eq!(q.amount.scale(), 6);
    }

    #[test]
    fn test_amount_too_large_for_six_digits_has_no_quote() {
        let t = table(&[("A", 1.0), ("B", 1.0)]);
        assert!(quote(&t, &ConversionRequest::new("A", "B", "1e23")).is_none());
        assert!(quote(&t, &ConversionRequest::new("A", "B", "123456789012345678901234")).is_none());

        let q = quote(&t, &ConversionRequest::new("A", "B", "1e15")).unwrap();
        assert_eq!(q.display(), "1000000000000000.000000");
    }

    #[test]
    fn test_same_currency_is_identity() {
        let t = table(&[("ETH", 1645.93)]);
        let q = quote(&t, &ConversionRequest::new("ETH", "ETH", "1.5")).unwrap();
        assert_eq!(q.display(), "1.500000");
        assert_eq!(q.rate, 1.0);
    }

    #[test]
    fn test_round_trip_returns_original_amount() {
        let t = table(&[("ETH", 1645.9337373737374), ("ATOM", 7.186267647058823)]);
        for amount in ["1", "0.25", "12.5", "1000"] {
            let there = quote(&t, &ConversionRequest::new("ETH", "ATOM", amount)).unwrap();
            let back = quote(
                &t,
                &ConversionRequest::new("ETH", "ATOM", amount).reversed(there.display()),
            )
            .unwrap();
            let original: f64 = amount.parse().unwrap();
            let returned: f64 = back.display().parse().unwrap();
            assert!(
                (original - returned).abs() < 1e-5,
                "{amount} came back as {returned}"
            );
        }
    }

    #[test]
    fn test_zero_price_gives_no_result() {
        let t = table(&[("A", 2.0), ("B", 0.0)]);
        assert!(quote(&t, &ConversionRequest::new("A", "B", "10")).is_none());
        assert!(quote(&t, &ConversionRequest::new("B", "A", "10")).is_none());
    }

    #[test]
    fn test_incomplete_requests_give_no_result() {
        let t = table(&[("A", 2.0), ("B", 4.0)]);
        assert!(quote(&t, &ConversionRequest::new("A", "B", "")).is_none());
        assert!(quote(&t, &ConversionRequest::new("A", "", "10")).is_none());
        assert!(quote(&t, &ConversionRequest::new("", "B", "10")).is_none());
        assert!(quote(&t, &ConversionRequest::new("A", "Z", "10")).is_none());
        assert!(quote(&t, &ConversionRequest::new("A", "B", "ten")).is_none());
        assert!(quote(&t, &ConversionRequest::new("A", "B", "-1")).is_none());
        assert!(quote(&PriceTable::new(), &ConversionRequest::new("A", "B", "10")).is_none());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("1,000"), None);
    }

    #[test]
    fn test_display_grouped() {
        let t = table(&[("A", 1.0), ("B", 1.0)]);
        let q = quote(&t, &ConversionRequest::new("A", "B", "1234.5")).unwrap();
        assert_eq!(q.display(), "1234.500000");
        assert_eq!(q.display_grouped(), "1,234.5");
    }
}
