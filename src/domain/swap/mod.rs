//! Swap domain: form state and its reducer, quotes, the swap action,
//! debounced input.

#[cfg(feature = "http")]
pub mod controller;
pub mod debounce;
pub mod quote;

use crate::domain::price::PriceTable;
use crate::error::FormError;
use crate::shared::{CurrencySymbol, Status};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use debounce::Debouncer;
pub use quote::{quote, ConversionRequest, Quote};

// ─── SwapForm ────────────────────────────────────────────────────────────────

/// The swap form's state. Treated as an immutable value: edits go through
/// [`SwapForm::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapForm {
    pub from_currency: CurrencySymbol,
    pub to_currency: CurrencySymbol,
    pub from_amount: String,
    pub to_amount: String,
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FormEdit {
    FromAmount(String),
    FromCurrency(CurrencySymbol),
    ToCurrency(CurrencySymbol),
    /// The "To" field is read-only; whatever lands here is overwritten by
    /// the next recomputation.
    ToAmount(String),
}

impl SwapForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one edit, returning the next state.
    pub fn reduce(self, edit: FormEdit) -> Self {
        match edit {
            FormEdit::FromAmount(from_amount) => Self { from_amount, ..self },
            FormEdit::FromCurrency(from_currency) => Self { from_currency, ..self },
            FormEdit::ToCurrency(to_currency) => Self { to_currency, ..self },
            FormEdit::ToAmount(to_amount) => Self { to_amount, ..self },
        }
    }

    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            source_currency: self.from_currency.clone(),
            target_currency: self.to_currency.clone(),
            source_amount: self.from_amount.clone(),
        }
    }

    /// Recompute `to_amount` from the current inputs. Clears it when no
    /// quote is available.
    pub fn recompute(self, table: &PriceTable) -> (Self, Option<Quote>) {
        let quote = quote::quote(table, &self.request());
        let to_amount = quote.as_ref().map(Quote::display).unwrap_or_default();
        (Self { to_amount, ..self }, quote)
    }

    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.from_amount.trim().is_empty() {
            missing.push("from_amount");
        }
        if self.from_currency.is_empty() {
            missing.push("from_currency");
        }
        if self.to_currency.is_empty() {
            missing.push("to_currency");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::Incomplete(missing))
        }
    }
}

// ─── Swap action ─────────────────────────────────────────────────────────────

/// Acknowledge a swap. No funds move and no state changes; this only checks
/// the form and produces the message to show.
pub fn submit(form: &SwapForm) -> Result<Notification, FormError> {
    form.validate()?;
    tracing::info!(
        from = %form.from_currency,
        to = %form.to_currency,
        amount = %form.from_amount,
        "Swap acknowledged"
    );
    Ok(Notification::success("Swap executed successfully!"))
}

// ─── Notification ────────────────────────────────────────────────────────────

/// Default time a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// A transient, dismissible message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub duration: Duration,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: Status::Success.to_string(),
            description: description.into(),
            status: Status::Success,
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: Status::Error.to_string(),
            description: description.into(),
            status: Status::Error,
            duration: NOTIFICATION_DURATION,
        }
    }

    /// The toast shown when prices cannot be loaded.
    pub fn fetch_failed() -> Self {
        Self::error("Failed to fetch prices. Please try again.")
    }
}

impl From<&FormError> for Notification {
    fn from(err: &FormError) -> Self {
        match err {
            FormError::Incomplete(_) => Notification::error("Please fill in all fields"),
            FormError::Busy => Notification::error("Prices are still loading"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PricePoint;
    use chrono::Utc;

    fn complete() -> SwapForm {
        SwapForm::new()
            .reduce(FormEdit::FromAmount("10".into()))
            .reduce(FormEdit::FromCurrency("ETH".into()))
            .reduce(FormEdit::ToCurrency("USDC".into()))
    }

    #[test]
    fn test_reduce_touches_one_field() {
        let form = SwapForm::new().reduce(FormEdit::FromAmount("5".into()));
        assert_eq!(form.from_amount, "5");
        assert!(form.from_currency.is_empty());

        let form = form.reduce(FormEdit::ToCurrency("ATOM".into()));
        assert_eq!(form.from_amount, "5");
        assert_eq!(form.to_currency.as_str(), "ATOM");
    }

    #[test]
    fn test_recompute_fills_and_clears_to_amount() {
        let table: PriceTable = [("ETH", 2.0), ("USDC", 1.0)]
            .iter()
            .map(|(c, p)| PricePoint {
                currency: (*c).into(),
                date: Utc::now(),
                price: *p,
            })
            .collect();

        let (form, quote) = complete().recompute(&table);
        assert_eq!(form.to_amount, "20.000000");
        assert!(quote.is_some());

        let (form, quote) = form.reduce(FormEdit::FromAmount(String::new())).recompute(&table);
        assert_eq!(form.to_amount, "");
        assert!(quote.is_none());
    }

    #[test]
    fn test_submit_incomplete_form() {
        let form = SwapForm::new().reduce(FormEdit::FromAmount("10".into()));
        let err = submit(&form).unwrap_err();
        assert_eq!(err, FormError::Incomplete(vec!["from_currency", "to_currency"]));
        let toast = Notification::from(&err);
        assert_eq!(toast.status, Status::Error);
        assert_eq!(toast.description, "Please fill in all fields");
    }

    #[test]
    fn test_submit_complete_form() {
        let toast = submit(&complete()).unwrap();
        assert_eq!(toast.status, Status::Success);
        assert_eq!(toast.title, "Success");
        assert_eq!(toast.description, "Swap executed successfully!");
        assert_eq!(toast.duration, Duration::from_secs(3));
    }

    #[test]
    fn test_whitespace_amount_counts_as_missing() {
        let form = complete().reduce(FormEdit::FromAmount("  ".into()));
        assert_eq!(form.missing_fields(), ["from_amount"]);
    }

    #[test]
    fn test_form_edit_serde() {
        let edit: FormEdit = serde_json::from_str(r#"{"field":"from_currency","value":"ETH"}"#).unwrap();
        assert_eq!(edit, FormEdit::FromCurrency("ETH".into()));
    }
}
