//! Conversion: raw payload → PricePoint (TryFrom + validation).

use super::wire::PriceResponse;
use super::{PricePoint, ValidationError};
use chrono::{DateTime, Utc};
use serde_json::Value;

impl TryFrom<(usize, PriceResponse)> for PricePoint {
    type Error = ValidationError;

    fn try_from((index, source): (usize, PriceResponse)) -> Result<Self, Self::Error> {
        let currency = source
            .currency
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::MissingCurrency(index))?;

        let raw_date = source.date.ok_or(ValidationError::MissingDate(index))?;
        let date = DateTime::parse_from_rfc3339(raw_date.trim())
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| ValidationError::InvalidDate(index, raw_date.clone()))?;

        let price = source.price.ok_or(ValidationError::MissingPrice(index))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(index, price));
        }

        Ok(PricePoint {
            currency: currency.into(),
            date,
            price,
        })
    }
}

/// Validate the raw price payload.
///
/// The payload must be a JSON array. Entries that fail validation are
/// skipped with a warning; the survivors keep their input order.
pub fn parse_price_list(payload: Value) -> Result<Vec<PricePoint>, ValidationError> {
    let Value::Array(entries) = payload else {
        return Err(ValidationError::NotAnArray);
    };

    let mut points = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!("Skipping price entry: {}", ValidationError::NotAnObject(index));
            continue;
        }
        let raw: PriceResponse = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping price entry {}: {}", index, e);
                continue;
            }
        };
        match PricePoint::try_from((index, raw)) {
            Ok(point) => points.push(point),
            Err(err) => tracing::warn!("Skipping price entry: {}", err),
        }
    }

    Ok(points)
}
