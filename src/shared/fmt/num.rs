//! Number formatting utilities for human-readable display.
//!
//! Quotes are rendered with a fixed number of fractional digits; grouping with
//! thousands separators is offered separately for presentation layers.

/// Format an f64 with exactly `decimals` fractional digits.
///
/// Non-finite input yields `None`.
pub fn to_fixed(value: f64, decimals: usize) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let formatted = format!("{:.1$}", value, decimals);
    // "-0.000000" carries no information for a quote
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        return Some(formatted[1..].to_string());
    }
    Some(formatted)
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_grouped(formatted: &str) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    };

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut parts = unsigned.splitn(2, '.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
