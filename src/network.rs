//! Network URL constants.

/// Default price list endpoint.
pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";

/// Base URL for per-symbol token icons (`{base}/{symbol}.svg`).
pub const TOKEN_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens";

/// Fallback image shown when a token icon is missing.
pub const PLACEHOLDER_ICON_URL: &str = "https://via.placeholder.com/20";
