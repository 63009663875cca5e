//! # currency-swap
//!
//! Token price fetching, caching, and swap quotes with debounced form input.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Symbols, price table, conversion calculator, form reducer,
//!    swap action, token options (always available, no I/O)
//! 2. **HTTP**: `PriceHttp` behind the `PriceSource` trait, with retry policies
//! 3. **High-Level Client**: `SwapClient` with sub-clients and a TTL price cache
//! 4. **Controller**: `SwapController` turns debounced edits → recomputed form → notifications
//!
//! The `series` module holds the unrelated triangular-sum functions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use currency_swap::prelude::*;
//!
//! let client = SwapClient::builder().build()?;
//! let table = client.prices().get().await?;
//!
//! let request = ConversionRequest::new("ETH", "USDC", "1.5");
//! if let Some(q) = quote(&table, &request) {
//!     println!("{}", q.display());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Triangular numbers, three ways.
pub mod series;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Price source seam, HTTP client, retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `SwapClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CurrencySymbol, Status};

    // Domain types: price
    pub use crate::domain::price::{CacheLookup, PriceCache, PricePoint, PriceTable};

    // Domain types: swap
    pub use crate::domain::swap::{
        quote, submit, ConversionRequest, Debouncer, FormEdit, Notification, Quote, SwapForm,
    };

    // Domain types: token options
    pub use crate::domain::token::TokenOption;

    // Triangular sums
    pub use crate::series::{sum_to_n_formula, sum_to_n_iterative, sum_to_n_recursive};

    // Errors
    pub use crate::error::{FormError, HttpError, SdkError, SumError};

    // Network
    pub use crate::network::{DEFAULT_PRICES_URL, PLACEHOLDER_ICON_URL, TOKEN_ICON_BASE_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{PricesClient, SwapClient, SwapClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::domain::swap::controller::{FetchStatus, SwapController};
    #[cfg(feature = "http")]
    pub use crate::http::{PriceHttp, PriceSource, RetryConfig, RetryPolicy};
}
