//! HTTP layer: `PriceHttp`, the `PriceSource` seam, and retry policies.

pub mod client;
pub mod retry;

pub use client::PriceHttp;
pub use retry::{RetryConfig, RetryPolicy};

use crate::error::HttpError;
use async_trait::async_trait;

/// Anything that can produce the raw price payload (a JSON array of
/// `{currency, date, price}` objects).
///
/// `PriceHttp` is the production implementation. A single call is one
/// attempt; retries are layered on top by the caller.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self) -> Result<serde_json::Value, HttpError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String {
        "price source".to_string()
    }
}
