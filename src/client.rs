//! High-level client: `SwapClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::price::client::Prices;
use crate::domain::price::state::{PriceCache, DEFAULT_EVICT_AFTER, DEFAULT_STALE_AFTER};
use crate::domain::token::TokenOption;
use crate::domain::price::PriceTable;
use crate::error::SdkError;
use crate::http::{PriceHttp, PriceSource, RetryPolicy};

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::price::client::Prices as PricesClient;

/// The primary entry point.
///
/// Clones share the price cache.
pub struct SwapClient {
    pub(crate) source: Arc<dyn PriceSource>,
    pub(crate) retry: RetryPolicy,
    /// Single-entry price table cache: (table, fetched_at)
    pub(crate) price_cache: Arc<RwLock<PriceCache>>,
    pub(crate) icon_base_url: String,
}

impl SwapClient {
    pub fn builder() -> SwapClientBuilder {
        SwapClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    /// Dropdown options for every symbol in `table`, using this client's
    /// icon base URL.
    pub fn token_options(&self, table: &PriceTable) -> Vec<TokenOption> {
        TokenOption::from_table(table, &self.icon_base_url)
    }

    pub fn icon_base_url(&self) -> &str {
        &self.icon_base_url
    }

    /// Clear all caches.
    pub async fn clear_all_caches(&self) {
        self.price_cache.write().await.clear();
    }
}

impl Clone for SwapClient {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            retry: self.retry.clone(),
            price_cache: self.price_cache.clone(),
            icon_base_url: self.icon_base_url.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SwapClientBuilder {
    prices_url: String,
    icon_base_url: String,
    stale_after: Duration,
    evict_after: Duration,
    retry: RetryPolicy,
    source: Option<Arc<dyn PriceSource>>,
}

impl Default for SwapClientBuilder {
    fn default() -> Self {
        Self {
            prices_url: crate::network::DEFAULT_PRICES_URL.to_string(),
            icon_base_url: crate::network::TOKEN_ICON_BASE_URL.to_string(),
            stale_after: DEFAULT_STALE_AFTER,
            evict_after: DEFAULT_EVICT_AFTER,
            retry: RetryPolicy::Idempotent,
            source: None,
        }
    }
}

impl SwapClientBuilder {
    pub fn prices_url(mut self, url: &str) -> Self {
        self.prices_url = url.to_string();
        self
    }

    pub fn icon_base_url(mut self, url: &str) -> Self {
        self.icon_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// How long a fetched table counts as fresh.
    pub fn stale_after(mut self, ttl: Duration) -> Self {
        self.stale_after = ttl;
        self
    }

    /// How long a fetched table is kept at all.
    pub fn evict_after(mut self, ttl: Duration) -> Self {
        self.evict_after = ttl;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Use a custom price source instead of HTTP. `prices_url` is ignored.
    pub fn source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn build(self) -> Result<SwapClient, SdkError> {
        if self.source.is_none() && !self.prices_url.starts_with("http") {
            return Err(SdkError::Other(format!(
                "Invalid prices URL: {}",
                self.prices_url
            )));
        }

        let source: Arc<dyn PriceSource> = match self.source {
            Some(source) => source,
            None => Arc::new(PriceHttp::new(&self.prices_url)),
        };

        Ok(SwapClient {
            source,
            retry: self.retry,
            price_cache: Arc::new(RwLock::new(PriceCache::new(
                self.stale_after,
                self.evict_after,
            ))),
            icon_base_url: self.icon_base_url,
        })
    }
}
