//! Prices sub-client: fetch with retry, TTL cache, stale fallback.

use crate::client::SwapClient;
use crate::domain::price::{parse_price_list, CacheLookup, PriceTable, ValidationError};
use crate::error::SdkError;
use crate::http::retry;
use std::time::Instant;

/// Sub-client for price operations.
pub struct Prices<'a> {
    pub(crate) client: &'a SwapClient,
}

impl<'a> Prices<'a> {
    /// Get the price table. Uses TTL cache.
    ///
    /// A fresh entry is served as-is. Otherwise the list is fetched again;
    /// if that fails the error is returned and the old entry stays in the
    /// cache (see [`Prices::cached`]).
    pub async fn get(&self) -> Result<PriceTable, SdkError> {
        {
            let cache = self.client.price_cache.read().await;
            if let CacheLookup::Fresh(table) = cache.lookup(Instant::now()) {
                tracing::debug!(symbols = table.len(), "Serving fresh price table from cache");
                return Ok(table.clone());
            }
        }

        self.refresh().await
    }

    /// Fetch the price list regardless of freshness and replace the cache on
    /// success.
    pub async fn refresh(&self) -> Result<PriceTable, SdkError> {
        match self.fetch().await {
            Ok(table) => {
                self.client
                    .price_cache
                    .write()
                    .await
                    .store(table.clone(), Instant::now());
                Ok(table)
            }
            Err(e) => {
                let mut cache = self.client.price_cache.write().await;
                cache.evict_expired(Instant::now());
                tracing::warn!(
                    cached = cache.fetched_at().is_some(),
                    "Price fetch failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Whatever table is still held, fresh or stale. Never fetches.
    pub async fn cached(&self) -> Option<PriceTable> {
        self.client
            .price_cache
            .read()
            .await
            .usable(Instant::now())
            .cloned()
    }

    /// True when the cached table is stale or gone.
    pub async fn needs_refresh(&self) -> bool {
        let cache = self.client.price_cache.read().await;
        !matches!(cache.lookup(Instant::now()), CacheLookup::Fresh(_))
    }

    /// Drop the cached table.
    pub async fn invalidate(&self) {
        self.client.price_cache.write().await.clear();
    }

    async fn fetch(&self) -> Result<PriceTable, SdkError> {
        let config = self.client.retry.config();
        let source = self.client.source.clone();
        let label = source.describe();
        let payload = retry::with_retry(&config, &label, || source.fetch_prices()).await?;
        let points = parse_price_list(payload)
            .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))?;
        let table = PriceTable::build(points);
        tracing::debug!(symbols = table.len(), "Fetched price table from {}", label);
        Ok(table)
    }
}
