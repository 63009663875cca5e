//! Low-level HTTP client: `PriceHttp`.
//!
//! One method per endpoint. Returns raw JSON (validation into domain types
//! happens at the client boundary). Internal to the SDK: `SwapClient` wraps this.

use crate::error::HttpError;
use crate::http::retry::{self, RetryPolicy};
use crate::http::PriceSource;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the price endpoint.
pub struct PriceHttp {
    prices_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl PriceHttp {
    pub fn new(prices_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2);

        Self {
            prices_url: prices_url.to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            retry: RetryPolicy::None,
        }
    }

    /// Retry policy applied inside `get_prices`.
    ///
    /// Defaults to `None`: `SwapClient` owns retries so that every
    /// `PriceSource` gets the same treatment.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn prices_url(&self) -> &str {
        &self.prices_url
    }

    // ── Prices ───────────────────────────────────────────────────────────

    /// GET the raw price list. No query parameters, no auth headers.
    pub async fn get_prices(&self) -> Result<serde_json::Value, HttpError> {
        let config = self.retry.config();
        retry::with_retry(&config, &self.prices_url, || self.get(&self.prices_url)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for PriceHttp {
    fn clone(&self) -> Self {
        Self {
            prices_url: self.prices_url.clone(),
            client: self.client.clone(),
            retry: self.retry.clone(),
        }
    }
}

#[async_trait]
impl PriceSource for PriceHttp {
    async fn fetch_prices(&self) -> Result<serde_json::Value, HttpError> {
        self.get_prices().await
    }

    fn describe(&self) -> String {
        self.prices_url.clone()
    }
}
