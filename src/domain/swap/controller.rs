//! `SwapController`, the event loop glue between the client, the form
//! reducer, the debouncer and the notifications a presentation layer shows.
//!
//! The presentation layer drives it:
//! 1. `load_prices().await` on mount (and whenever it wants to revalidate),
//!    or `begin_load()` followed later by `finish_load().await` to keep the
//!    controller usable while the fetch is in flight;
//! 2. `edit(..)` for every keystroke or dropdown change;
//! 3. `settle().await` to receive the recomputed form once input goes quiet;
//! 4. `submit()` when the user presses "Swap";
//! 5. `take_notifications()` to render toasts.

use super::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use super::{FormEdit, Notification, Quote, SwapForm};
use crate::client::SwapClient;
use crate::domain::token::TokenOption;
use crate::error::{FormError, SdkError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Where the price fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    Idle,
    /// Show a spinner and keep "Swap" disabled.
    Loading,
    Ready,
    /// Last fetch failed after retries; any older table is still used.
    Failed,
}

pub struct SwapController {
    client: SwapClient,
    committed: SwapForm,
    draft: SwapForm,
    debouncer: Debouncer<SwapForm>,
    status: FetchStatus,
    /// In-flight price fetch started by `begin_load`.
    loading: Option<JoinHandle<Result<(), SdkError>>>,
    last_quote: Option<Quote>,
    recomputations: u64,
    notifications: Vec<Notification>,
}

impl SwapController {
    pub fn new(client: SwapClient) -> Self {
        Self::with_debounce(client, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(client: SwapClient, delay: Duration) -> Self {
        Self {
            client,
            committed: SwapForm::default(),
            draft: SwapForm::default(),
            debouncer: Debouncer::new(delay),
            status: FetchStatus::Idle,
            loading: None,
            last_quote: None,
            recomputations: 0,
            notifications: Vec::new(),
        }
    }

    // ── Prices ───────────────────────────────────────────────────────────

    /// Load (or revalidate) the price table and wait for the outcome.
    ///
    /// On failure an error notification is queued and the status becomes
    /// `Failed`; a previously loaded table stays in use.
    pub async fn load_prices(&mut self) -> FetchStatus {
        self.begin_load();
        self.finish_load().await
    }

    /// Start a price fetch in the background and mark the controller
    /// `Loading`. No-op if a fetch is already in flight.
    ///
    /// Must be called inside a tokio runtime.
    pub fn begin_load(&mut self) {
        if self.loading.is_some() {
            return;
        }
        let client = self.client.clone();
        self.loading = Some(tokio::spawn(async move {
            client.prices().get().await.map(|_| ())
        }));
        self.status = FetchStatus::Loading;
    }

    /// Wait for the fetch started by `begin_load` and record its outcome.
    pub async fn finish_load(&mut self) -> FetchStatus {
        let Some(handle) = self.loading.take() else {
            return self.status;
        };
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SdkError::Other(format!("Price fetch task failed: {}", e))),
        };
        self.status = match result {
            Ok(()) => FetchStatus::Ready,
            Err(e) => {
                tracing::warn!("Could not load prices: {}", e);
                self.notifications.push(Notification::fetch_failed());
                FetchStatus::Failed
            }
        };
        self.status
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Options for both currency pickers.
    pub async fn token_options(&self) -> Vec<TokenOption> {
        match self.client.prices().cached().await {
            Some(table) => self.client.token_options(&table),
            None => Vec::new(),
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Record an edit. The draft updates immediately; recomputation waits
    /// for the debounce to fire.
    pub fn edit(&mut self, edit: FormEdit) {
        self.draft = self.draft.clone().reduce(edit);
        self.debouncer.push(self.draft.clone());
    }

    /// Wait for input to go quiet, then recompute and commit the form.
    pub async fn settle(&mut self) -> &SwapForm {
        if let Some(form) = self.debouncer.next().await {
            self.commit(form).await;
        }
        &self.committed
    }

    /// Commit without waiting, if a debounced value has already fired.
    pub async fn try_settle(&mut self) -> Option<&SwapForm> {
        let form = self.debouncer.try_next()?;
        self.commit(form).await;
        Some(&self.committed)
    }

    async fn commit(&mut self, form: SwapForm) {
        // An expired table is refetched before quoting; on failure whatever
        // is still cached is used.
        if self.loading.is_none() && self.client.prices().needs_refresh().await {
            self.load_prices().await;
        }
        let (form, quote) = match self.client.prices().cached().await {
            Some(table) => form.recompute(&table),
            None => (
                SwapForm {
                    to_amount: String::new(),
                    ..form
                },
                None,
            ),
        };
        self.recomputations += 1;
        if let Some(q) = &quote {
            tracing::debug!(
                from = %form.from_currency,
                to = %form.to_currency,
                amount = %q,
                "Quote updated"
            );
        }
        self.last_quote = quote;
        self.draft.to_amount = form.to_amount.clone();
        self.committed = form;
    }

    /// The last committed form.
    pub fn form(&self) -> &SwapForm {
        &self.committed
    }

    /// The form including edits that have not settled yet.
    pub fn draft(&self) -> &SwapForm {
        &self.draft
    }

    pub fn last_quote(&self) -> Option<&Quote> {
        self.last_quote.as_ref()
    }

    /// How many times the calculator has run.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    // ── Swap ─────────────────────────────────────────────────────────────

    pub fn can_submit(&self) -> bool {
        self.status != FetchStatus::Loading
    }

    /// Press "Swap". Queues and returns the resulting notification.
    pub fn submit(&mut self) -> Notification {
        let result = if self.can_submit() {
            super::submit(&self.committed)
        } else {
            Err(FormError::Busy)
        };
        let notification = match result {
            Ok(n) => n,
            Err(e) => Notification::from(&e),
        };
        self.notifications.push(notification.clone());
        notification
    }

    /// Drain queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Drop for SwapController {
    fn drop(&mut self) {
        if let Some(handle) = self.loading.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::http::{PriceSource, RetryPolicy};
    use crate::shared::Status;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;
    use tokio::time::sleep;

    struct Fixed(Option<Value>);

    #[async_trait]
    impl PriceSource for Fixed {
        async fn fetch_prices(&self) -> Result<Value, HttpError> {
            self.0.clone().ok_or(HttpError::ServerError {
                status: 502,
                body: String::new(),
            })
        }
    }

    /// Holds every fetch until the gate opens.
    struct Gated(Arc<Notify>);

    #[async_trait]
    impl PriceSource for Gated {
        async fn fetch_prices(&self) -> Result<Value, HttpError> {
            self.0.notified().await;
            Ok(prices())
        }
    }

    /// Serves prices for the first `serve` calls, then fails.
    struct Counting {
        serve: u32,
        calls: AtomicU32,
    }

    impl Counting {
        fn new(serve: u32) -> Arc<Self> {
            Arc::new(Self {
                serve,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for Counting {
        async fn fetch_prices(&self) -> Result<Value, HttpError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.serve {
                Ok(prices())
            } else {
                Err(HttpError::ServerError {
                    status: 503,
                    body: String::new(),
                })
            }
        }
    }

    /// Short cache windows measured in wall-clock time.
    fn expiring(source: Arc<Counting>) -> SwapController {
        let client = SwapClient::builder()
            .source(source)
            .retry_policy(RetryPolicy::None)
            .stale_after(Duration::from_millis(200))
            .evict_after(Duration::from_millis(400))
            .build()
            .unwrap();
        SwapController::new(client)
    }

    async fn quote_eth_to_usdc(c: &mut SwapController, amount: &str) -> String {
        c.edit(FormEdit::FromCurrency("ETH".into()));
        c.edit(FormEdit::ToCurrency("USDC".into()));
        c.edit(FormEdit::FromAmount(amount.into()));
        c.settle().await.to_amount.clone()
    }

    fn controller(payload: Option<Value>) -> SwapController {
        let client = SwapClient::builder()
            .source(Arc::new(Fixed(payload)))
            .retry_policy(RetryPolicy::None)
            .build()
            .unwrap();
        SwapController::new(client)
    }

    fn prices() -> Value {
        json!([
            {"currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 1600.0},
            {"currency": "USDC", "date": "2023-08-29T07:10:30.000Z", "price": 1.0},
            {"currency": "DEAD", "date": "2023-08-29T07:10:30.000Z", "price": 0}
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_recomputes_once_with_last_values() {
        let mut c = controller(Some(prices()));
        assert_eq!(c.load_prices().await, FetchStatus::Ready);

        c.edit(FormEdit::FromCurrency("ETH".into()));
        sleep(Duration::from_millis(50)).await;
        c.edit(FormEdit::ToCurrency("USDC".into()));
        sleep(Duration::from_millis(50)).await;
        c.edit(FormEdit::FromAmount("1".into()));
        sleep(Duration::from_millis(180)).await;
        c.edit(FormEdit::FromAmount("2".into()));
        assert_eq!(c.recomputations(), 0);

        let form = c.settle().await.clone();
        assert_eq!(form.from_amount, "2");
        assert_eq!(form.to_amount, "3200.000000");
        assert_eq!(c.recomputations(), 1);

        sleep(Duration::from_secs(1)).await;
        assert!(c.try_settle().await.is_none());
        assert_eq!(c.recomputations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_price_leaves_to_amount_empty() {
        let mut c = controller(Some(prices()));
        c.load_prices().await;
        c.edit(FormEdit::FromCurrency("ETH".into()));
        c.edit(FormEdit::ToCurrency("DEAD".into()));
        c.edit(FormEdit::FromAmount("10".into()));
        let form = c.settle().await;
        assert_eq!(form.to_amount, "");
        assert!(c.last_quote().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_notifies_and_allows_retry_later() {
        let mut c = controller(None);
        assert_eq!(c.load_prices().await, FetchStatus::Failed);
        assert!(c.can_submit());

        let toasts = c.take_notifications();
        assert_eq!(toasts, vec![Notification::fetch_failed()]);
        assert!(c.take_notifications().is_empty());
        assert!(c.token_options().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_uses_committed_form() {
        let mut c = controller(Some(prices()));
        c.load_prices().await;

        assert_eq!(c.submit().status, Status::Error);

        c.edit(FormEdit::FromCurrency("ETH".into()));
        c.edit(FormEdit::ToCurrency("USDC".into()));
        c.edit(FormEdit::FromAmount("1".into()));
        // Not settled yet: the committed form is still empty.
        assert_eq!(c.submit().description, "Please fill in all fields");

        c.settle().await;
        let toast = c.submit();
        assert_eq!(toast.status, Status::Success);
        assert_eq!(c.take_notifications().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_options_after_load() {
        let mut c = controller(Some(prices()));
        c.load_prices().await;
        let labels: Vec<_> = c
            .token_options()
            .await
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, ["ETH", "USDC", "DEAD"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_loading_is_busy() {
        let gate = Arc::new(Notify::new());
        let client = SwapClient::builder()
            .source(Arc::new(Gated(gate.clone())))
            .retry_policy(RetryPolicy::None)
            .build()
            .unwrap();
        let mut c = SwapController::new(client);

        c.begin_load();
        assert_eq!(c.status(), FetchStatus::Loading);
        assert!(!c.can_submit());
        let toast = c.submit();
        assert_eq!(toast.status, Status::Error);
        assert_eq!(toast.description, "Prices are still loading");

        gate.notify_one();
        assert_eq!(c.finish_load().await, FetchStatus::Ready);
        assert!(c.can_submit());
        assert_eq!(c.finish_load().await, FetchStatus::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_after_eviction_refetches() {
        let source = Counting::new(u32::MAX);
        let mut c = expiring(source.clone());
        assert_eq!(c.load_prices().await, FetchStatus::Ready);
        assert_eq!(quote_eth_to_usdc(&mut c, "1").await, "1600.000000");

        std::thread::sleep(Duration::from_millis(500));
        assert_eq!(quote_eth_to_usdc(&mut c, "2").await, "3200.000000");
        assert!(source.calls() >= 2);
        assert_eq!(c.status(), FetchStatus::Ready);
        assert!(c.take_notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_after_eviction_reports_failed_refetch() {
        let source = Counting::new(1);
        let mut c = expiring(source.clone());
        assert_eq!(c.load_prices().await, FetchStatus::Ready);
        assert_eq!(quote_eth_to_usdc(&mut c, "1").await, "1600.000000");

        std::thread::sleep(Duration::from_millis(500));
        assert_eq!(quote_eth_to_usdc(&mut c, "2").await, "");
        assert_eq!(c.status(), FetchStatus::Failed);
        assert_eq!(c.take_notifications(), vec![Notification::fetch_failed()]);
    }
}
