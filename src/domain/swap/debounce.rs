//! Trailing-edge debounce with a single owned timer.
//!
//! Every [`Debouncer::push`] aborts the pending timer task, if any, and
//! arms a new one. Only a value that survives a full quiet period is
//! delivered through [`Debouncer::next`]. There is no queue: superseded
//! values are dropped.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default quiet period for form edits.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<T>,
    fired_rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be used inside a tokio runtime: `push` spawns the timer task.
    pub fn new(delay: Duration) -> Self {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            fired_tx,
            fired_rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace whatever is pending with `value` and restart the quiet period.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.fired_tx.clone();
        // Deadline is fixed at push time, not when the task first runs.
        let deadline = tokio::time::Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the next value that made it through a quiet period.
    pub async fn next(&mut self) -> Option<T> {
        self.fired_rx.recv().await
    }

    /// A fired value, if one is ready. Never waits.
    pub fn try_next(&mut self) -> Option<T> {
        self.fired_rx.try_recv().ok()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
