//! Price cache: single-entry TTL cache with a freshness window and an
//! eviction deadline.
//!
//! The cache owns no clock: callers pass `now` so expiry is testable.

use super::PriceTable;
use std::time::{Duration, Instant};

/// Default freshness window.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(30);

/// Default eviction deadline.
pub const DEFAULT_EVICT_AFTER: Duration = Duration::from_secs(60);

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<'a> {
    /// Younger than `stale_after`; serve without refetching.
    Fresh(&'a PriceTable),
    /// Past `stale_after` but not yet evicted; usable while a refetch runs
    /// or after a refetch fails.
    Stale(&'a PriceTable),
    /// Nothing cached, or the entry passed `evict_after`.
    Miss,
}

#[derive(Debug, Clone)]
pub struct PriceCache {
    entry: Option<(PriceTable, Instant)>,
    stale_after: Duration,
    evict_after: Duration,
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER, DEFAULT_EVICT_AFTER)
    }
}

impl PriceCache {
    /// `evict_after` is raised to `stale_after` if given smaller.
    pub fn new(stale_after: Duration, evict_after: Duration) -> Self {
        Self {
            entry: None,
            stale_after,
            evict_after: evict_after.max(stale_after),
        }
    }

    pub fn lookup(&self, now: Instant) -> CacheLookup<'_> {
        match &self.entry {
            Some((table, fetched_at)) => {
                let age = now.saturating_duration_since(*fetched_at);
                if age < self.stale_after {
                    CacheLookup::Fresh(table)
                } else if age < self.evict_after {
                    CacheLookup::Stale(table)
                } else {
                    CacheLookup::Miss
                }
            }
            None => CacheLookup::Miss,
        }
    }

    /// Any table that has not been evicted, fresh or stale.
    pub fn usable(&self, now: Instant) -> Option<&PriceTable> {
        match self.lookup(now) {
            CacheLookup::Fresh(table) | CacheLookup::Stale(table) => Some(table),
            CacheLookup::Miss => None,
        }
    }

    /// Replace the cached table. Only successful fetches call this.
    pub fn store(&mut self, table: PriceTable, now: Instant) {
        self.entry = Some((table, now));
    }

    /// Drop the entry if it is past the eviction deadline.
    pub fn evict_expired(&mut self, now: Instant) {
        if matches!(self.lookup(now), CacheLookup::Miss) {
            self.entry = None;
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn fetched_at(&self) -> Option<Instant> {
        self.entry.as_ref().map(|(_, at)| *at)
    }

    pub fn stale_after(&self) -> Duration {
        self.stale_after
    }

    pub fn evict_after(&self) -> Duration {
        self.evict_after
    }
}
