//! Cached entries with TTL metadata.
//!
//! A [`CacheEntry`] wraps stored data with the timestamp it was written and
//! its time-to-live. Expiry is evaluated at read time: an entry past
//! `stored_at + ttl` is treated as absent regardless of whether the backing
//! store has evicted it yet.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached value with its storage timestamp and TTL.
///
/// The type parameter is the stored data: raw bytes at the backend boundary,
/// a typed response above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    data: T,
    stored_at: DateTime<Utc>,
    ttl_seconds: u64,
}

impl<T> CacheEntry<T> {
    /// Creates an entry stamped with the current time.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Utc::now(),
            ttl_seconds: ttl.as_secs(),
        }
    }

    /// Reassembles an entry from its parts, preserving the original
    /// timestamp. Used when converting between raw and typed entries.
    pub fn from_parts(data: T, stored_at: DateTime<Utc>, ttl_seconds: u64) -> Self {
        Self {
            data,
            stored_at,
            ttl_seconds,
        }
    }

    /// Returns a reference to the stored data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the entry and returns the stored data.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns when the entry was stored.
    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    /// Returns the configured TTL in whole seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns the instant the entry expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::try_seconds(self.ttl_seconds.min(i64::MAX as u64) as i64)
            .and_then(|ttl| self.stored_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the entry has expired as of the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }

    /// Remaining time until expiry, or `None` if already expired.
    pub fn remaining_ttl(&self) -> Option<Duration> {
        let remaining = self.expires_at().signed_duration_since(Utc::now());
        let millis = remaining.num_milliseconds();
        if millis > 0 {
            Some(Duration::from_millis(millis as u64))
        } else {
            None
        }
    }

    /// Transforms the stored data, preserving the timestamp and TTL.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheEntry<U> {
        CacheEntry {
            data: f(self.data),
            stored_at: self.stored_at,
            ttl_seconds: self.ttl_seconds,
        }
    }
}
