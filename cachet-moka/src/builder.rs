//! Builder for configuring [`MemoryBackend`].

use std::time::{Duration, Instant};

use cachet_core::{CacheEntry, CacheKey, Raw};
use chrono::Utc;
use moka::Expiry;
use moka::future::{Cache, CacheBuilder};

use crate::backend::MemoryBackend;

const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Expiration policy that derives each entry's lifetime from its own
/// `stored_at` + TTL metadata.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct EntryTtl;

impl Expiry<CacheKey, CacheEntry<Raw>> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        entry: &CacheEntry<Raw>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(entry))
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        entry: &CacheEntry<Raw>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // Always use the NEW entry's expiry. Moka's default returns
        // `duration_until_expiry`, which would keep the OLD deadline and
        // expire refreshed entries prematurely.
        Some(Self::remaining(entry))
    }
}

impl EntryTtl {
    fn remaining(entry: &CacheEntry<Raw>) -> Duration {
        let delta = entry.expires_at() - Utc::now();
        let millis = delta.num_milliseconds();
        if millis <= 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(millis as u64)
        }
    }
}

/// Builder for creating and configuring a [`MemoryBackend`].
///
/// ```
/// use cachet_moka::MemoryBackend;
///
/// let backend = MemoryBackend::builder().max_entries(50_000).build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MemoryBackendBuilder {
    max_entries: u64,
}

impl MemoryBackendBuilder {
    /// Creates a builder with the default capacity of 10 000 entries.
    pub fn new() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Sets the maximum number of entries the cache can hold.
    ///
    /// Least recently used entries are evicted when the cache exceeds this
    /// capacity.
    pub fn max_entries(mut self, capacity: u64) -> Self {
        self.max_entries = capacity;
        self
    }

    /// Builds the backend.
    pub fn build(self) -> MemoryBackend {
        let cache: Cache<CacheKey, CacheEntry<Raw>> = CacheBuilder::new(self.max_entries)
            .expire_after(EntryTtl)
            .build();
        MemoryBackend { cache }
    }
}

impl Default for MemoryBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}
