//! Moka-backed in-memory backend.

use async_trait::async_trait;
use cachet_backend::{Backend, BackendResult, DeleteStatus};
use cachet_core::{CacheEntry, CacheKey, Raw};
use moka::future::Cache;

use crate::builder::MemoryBackendBuilder;

/// In-memory cache backend powered by Moka.
///
/// Bounded by entry count; least recently used entries are evicted when the
/// cache is full. Per-entry expiry is derived from each entry's own TTL
/// metadata, so an expired entry disappears without waiting for a read.
///
/// # Caveats
///
/// - Data is **not persisted** — the cache is lost on process restart
/// - Data is **not shared** across processes
/// - Moka's expiration is best-effort; the typed read path performs its own
///   expiry check regardless
#[derive(Clone)]
pub struct MemoryBackend {
    pub(crate) cache: Cache<CacheKey, CacheEntry<Raw>>,
}

impl MemoryBackend {
    /// Creates a new builder.
    pub fn builder() -> MemoryBackendBuilder {
        MemoryBackendBuilder::new()
    }

    /// Returns the number of entries currently held.
    ///
    /// Moka maintains this count eventually; call
    /// [`run_pending_tasks`](Self::run_pending_tasks) first when an exact
    /// figure matters (tests).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flushes Moka's pending housekeeping so counts and evictions settle.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>> {
        Ok(self.cache.get(key).await)
    }

    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()> {
        self.cache.insert(key.clone(), entry).await;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        match self.cache.remove(key).await {
            Some(_) => Ok(DeleteStatus::Deleted(1)),
            None => Ok(DeleteStatus::Missing),
        }
    }

    async fn clear(&self) -> BackendResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }

    fn name(&self) -> &str {
        "moka"
    }
}
