//! The `Backend` storage trait and the typed `EntryStore` layer.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cachet_core::{CacheEntry, CacheKey, CachedResponse, Raw};

use crate::BackendError;

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Outcome of a delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    /// The given number of entries were removed.
    Deleted(u32),
    /// No entry existed for the key.
    Missing,
}

/// Raw key/value storage for cache entries.
///
/// Implementations move opaque bytes and keep entry metadata intact; they do
/// not interpret the stored data. TTL enforcement at read time is handled by
/// [`EntryStore`] above, so a backend that also expires entries on its own
/// (as the in-memory backend does) is an optimization, not a requirement.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Reads the raw entry for a key, if any.
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>>;

    /// Writes the raw entry for a key, overwriting unconditionally.
    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()>;

    /// Removes the entry for a key.
    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus>;

    /// Removes every entry.
    async fn clear(&self) -> BackendResult<()>;

    /// Returns the name of this backend for log context.
    fn name(&self) -> &str {
        "backend"
    }
}

#[async_trait]
impl<T> Backend for &T
where
    T: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>> {
        (*self).read(key).await
    }

    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()> {
        (*self).write(key, entry).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (*self).remove(key).await
    }

    async fn clear(&self) -> BackendResult<()> {
        (*self).clear().await
    }

    fn name(&self) -> &str {
        (*self).name()
    }
}

#[async_trait]
impl<T> Backend for Box<T>
where
    T: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()> {
        (**self).write(key, entry).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    async fn clear(&self) -> BackendResult<()> {
        (**self).clear().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T> Backend for Arc<T>
where
    T: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheEntry<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, entry: CacheEntry<Raw>) -> BackendResult<()> {
        (**self).write(key, entry).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    async fn clear(&self) -> BackendResult<()> {
        (**self).clear().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Typed cache access over a raw [`Backend`].
///
/// `get` and `set` handle JSON (de)serialization of [`CachedResponse`]
/// entries. `get` additionally enforces the read-time expiry check: an entry
/// past its TTL window is reported as absent even if the backend still holds
/// it.
pub trait EntryStore: Backend {
    /// Reads and deserializes the entry for a key, filtering expired data.
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = BackendResult<Option<CacheEntry<CachedResponse>>>> + Send {
        async move {
            let Some(entry) = self.read(key).await? else {
                return Ok(None);
            };
            if entry.is_expired() {
                return Ok(None);
            }
            let (stored_at, ttl_seconds) = (entry.stored_at(), entry.ttl_seconds());
            let cached: CachedResponse = serde_json::from_slice(entry.data())?;
            Ok(Some(CacheEntry::from_parts(cached, stored_at, ttl_seconds)))
        }
    }

    /// Serializes and writes an entry, overwriting unconditionally.
    fn set(
        &self,
        key: &CacheKey,
        entry: CacheEntry<CachedResponse>,
    ) -> impl Future<Output = BackendResult<()>> + Send {
        async move {
            let (stored_at, ttl_seconds) = (entry.stored_at(), entry.ttl_seconds());
            let raw = Bytes::from(serde_json::to_vec(entry.data())?);
            self.write(key, CacheEntry::from_parts(raw, stored_at, ttl_seconds))
                .await
        }
    }
}

impl<T> EntryStore for T where T: Backend + ?Sized {}
