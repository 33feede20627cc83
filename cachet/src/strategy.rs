//! The greedy cache strategy.
//!
//! [`CacheStrategy`] makes every cache decision for the pipeline: whether a
//! request must bypass the cache, whether a response may be stored, and the
//! actual fetch/store against the backend. It is greedy — a valid entry is
//! served as-is, with no conditional-request revalidation — and fail-open:
//! backend errors are logged and treated as misses, never propagated.

use std::sync::Arc;
use std::time::Duration;

use cachet_backend::{Backend, EntryStore};
use cachet_core::{BypassPolicy, CacheEntry, CacheKey, Request, Response, derive_key};
use tracing::{debug, warn};

use crate::config::Config;

/// Cache decision logic over a storage backend.
pub struct CacheStrategy<B> {
    backend: B,
    config: Arc<Config>,
    bypass: Arc<dyn BypassPolicy>,
}

impl<B> CacheStrategy<B>
where
    B: Backend,
{
    /// Creates a strategy over the given backend, configuration, and bypass
    /// policy.
    pub fn new(backend: B, config: Arc<Config>, bypass: Arc<dyn BypassPolicy>) -> Self {
        Self {
            backend,
            config,
            bypass,
        }
    }

    /// Derives the cache key for a request under this configuration.
    pub fn key_for(&self, request: &Request) -> CacheKey {
        derive_key(request, &self.config.vary_headers)
    }

    /// Whether the bypass policy forces a live call for this request.
    ///
    /// Checked before any store lookup.
    pub async fn should_bypass(&self, request: &Request) -> bool {
        self.bypass.should_bypass(request).await
    }

    /// Whether a response may be stored: 2xx status and caching enabled.
    pub fn is_cacheable(&self, _request: &Request, response: &Response) -> bool {
        self.config.caching_enabled() && response.status().is_success()
    }

    pub(crate) fn caching_enabled(&self) -> bool {
        self.config.caching_enabled()
    }

    /// Attempts to satisfy a request from cache.
    ///
    /// Returns `None` when the bypass policy triggers, when caching is
    /// disabled, when no valid entry exists, or when the backend fails
    /// (fail-open).
    pub async fn fetch(&self, request: &Request) -> Option<Response> {
        if !self.caching_enabled() || self.should_bypass(request).await {
            return None;
        }
        self.lookup(&self.key_for(request)).await
    }

    /// Stores a live response if it is cacheable.
    ///
    /// Returns `true` when an entry was written. Backend failures are logged
    /// and reported as `false`; the response is still served.
    pub async fn store(&self, request: &Request, response: &Response) -> bool {
        if !self.is_cacheable(request, response) {
            return false;
        }
        self.write(&self.key_for(request), response).await.is_some()
    }

    /// Fail-open backend read for an already-derived key.
    pub(crate) async fn lookup(&self, key: &CacheKey) -> Option<Response> {
        match self.backend.get(key).await {
            Ok(Some(entry)) => match Response::from_cached(entry.into_data()) {
                Ok(response) => {
                    debug!(cache_key = %key, "cache hit");
                    Some(response)
                }
                Err(error) => {
                    warn!(cache_key = %key, %error, "discarding corrupt cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(
                    cache_key = %key,
                    backend = self.backend.name(),
                    %error,
                    "cache read failed, falling through to transport",
                );
                None
            }
        }
    }

    /// Fail-open backend write; returns the TTL applied on success.
    pub(crate) async fn write(&self, key: &CacheKey, response: &Response) -> Option<Duration> {
        let ttl = self.config.entry_ttl()?;
        let entry = CacheEntry::new(response.to_cached(), ttl);
        match self.backend.set(key, entry).await {
            Ok(()) => {
                debug!(cache_key = %key, ttl_seconds = ttl.as_secs(), "stored response");
                Some(ttl)
            }
            Err(error) => {
                warn!(
                    cache_key = %key,
                    backend = self.backend.name(),
                    %error,
                    "cache write failed, response served uncached",
                );
                None
            }
        }
    }
}
