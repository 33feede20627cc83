//! Structured pipeline events.
//!
//! The log middleware emits one or two [`LogEvent`]s per call: the cache
//! outcome (hit, miss, or bypass) and — when the transport ran — the
//! exchange outcome (success or failure). Events are delivered to an
//! injected [`EventSink`] and forgotten; the pipeline keeps no log storage
//! of its own.

use std::sync::Arc;
use std::time::Duration;

use http::{Method, StatusCode};
use smol_str::SmolStr;

use crate::key::CacheKey;
use crate::request::Request;

/// What a [`LogEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The request was served from cache; the transport never ran.
    CacheHit,
    /// No valid cache entry; the transport was called.
    CacheMiss,
    /// Bypass policy forced a live call despite any cache entry.
    CacheBypass,
    /// The transport completed the exchange (any HTTP status).
    RequestSuccess,
    /// The transport failed to complete the exchange.
    RequestFailure,
}

impl EventKind {
    /// Returns the kind as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::CacheHit => "cache_hit",
            EventKind::CacheMiss => "cache_miss",
            EventKind::CacheBypass => "cache_bypass",
            EventKind::RequestSuccess => "request_success",
            EventKind::RequestFailure => "request_failure",
        }
    }
}

/// A single structured pipeline event.
///
/// Carries a request summary plus outcome-specific fields; unused fields
/// stay `None`.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// What happened.
    pub kind: EventKind,
    /// Request method.
    pub method: Method,
    /// Request host.
    pub host: SmolStr,
    /// Request path.
    pub path: SmolStr,
    /// Cache key, when one was derived for the call.
    pub cache_key: Option<CacheKey>,
    /// Response status, for exchange outcomes.
    pub status: Option<StatusCode>,
    /// TTL applied when the response was stored.
    pub ttl: Option<Duration>,
    /// Error description, for failures.
    pub error: Option<String>,
}

impl LogEvent {
    /// Creates an event summarizing the given request.
    pub fn for_request(kind: EventKind, request: &Request) -> Self {
        Self {
            kind,
            method: request.method().clone(),
            host: SmolStr::new(request.host()),
            path: SmolStr::new(request.path()),
            cache_key: None,
            status: None,
            ttl: None,
            error: None,
        }
    }

    /// Attaches the cache key.
    pub fn with_key(mut self, key: CacheKey) -> Self {
        self.cache_key = Some(key);
        self
    }

    /// Attaches the response status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the stored TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Attaches an error description.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Receives pipeline events.
///
/// Sinks must be cheap and non-blocking; the pipeline calls them inline.
pub trait EventSink: Send + Sync {
    /// Delivers one event.
    fn emit(&self, event: LogEvent);
}

impl<T> EventSink for Arc<T>
where
    T: EventSink + ?Sized,
{
    fn emit(&self, event: LogEvent) {
        self.as_ref().emit(event)
    }
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: LogEvent) {}
}
