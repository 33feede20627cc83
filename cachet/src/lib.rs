#![warn(missing_docs)]
//! # cachet
//!
//! A greedy TTL-caching HTTP client pipeline.
//!
//! cachet wraps a pluggable [`Transport`] with two middleware layers,
//! composed once at construction time:
//!
//! - a **cache middleware** that derives a deterministic key per request,
//!   serves valid entries from a [`Backend`](cachet_backend::Backend), and
//!   stores cacheable live responses with a configured TTL, and
//! - a **log middleware** that emits structured hit/miss/bypass and
//!   success/failure events to an injected sink.
//!
//! Caching is greedy and best-effort: no conditional-request revalidation,
//! and a storage failure is logged and treated as a miss — it never breaks
//! the request.
//!
//! ```ignore
//! use cachet::{Client, Config};
//! use cachet_moka::MemoryBackend;
//! use cachet_reqwest::ReqwestTransport;
//!
//! let client = Client::builder(
//!     ReqwestTransport::new(),
//!     MemoryBackend::builder().max_entries(10_000).build(),
//! )
//! .config(Config::builder().default_ttl_seconds(60).build())
//! .build();
//!
//! let response = client.get("https://api.example.com/widgets/7").await?;
//! ```

/// Client construction and the `execute` entry point.
pub mod client;

/// Pipeline configuration: TTL, timeout, vary headers, default headers.
pub mod config;

/// The `Handler` seam every pipeline stage implements.
pub mod handler;

/// Middleware decorators: caching and logging.
pub mod middleware;

/// The tracing-backed default event sink.
pub mod sink;

/// Cache decisions: bypass, cacheability, fetch and store.
pub mod strategy;

pub use client::{Client, ClientBuilder};
pub use config::{Config, ConfigBuilder, DISABLED_TTL};
pub use handler::{Handler, TransportHandler};
pub use middleware::{CacheMiddleware, LogMiddleware, Middleware};
pub use sink::TracingSink;
pub use strategy::CacheStrategy;

pub use cachet_core::{
    BypassPolicy, CacheEntry, CacheKey, CacheStatus, CachedResponse, CallContext, EventKind,
    EventSink, LogEvent, Never, NullSink, Raw, Request, RequestBuilder, RequestOptions, Response,
    Transport, TransportError, derive_key,
};

/// The error returned by [`Client::execute`].
///
/// Cache subsystem failures are never surfaced here; only the transport can
/// fail a request.
pub type Error = TransportError;
