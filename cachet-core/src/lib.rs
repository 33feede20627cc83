#![warn(missing_docs)]
//! # cachet-core
//!
//! Core types and traits for the cachet HTTP caching pipeline.
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace:
//!
//! - **Model** the exchange ([`Request`], [`Response`], [`CachedResponse`])
//! - **Identify** a request ([`CacheKey`], [`derive_key`])
//! - **Wrap** stored data with its lifetime ([`CacheEntry`])
//! - **Call** the network ([`Transport`])
//! - **Decide** when to skip the cache ([`BypassPolicy`])
//! - **Observe** outcomes ([`LogEvent`], [`EventSink`])
//!
//! The pipeline itself (strategy, middleware chain, client) lives in the
//! `cachet` crate; storage backends implement the `Backend` trait from
//! `cachet-backend`.

pub mod bypass;
pub mod context;
pub mod entry;
pub mod event;
pub mod key;
pub mod request;
pub mod response;
pub mod transport;

pub use bypass::{BypassPolicy, Never};
pub use context::{CacheStatus, CallContext};
pub use entry::CacheEntry;
pub use event::{EventKind, EventSink, LogEvent, NullSink};
pub use key::{CacheKey, derive_key};
pub use request::{Request, RequestBuilder, RequestOptions};
pub use response::{CachedResponse, CachedResponseError, Response};
pub use transport::{Transport, TransportError};

/// Raw byte data type used for serialized cache entries.
/// Using `Bytes` provides efficient zero-copy cloning via reference counting.
pub type Raw = bytes::Bytes;
