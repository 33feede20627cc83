#![warn(missing_docs)]
//! # cachet-backend
//!
//! Storage abstraction for the cachet HTTP caching pipeline.
//!
//! Backends move raw bytes: the [`Backend`] trait reads and writes
//! [`CacheEntry<Raw>`](cachet_core::CacheEntry) values keyed by
//! [`CacheKey`](cachet_core::CacheKey). The [`EntryStore`] extension layers
//! typed access on top — JSON (de)serialization of
//! [`CachedResponse`](cachet_core::CachedResponse) entries and the mandatory
//! read-time expiry check — so every backend gets the same semantics for
//! free.
//!
//! Backend failures never break a request: the strategy layer above treats
//! any [`BackendError`] as a cache miss.

pub mod backend;
pub mod error;

pub use backend::{Backend, BackendResult, DeleteStatus, EntryStore};
pub use error::BackendError;
