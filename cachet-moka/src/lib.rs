#![warn(missing_docs)]
//! # cachet-moka
//!
//! In-memory cache backend for cachet powered by [Moka](https://docs.rs/moka).
//!
//! [`MemoryBackend`] stores raw cache entries in a bounded, concurrent map
//! with lock-free reads. Entries expire on their own TTL via a Moka expiry
//! policy, in addition to the pipeline's mandatory read-time check.
//!
//! ```
//! use cachet_moka::MemoryBackend;
//!
//! let backend = MemoryBackend::builder().max_entries(10_000).build();
//! ```

pub mod backend;
pub mod builder;

pub use backend::MemoryBackend;
pub use builder::MemoryBackendBuilder;
