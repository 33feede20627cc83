#![warn(missing_docs)]
//! # cachet-reqwest
//!
//! [reqwest](https://docs.rs/reqwest)-backed transport for the cachet HTTP
//! caching pipeline.
//!
//! [`ReqwestTransport`] implements the
//! [`Transport`](cachet_core::Transport) seam over a shared
//! `reqwest::Client`, mapping reqwest's error space into the pipeline's
//! [`TransportError`](cachet_core::TransportError) taxonomy and honoring
//! per-request timeout and protocol-version options.

pub mod transport;

pub use transport::ReqwestTransport;
