//! The transport seam.
//!
//! [`Transport`] is the single point where the pipeline touches the network.
//! Any HTTP client can sit behind it — the `cachet-reqwest` crate binds
//! reqwest, tests plug in mocks — which keeps the caching layers free of a
//! concrete HTTP binding.

use async_trait::async_trait;
use thiserror::Error;

use crate::request::Request;
use crate::response::Response;

/// Performs the actual HTTP exchange.
///
/// A transport receives the fully prepared request (default headers merged,
/// base URL resolved) and must honor the request's timeout option. HTTP
/// error statuses are successful exchanges; only a failure to complete the
/// exchange is a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request against the network.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (*self).send(request).await
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T> Transport for std::sync::Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}

/// Error completing an HTTP exchange.
///
/// Surfaced unchanged to the caller of the pipeline; the cache is never
/// populated for a failed exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The exchange did not complete within the timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established (DNS failure, refused).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request could not be handed to the underlying client.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport-level failure.
    #[error(transparent)]
    Io(Box<dyn std::error::Error + Send + Sync>),
}
