//! Transport implementation over reqwest.

use async_trait::async_trait;
use cachet_core::{Request, Response, Transport, TransportError};

/// A [`Transport`] backed by a shared `reqwest::Client`.
///
/// Connection pooling lives in the inner client, so clones are cheap and
/// share the pool.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport over a fresh `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-configured `reqwest::Client`.
    ///
    /// Use this to control connection pooling, proxies, or TLS settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = reqwest::Url::parse(&request.uri().to_string())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .headers(request.headers().clone())
            .body(request.body().clone());
        if let Some(timeout) = request.options().timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(version) = request.options().http_version() {
            builder = builder.version(version);
        }

        let response = builder.send().await.map_err(map_error)?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_error)?;

        Ok(Response::from_parts(status, version, headers, body))
    }
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Io(Box::new(error))
    }
}
