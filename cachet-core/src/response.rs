//! HTTP response model and its cached representation.
//!
//! [`Response`] is the in-flight type handed back to callers; it wraps the
//! `http` crate's vocabulary types directly. [`CachedResponse`] is the
//! serde-serializable form that storage backends persist. Backends only ever
//! see serialized bytes; the typed layer converts between the two.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{StatusCode, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An HTTP response produced by a transport or replayed from cache.
///
/// The body is fully buffered. Non-2xx statuses are ordinary responses at
/// this layer, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Assembles a response from its parts.
    pub fn from_parts(
        status: StatusCode,
        version: Version,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            status,
            version,
            headers,
            body,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the HTTP protocol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the response and returns the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Converts to the serializable cached representation.
    ///
    /// Header values that are not valid UTF-8 are converted lossily; the
    /// pipeline only caches textual API responses.
    pub fn to_cached(&self) -> CachedResponse {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        CachedResponse {
            status: self.status.as_u16(),
            version: version_to_string(self.version),
            headers,
            body: self.body.clone(),
        }
    }

    /// Reconstructs a response from its cached representation.
    ///
    /// Fails if the stored data carries a status code or header pair that no
    /// longer parses; callers treat that as a corrupt entry.
    pub fn from_cached(cached: CachedResponse) -> Result<Self, CachedResponseError> {
        let status = StatusCode::from_u16(cached.status)
            .map_err(|_| CachedResponseError::InvalidStatus(cached.status))?;
        let mut headers = HeaderMap::with_capacity(cached.headers.len());
        for (name, value) in cached.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|_| CachedResponseError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|_| CachedResponseError::InvalidHeader(name.as_str().to_owned()))?;
            headers.append(name, value);
        }
        Ok(Self {
            status,
            version: version_from_str(&cached.version),
            headers,
            body: cached.body,
        })
    }
}

/// Serializable representation of a [`Response`] stored by backends.
///
/// Headers are kept as ordered string pairs so duplicate names survive the
/// round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Numeric status code.
    pub status: u16,
    /// Protocol version, e.g. `HTTP/1.1`.
    pub version: String,
    /// Ordered header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Bytes,
}

/// Error reconstructing a [`Response`] from stored data.
#[derive(Debug, Error)]
pub enum CachedResponseError {
    /// The stored status code is outside the valid range.
    #[error("invalid cached status code: {0}")]
    InvalidStatus(u16),
    /// A stored header pair no longer parses.
    #[error("invalid cached header: {0}")]
    InvalidHeader(String),
}

fn version_to_string(version: Version) -> String {
    format!("{version:?}")
}

fn version_from_str(version: &str) -> Version {
    match version {
        "HTTP/0.9" => Version::HTTP_09,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/2.0" => Version::HTTP_2,
        "HTTP/3.0" => Version::HTTP_3,
        _ => Version::HTTP_11,
    }
}
