//! Outbound HTTP request model.
//!
//! A [`Request`] is immutable once built: transformations such as header
//! injection return a new value instead of mutating in place. Construction
//! goes through [`RequestBuilder`], which accumulates the first conversion
//! error and reports it from [`build`](RequestBuilder::build), mirroring the
//! `http` crate's builder behavior.

use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, Uri, Version};

/// Per-request transport options.
///
/// Options the transport layer honors when executing the exchange. Unset
/// options fall back to the client configuration defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    timeout: Option<Duration>,
    http_version: Option<Version>,
}

impl RequestOptions {
    /// Returns the per-request timeout, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the requested HTTP protocol version, if one was set.
    pub fn http_version(&self) -> Option<Version> {
        self.http_version
    }
}

/// An immutable outbound HTTP request.
///
/// Carries the method, target URI, headers, a fully buffered body, and
/// transport options. Cloning is cheap: the body is a reference-counted
/// [`Bytes`] value.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    options: RequestOptions,
}

impl Request {
    /// Creates a new builder with method `GET` and no target set.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Creates a builder for a `GET` request to the given target.
    pub fn get<U>(uri: U) -> RequestBuilder
    where
        U: TryInto<Uri>,
        U::Error: Into<http::Error>,
    {
        RequestBuilder::new().method(Method::GET).uri(uri)
    }

    /// Creates a builder for a `POST` request to the given target.
    pub fn post<U>(uri: U) -> RequestBuilder
    where
        U: TryInto<Uri>,
        U::Error: Into<http::Error>,
    {
        RequestBuilder::new().method(Method::POST).uri(uri)
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the target URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the transport options.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Returns the URI scheme, or an empty string for relative targets.
    pub fn scheme(&self) -> &str {
        self.uri.scheme_str().unwrap_or("")
    }

    /// Returns the URI host, or an empty string for relative targets.
    pub fn host(&self) -> &str {
        self.uri.host().unwrap_or("")
    }

    /// Returns the URI path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns a new request with the given header appended.
    ///
    /// Existing values for the same name are kept; use
    /// [`headers()`](Self::headers) to inspect the map before injecting
    /// defaults non-destructively.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns a new request targeting a different URI.
    ///
    /// Used when resolving relative targets against a configured base URL.
    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Returns a new request with the given timeout applied.
    ///
    /// Used by the pipeline to fill in the configured default when the
    /// caller set none.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }
}

/// Builder for [`Request`].
///
/// Conversion failures (invalid URI, invalid header name or value) are
/// recorded and surfaced once from [`build`](Self::build); later setters on
/// a failed builder are no-ops.
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    options: RequestOptions,
    error: Option<http::Error>,
}

impl RequestBuilder {
    fn new() -> Self {
        Self {
            method: Method::GET,
            uri: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            options: RequestOptions::default(),
            error: None,
        }
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the target URI.
    pub fn uri<U>(mut self, uri: U) -> Self
    where
        U: TryInto<Uri>,
        U::Error: Into<http::Error>,
    {
        if self.error.is_some() {
            return self;
        }
        match uri.try_into() {
            Ok(uri) => self.uri = Some(uri),
            Err(e) => self.error = Some(e.into()),
        }
        self
    }

    /// Appends a header.
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        if self.error.is_some() {
            return self;
        }
        match (name.try_into(), value.try_into()) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            (Err(e), _) => self.error = Some(e.into()),
            (_, Err(e)) => self.error = Some(e.into()),
        }
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Sets the requested HTTP protocol version.
    pub fn http_version(mut self, version: Version) -> Self {
        self.options.http_version = Some(version);
        self
    }

    /// Builds the request, surfacing the first recorded error.
    ///
    /// A builder without a target URI yields a request for `/`, matching the
    /// `http` crate's default.
    pub fn build(self) -> Result<Request, http::Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Request {
            method: self.method,
            uri: self.uri.unwrap_or_else(|| Uri::from_static("/")),
            headers: self.headers,
            body: self.body,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_parts() {
        let request = Request::post("https://api.example.com/graphql")
            .header("content-type", "application/json")
            .body(r#"{"query":"{a}"}"#)
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.host(), "api.example.com");
        assert_eq!(request.path(), "/graphql");
        assert_eq!(request.scheme(), "https");
        assert_eq!(
            request.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(request.options().timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn invalid_uri_surfaces_from_build() {
        let result = Request::get("http://[invalid").build();
        assert!(result.is_err());
    }

    #[test]
    fn invalid_header_surfaces_from_build() {
        let result = Request::get("https://example.com/")
            .header("bad header name", "value")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn with_header_returns_new_request() {
        let request = Request::get("https://example.com/").build().unwrap();
        let updated = request.clone().with_header(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("1"),
        );

        assert!(request.headers().get("x-trace").is_none());
        assert_eq!(updated.headers().get("x-trace").unwrap(), "1");
    }
}
