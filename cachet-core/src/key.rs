//! Cache key derivation.
//!
//! A [`CacheKey`] deterministically identifies a request for cache lookup
//! and storage. The key is built from the request line only — method,
//! scheme, host, and path — with the query string excluded. Requests whose
//! identity lives in the body (POST-based query APIs such as GraphQL) are
//! discriminated by a digest of the body bytes.
//!
//! ## Format
//!
//! `{METHOD} {scheme}://{host}{path}[&{header}={value}…][-{digest}]`
//!
//! - Vary-header segments appear in configured order for headers present on
//!   the request, names lowercased.
//! - The digest suffix is appended only for body-bearing verbs with a
//!   non-empty body: SHA-256 of the body, truncated to 16 hex characters.
//!   An empty-body POST therefore shares its key with a GET to the same URL;
//!   this mirrors the system cachet was extracted from.

use std::fmt;

use http::Method;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smol_str::SmolStr;

use crate::request::Request;

/// An opaque, deterministic cache key.
///
/// Short keys are stored inline without heap allocation via [`SmolStr`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CacheKey(SmolStr);

impl CacheKey {
    /// Wraps an already-derived key string.
    pub fn new(key: impl Into<SmolStr>) -> Self {
        CacheKey(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the cache key for a request.
///
/// `vary_headers` lists header names whose values participate in the key
/// when present on the request; absent headers contribute nothing.
///
/// Identical method, normalized URL, vary-header values, and body bytes
/// always yield the same key. Two body-bearing requests to the same URL
/// with different bodies yield different keys.
pub fn derive_key(request: &Request, vary_headers: &[String]) -> CacheKey {
    let mut key = format!(
        "{} {}://{}{}",
        request.method(),
        request.scheme(),
        request.host().to_ascii_lowercase(),
        request.path(),
    );

    for name in vary_headers {
        if let Some(value) = request.headers().get(name.as_str()) {
            let value = String::from_utf8_lossy(value.as_bytes());
            key.push('&');
            key.push_str(&name.to_ascii_lowercase());
            key.push('=');
            key.push_str(&value);
        }
    }

    if has_body_semantics(request.method()) && !request.body().is_empty() {
        key.push('-');
        key.push_str(&body_digest(request.body()));
    }

    CacheKey::new(key)
}

/// Verbs whose body participates in request identity.
fn has_body_semantics(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// SHA-256 of the body, truncated to 16 hex characters.
fn body_digest(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &str) -> Request {
        Request::get(uri).build().unwrap()
    }

    fn post(uri: &str, body: &'static str) -> Request {
        Request::post(uri).body(body).build().unwrap()
    }

    #[test]
    fn identical_requests_share_a_key() {
        let a = post("https://api.example.com/graphql", r#"{"query":"{a}"}"#);
        let b = post("https://api.example.com/graphql", r#"{"query":"{a}"}"#);
        assert_eq!(derive_key(&a, &[]), derive_key(&b, &[]));
    }

    #[test]
    fn different_bodies_yield_different_keys() {
        let a = post("https://api.example.com/graphql", r#"{"query":"{a}"}"#);
        let b = post("https://api.example.com/graphql", r#"{"query":"{b}"}"#);
        assert_ne!(derive_key(&a, &[]), derive_key(&b, &[]));
    }

    #[test]
    fn query_string_is_excluded() {
        let a = get("https://api.example.com/widgets?page=1");
        let b = get("https://api.example.com/widgets?page=2");
        assert_eq!(derive_key(&a, &[]), derive_key(&b, &[]));
    }

    #[test]
    fn host_comparison_is_case_insensitive() {
        let a = get("https://API.Example.com/widgets");
        let b = get("https://api.example.com/widgets");
        assert_eq!(derive_key(&a, &[]), derive_key(&b, &[]));
    }

    #[test]
    fn empty_body_post_matches_get_shape() {
        // Parity with the source system: no digest suffix for an empty body.
        let request = post("https://api.example.com/widgets", "");
        let key = derive_key(&request, &[]);
        assert_eq!(key.as_str(), "POST https://api.example.com/widgets");
    }

    #[test]
    fn get_body_never_contributes() {
        let a = Request::get("https://api.example.com/widgets")
            .body("ignored")
            .build()
            .unwrap();
        let b = get("https://api.example.com/widgets");
        assert_eq!(derive_key(&a, &[]), derive_key(&b, &[]));
    }

    #[test]
    fn vary_headers_discriminate_when_present() {
        let plain = get("https://api.example.com/widgets");
        let en = Request::get("https://api.example.com/widgets")
            .header("accept-language", "en")
            .build()
            .unwrap();
        let de = Request::get("https://api.example.com/widgets")
            .header("accept-language", "de")
            .build()
            .unwrap();

        let vary = vec!["Accept-Language".to_owned()];
        assert_ne!(derive_key(&en, &vary), derive_key(&de, &vary));
        assert_ne!(derive_key(&en, &vary), derive_key(&plain, &vary));
        // Absent header contributes nothing.
        assert_eq!(
            derive_key(&plain, &vary).as_str(),
            "GET https://api.example.com/widgets"
        );
    }

    #[test]
    fn key_format_is_stable() {
        let request = post("https://api.example.com/graphql", r#"{"query":"{a}"}"#);
        let key = derive_key(&request, &[]);
        let (base, digest) = key.as_str().rsplit_once('-').unwrap();
        assert_eq!(base, "POST https://api.example.com/graphql");
        assert_eq!(digest.len(), 16);
    }
}
