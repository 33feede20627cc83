//! Cache bypass policy.
//!
//! A [`BypassPolicy`] decides per request whether to force a live transport
//! call regardless of cache state — the hook callers use for "refresh"
//! actions or to disable cache reads in development. The default policy,
//! [`Never`], bypasses nothing.
//!
//! Bypass affects reads only: the live response is still offered to the
//! store afterwards, refreshing the entry.

use async_trait::async_trait;

use crate::request::Request;

/// Decides whether a request must skip the cache lookup.
#[async_trait]
pub trait BypassPolicy: Send + Sync {
    /// Returns `true` to force a live transport call for this request.
    async fn should_bypass(&self, request: &Request) -> bool;
}

/// The default policy: never bypass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

#[async_trait]
impl BypassPolicy for Never {
    async fn should_bypass(&self, _request: &Request) -> bool {
        false
    }
}

/// Plain predicates work as bypass policies.
///
/// ```
/// use cachet_core::{BypassPolicy, Request};
///
/// let bypass_admin = |request: &Request| request.path().starts_with("/admin");
/// # let _: &dyn BypassPolicy = &bypass_admin;
/// ```
#[async_trait]
impl<F> BypassPolicy for F
where
    F: Fn(&Request) -> bool + Send + Sync,
{
    async fn should_bypass(&self, request: &Request) -> bool {
        (self)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_does_not_bypass() {
        let request = Request::get("https://example.com/").build().unwrap();
        assert!(!Never.should_bypass(&request).await);
    }

    #[tokio::test]
    async fn closure_policy_sees_the_request() {
        let policy = |request: &Request| request.path() == "/live";
        let live = Request::get("https://example.com/live").build().unwrap();
        let cached = Request::get("https://example.com/data").build().unwrap();

        assert!(policy.should_bypass(&live).await);
        assert!(!policy.should_bypass(&cached).await);
    }
}
