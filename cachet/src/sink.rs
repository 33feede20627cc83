//! Tracing-backed event sink.

use cachet_core::{EventKind, EventSink, LogEvent};
use tracing::{debug, warn};

/// Forwards pipeline events to `tracing`.
///
/// Failures log at `warn`, everything else at `debug`. This is the default
/// sink when a [`Client`](crate::Client) is built without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        let kind = event.kind.as_str();
        let cache_key = event.cache_key.as_ref().map(|key| key.as_str());
        let status = event.status.map(|status| status.as_u16());
        let ttl_seconds = event.ttl.map(|ttl| ttl.as_secs());

        match event.kind {
            EventKind::RequestFailure => {
                warn!(
                    kind,
                    method = %event.method,
                    host = %event.host,
                    path = %event.path,
                    cache_key,
                    error = event.error.as_deref(),
                    "request failed",
                );
            }
            _ => {
                debug!(
                    kind,
                    method = %event.method,
                    host = %event.host,
                    path = %event.path,
                    cache_key,
                    status,
                    ttl_seconds,
                    "pipeline event",
                );
            }
        }
    }
}
