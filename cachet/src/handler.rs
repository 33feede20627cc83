//! The handler seam the pipeline is composed from.

use async_trait::async_trait;
use cachet_core::{CallContext, Request, Response, Transport, TransportError};

/// One stage of the pipeline.
///
/// Every stage — the transport at the bottom, each middleware above it —
/// exposes the same call shape. Middleware hold the next stage as
/// `Arc<dyn Handler>`, so the whole chain is assembled once at client
/// construction and shared across calls.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes one request, recording outcomes in the call context.
    async fn call(
        &self,
        request: Request,
        ctx: &mut CallContext,
    ) -> Result<Response, TransportError>;
}

/// The innermost stage: hands the request to the transport.
pub struct TransportHandler<T> {
    transport: T,
}

impl<T> TransportHandler<T> {
    /// Wraps a transport as the bottom of a handler chain.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T> Handler for TransportHandler<T>
where
    T: Transport,
{
    async fn call(
        &self,
        request: Request,
        _ctx: &mut CallContext,
    ) -> Result<Response, TransportError> {
        self.transport.send(request).await
    }
}
