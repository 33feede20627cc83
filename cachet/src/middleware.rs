//! Cache and log middleware decorators.
//!
//! Middleware wrap a downstream [`Handler`] and are composed once, at
//! construction time, in a fixed order: log → cache → transport. The cache
//! middleware short-circuits on a hit, so the transport (and everything
//! below the cache layer) never runs for cached responses.

use std::sync::Arc;

use async_trait::async_trait;
use cachet_backend::Backend;
use cachet_core::{
    CacheStatus, CallContext, EventKind, EventSink, LogEvent, Request, Response, TransportError,
};

use crate::handler::Handler;
use crate::strategy::CacheStrategy;

/// Wraps a downstream handler, producing the decorated handler.
pub trait Middleware {
    /// Consumes the middleware and the next stage, returning the composed
    /// stage.
    fn wrap(self, next: Arc<dyn Handler>) -> Arc<dyn Handler>;
}

/// Serves requests from cache and stores cacheable live responses.
pub struct CacheMiddleware<B> {
    strategy: Arc<CacheStrategy<B>>,
}

impl<B> CacheMiddleware<B> {
    /// Creates the middleware over a shared strategy.
    pub fn new(strategy: Arc<CacheStrategy<B>>) -> Self {
        Self { strategy }
    }
}

impl<B> Middleware for CacheMiddleware<B>
where
    B: Backend + 'static,
{
    fn wrap(self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(CacheHandler {
            strategy: self.strategy,
            next,
        })
    }
}

struct CacheHandler<B> {
    strategy: Arc<CacheStrategy<B>>,
    next: Arc<dyn Handler>,
}

#[async_trait]
impl<B> Handler for CacheHandler<B>
where
    B: Backend + 'static,
{
    async fn call(
        &self,
        request: Request,
        ctx: &mut CallContext,
    ) -> Result<Response, TransportError> {
        let key = self.strategy.key_for(&request);
        ctx.cache_key = Some(key.clone());

        if self.strategy.should_bypass(&request).await {
            ctx.status = CacheStatus::Bypass;
        } else if self.strategy.caching_enabled()
            && let Some(response) = self.strategy.lookup(&key).await
        {
            ctx.status = CacheStatus::Hit;
            return Ok(response);
        }

        let response = self.next.call(request.clone(), ctx).await?;

        // A bypassed call still refreshes the entry.
        if self.strategy.is_cacheable(&request, &response) {
            ctx.stored_ttl = self.strategy.write(&key, &response).await;
        }

        Ok(response)
    }
}

/// Emits structured events for every call without altering the flow.
pub struct LogMiddleware {
    sink: Arc<dyn EventSink>,
}

impl LogMiddleware {
    /// Creates the middleware over a shared sink.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

impl Middleware for LogMiddleware {
    fn wrap(self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(LogHandler {
            sink: self.sink,
            next,
        })
    }
}

struct LogHandler {
    sink: Arc<dyn EventSink>,
    next: Arc<dyn Handler>,
}

impl LogHandler {
    fn emit(&self, mut event: LogEvent, ctx: &CallContext) {
        if let Some(key) = &ctx.cache_key {
            event = event.with_key(key.clone());
        }
        self.sink.emit(event);
    }
}

#[async_trait]
impl Handler for LogHandler {
    async fn call(
        &self,
        request: Request,
        ctx: &mut CallContext,
    ) -> Result<Response, TransportError> {
        // Cheap summary clone: the body is reference-counted.
        let summary = request.clone();
        let result = self.next.call(request, ctx).await;

        match ctx.status {
            CacheStatus::Hit => {
                self.emit(LogEvent::for_request(EventKind::CacheHit, &summary), ctx);
            }
            CacheStatus::Miss | CacheStatus::Bypass => {
                let kind = match ctx.status {
                    CacheStatus::Bypass => EventKind::CacheBypass,
                    _ => EventKind::CacheMiss,
                };
                self.emit(LogEvent::for_request(kind, &summary), ctx);

                match &result {
                    Ok(response) => {
                        let mut event =
                            LogEvent::for_request(EventKind::RequestSuccess, &summary)
                                .with_status(response.status());
                        if let Some(ttl) = ctx.stored_ttl {
                            event = event.with_ttl(ttl);
                        }
                        self.emit(event, ctx);
                    }
                    Err(error) => {
                        self.emit(
                            LogEvent::for_request(EventKind::RequestFailure, &summary)
                                .with_error(error.to_string()),
                            ctx,
                        );
                    }
                }
            }
        }

        result
    }
}
