//! The client: pipeline composition and the `execute` entry point.

use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use cachet_backend::Backend;
use cachet_core::{
    BypassPolicy, CallContext, EventSink, Never, Request, Response, Transport, TransportError,
};
use http::Uri;
use http::header::{HeaderName, HeaderValue, USER_AGENT};
use tracing::warn;

use crate::config::Config;
use crate::handler::{Handler, TransportHandler};
use crate::middleware::{CacheMiddleware, LogMiddleware, Middleware};
use crate::sink::TracingSink;
use crate::strategy::CacheStrategy;

/// A caching HTTP client.
///
/// Owns the composed middleware chain (log → cache → transport) and the
/// request queue. The client itself is stateless across calls apart from the
/// queue; share it behind an `Arc` for concurrent use.
pub struct Client {
    chain: Arc<dyn Handler>,
    config: Arc<Config>,
    queue: Mutex<Vec<Request>>,
}

impl Client {
    /// Creates a builder over the given transport and backend.
    pub fn builder<T, B>(transport: T, backend: B) -> ClientBuilder
    where
        T: Transport + 'static,
        B: Backend + 'static,
    {
        ClientBuilder::new(Arc::new(transport), Arc::new(backend))
    }

    /// Executes one request through the pipeline.
    ///
    /// Default headers are merged first (non-destructively — caller-set
    /// headers always win), relative targets are resolved against the
    /// configured base URL, then the chain runs: cache lookup, transport on
    /// a miss, store decision, logging.
    ///
    /// HTTP error statuses are ordinary responses; only a transport failure
    /// is an `Err`.
    pub async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let request = self.prepare(request)?;
        let mut ctx = CallContext::new();
        self.chain.call(request, &mut ctx).await
    }

    /// Convenience `GET`.
    pub async fn get(&self, uri: &str) -> Result<Response, TransportError> {
        let request = Request::get(uri)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        self.execute(request).await
    }

    /// Convenience `POST` with a body.
    pub async fn post(
        &self,
        uri: &str,
        body: impl Into<Bytes>,
    ) -> Result<Response, TransportError> {
        let request = Request::post(uri)
            .body(body)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        self.execute(request).await
    }

    /// Queues a request for later concurrent execution.
    pub fn queue(&self, request: Request) {
        self.locked_queue().push(request);
    }

    /// Executes every queued request concurrently.
    ///
    /// Results are returned in queue order; the queue is cleared. Each
    /// request goes through the full pipeline, so cache hits and stores
    /// behave exactly as with [`execute`](Self::execute).
    pub async fn execute_queued(&self) -> Vec<Result<Response, TransportError>> {
        let queued = std::mem::take(&mut *self.locked_queue());
        futures::future::join_all(queued.into_iter().map(|request| self.execute(request))).await
    }

    fn locked_queue(&self) -> MutexGuard<'_, Vec<Request>> {
        match self.queue.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn prepare(&self, request: Request) -> Result<Request, TransportError> {
        let mut request = self.resolve_base(request)?;
        if request.options().timeout().is_none() {
            request = request.with_timeout(self.config.timeout);
        }
        Ok(self.merge_default_headers(request))
    }

    /// Resolves a relative target against the configured base URL.
    fn resolve_base(&self, request: Request) -> Result<Request, TransportError> {
        if request.uri().scheme().is_some() {
            return Ok(request);
        }
        let Some(base) = &self.config.base_url else {
            return Ok(request);
        };
        let path_and_query = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let joined = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path_and_query.trim_start_matches('/'),
        );
        let uri =
            Uri::try_from(joined).map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(request.with_uri(uri))
    }

    /// Merges configured default headers, caller-set values winning.
    ///
    /// Applying the merge twice yields the same headers as applying it once.
    fn merge_default_headers(&self, mut request: Request) -> Request {
        for (name, value) in &self.config.default_headers {
            let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) else {
                warn!(header = name.as_str(), "skipping invalid default header");
                continue;
            };
            if !request.headers().contains_key(&name) {
                request = request.with_header(name, value);
            }
        }

        if !request.headers().contains_key(USER_AGENT) {
            match HeaderValue::try_from(self.config.default_user_agent.as_str()) {
                Ok(value) => request = request.with_header(USER_AGENT, value),
                Err(_) => warn!("skipping invalid default user agent"),
            }
        }

        request
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
///
/// Transport and backend are required up front; configuration, bypass
/// policy, and event sink are optional with sensible defaults.
pub struct ClientBuilder {
    transport: Arc<dyn Transport>,
    backend: Arc<dyn Backend>,
    config: Config,
    bypass: Arc<dyn BypassPolicy>,
    sink: Arc<dyn EventSink>,
}

impl ClientBuilder {
    fn new(transport: Arc<dyn Transport>, backend: Arc<dyn Backend>) -> Self {
        Self {
            transport,
            backend,
            config: Config::default(),
            bypass: Arc::new(Never),
            sink: Arc::new(TracingSink),
        }
    }

    /// Sets the pipeline configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the cache bypass policy (default: never bypass).
    pub fn bypass_policy(mut self, policy: impl BypassPolicy + 'static) -> Self {
        self.bypass = Arc::new(policy);
        self
    }

    /// Sets the event sink (default: [`TracingSink`]).
    pub fn event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Composes the middleware chain and builds the client.
    pub fn build(self) -> Client {
        let config = Arc::new(self.config);
        let strategy = Arc::new(CacheStrategy::new(
            self.backend,
            Arc::clone(&config),
            self.bypass,
        ));

        let chain: Arc<dyn Handler> = Arc::new(TransportHandler::new(self.transport));
        let chain = CacheMiddleware::new(strategy).wrap(chain);
        let chain = LogMiddleware::new(self.sink).wrap(chain);

        Client {
            chain,
            config,
            queue: Mutex::new(Vec::new()),
        }
    }
}
