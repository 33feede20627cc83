//! Pipeline configuration.
//!
//! [`Config`] collects the knobs the strategy and client consult: the
//! default entry TTL (with a negative sentinel that disables caching
//! entirely), the transport timeout, vary headers for key derivation, and
//! the default headers merged into every request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// TTL sentinel that disables caching.
///
/// Any negative `default_ttl_seconds` disables caching; this constant is the
/// conventional spelling.
pub const DISABLED_TTL: i64 = -1;

const DEFAULT_TTL_SECONDS: i64 = 60;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_USER_AGENT: &str = concat!("cachet/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`Client`](crate::Client) pipeline.
///
/// Deserializable from configuration files; the `timeout` field accepts
/// humantime strings such as `"5s"` or `"500ms"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// TTL applied to stored entries, in whole seconds.
    ///
    /// Negative values disable caching entirely (see [`DISABLED_TTL`]); this
    /// is a documented sentinel, not an error.
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: i64,

    /// Transport timeout applied when a request sets none of its own.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Header names whose values participate in cache key derivation when
    /// present on a request.
    #[serde(default)]
    pub vary_headers: Vec<String>,

    /// `User-Agent` injected when the caller did not set one.
    #[serde(default = "default_user_agent")]
    pub default_user_agent: String,

    /// Headers merged non-destructively into every request.
    #[serde(default)]
    pub default_headers: Vec<(String, String)>,

    /// Base URL that relative request targets are resolved against.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_ttl_seconds() -> i64 {
    DEFAULT_TTL_SECONDS
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            timeout: DEFAULT_TIMEOUT,
            vary_headers: Vec::new(),
            default_user_agent: default_user_agent(),
            default_headers: Vec::new(),
            base_url: None,
        }
    }
}

impl Config {
    /// Creates a new builder with default values.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Whether responses may be stored at all.
    pub fn caching_enabled(&self) -> bool {
        self.default_ttl_seconds >= 0
    }

    /// TTL for new entries, or `None` when caching is disabled.
    pub fn entry_ttl(&self) -> Option<Duration> {
        self.caching_enabled()
            .then(|| Duration::from_secs(self.default_ttl_seconds as u64))
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the entry TTL in whole seconds. Negative disables caching.
    pub fn default_ttl_seconds(mut self, seconds: i64) -> Self {
        self.config.default_ttl_seconds = seconds;
        self
    }

    /// Disables caching entirely ([`DISABLED_TTL`]).
    pub fn disable_caching(mut self) -> Self {
        self.config.default_ttl_seconds = DISABLED_TTL;
        self
    }

    /// Sets the default transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a header name to vary cache keys on.
    pub fn vary_header(mut self, name: impl Into<String>) -> Self {
        self.config.vary_headers.push(name.into());
        self
    }

    /// Sets the default `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.default_user_agent = user_agent.into();
        self
    }

    /// Adds a header merged non-destructively into every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Sets the base URL that relative targets resolve against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
