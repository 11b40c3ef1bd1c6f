//! Configuration module
//!
//! Call policy and endpoint configuration. The call timeout lives here, on
//! the caller that uses it, rather than in any process-wide state: every
//! [`RpcCaller`](crate::rpc::RpcCaller) carries its own [`CallConfig`].

use std::time::Duration;
use thiserror::Error;

/// Default call timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default attempt budget (1 = no retry)
const DEFAULT_MAX_ATTEMPTS: u32 = 1;
/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Per-caller policy: timeout and attempt budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallConfig {
    timeout: Duration,
    max_attempts: u32,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl CallConfig {
    /// Create a new CallConfigBuilder
    pub fn builder() -> CallConfigBuilder {
        CallConfigBuilder::default()
    }

    /// Read configuration from `PAGEBRIDGE_TIMEOUT_MS` and
    /// `PAGEBRIDGE_MAX_ATTEMPTS`, falling back to defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        let timeout_ms = std::env::var("PAGEBRIDGE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let max_attempts = std::env::var("PAGEBRIDGE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        Self {
            timeout: Duration::from_millis(timeout_ms),
            max_attempts,
        }
    }

    /// How long one attempt may run before it counts as timed out.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Total attempts allowed for one logical call, retries included.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Builder for CallConfig
#[derive(Debug, Default)]
pub struct CallConfigBuilder {
    timeout_ms: Option<u64>,
    max_attempts: Option<u32>,
}

impl CallConfigBuilder {
    /// Set the attempt timeout in milliseconds
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Set the attempt budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CallConfig, ConfigError> {
        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "timeout_ms",
                value: timeout_ms.to_string(),
            });
        }
        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_attempts",
                value: max_attempts.to_string(),
            });
        }
        Ok(CallConfig {
            timeout: Duration::from_millis(timeout_ms),
            max_attempts,
        })
    }
}

/// Endpoint configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    base_url: String,
    token: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        let base_url = std::env::var("PAGEBRIDGE_API_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self {
            base_url,
            token: None,
        }
    }
}

impl EndpointConfig {
    /// Create a configuration for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        Ok(Self {
            base_url,
            token: None,
        })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
