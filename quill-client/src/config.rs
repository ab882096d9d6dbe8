//! Client configuration
//!
//! Connection settings for a [`QuillClient`](crate::QuillClient). A config is
//! built once, validated, and then owned by the client; nothing is read from
//! global state after construction.

use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.quill.dev";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Quill API
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL of the API (e.g., "https://api.quill.dev")
    pub base_url: String,

    /// Timeout applied to every HTTP request
    pub timeout: Duration,

    /// Value of the User-Agent header
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("quill-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - QUILL_API_KEY (required)
    /// - QUILL_BASE_URL (optional, default: https://api.quill.dev)
    /// - QUILL_TIMEOUT_SECS (optional, seconds, default: 30)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("QUILL_API_KEY")
            .map_err(|_| ClientError::Config("QUILL_API_KEY environment variable not set".into()))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("QUILL_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(timeout) = std::env::var("QUILL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(timeout);
        }

        config.validate()?;
        Ok(config)
    }

    /// Overrides the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::Config("api_key cannot be empty".into()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than 0".into()));
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
