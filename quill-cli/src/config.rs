//! Configuration module
//!
//! Handles CLI configuration: API credentials and connection settings.

use std::time::Duration;

use anyhow::{Context, Result};
use quill_client::{ClientConfig, QuillClient};

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// API key sent as bearer token
    pub api_key: String,
    /// Base URL of the API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Build an API client from these settings
    pub fn client(&self) -> Result<QuillClient> {
        let client_config = ClientConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));

        QuillClient::new(client_config).context("Failed to create Quill client")
    }
}
