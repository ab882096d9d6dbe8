//! Quill HTTP Client
//!
//! A type-safe HTTP client for the Quill content generation API.
//!
//! Every method maps onto one REST endpoint. Requests carry the API key as a
//! bearer token, responses are decoded from the `{ success, data, error }`
//! envelope, and failures are reported through [`ClientError`]. Generation
//! jobs run asynchronously on the server; [`QuillClient::wait_for_generation`]
//! and [`QuillClient::wait_for_bulk_generation`] poll them to completion.
//!
//! # Example
//!
//! ```no_run
//! use quill_client::{ClientConfig, QuillClient};
//! use quill_core::domain::publication::ContentType;
//! use quill_core::dto::generation::GenerateRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = QuillClient::new(ClientConfig::new("qk_live_..."))?;
//!
//!     let started = client
//!         .generate(GenerateRequest::new("Why Rust?", ContentType::BlogPost))
//!         .await?;
//!     let done = client.wait_for_generation(&started.session_id, None).await?;
//!
//!     if let Some(status) = done.data {
//!         println!("{}", status.content.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

mod account;
pub mod config;
pub mod error;
mod files;
mod generation;
pub mod poller;
mod publications;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use generation::{BulkStatusFetcher, GenerationStatusFetcher};
pub use poller::{JobKind, PollConfig, Poller, StatusFetcher, UnsuccessfulPolicy};
pub use quill_core::dto::response::ApiResponse;
pub use tokio_util::sync::CancellationToken;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client for the Quill API
///
/// This client provides methods for all API endpoints, organized into
/// logical groups:
/// - Generation (single and bulk jobs, status checks, polling helpers)
/// - Publications and templates
/// - Files (multipart uploads)
/// - Account
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct QuillClient {
    /// Base URL of the API without trailing slash
    base_url: String,
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl QuillClient {
    /// Create a new client from a configuration
    ///
    /// The configuration is validated and the timeout and User-Agent are
    /// applied to the underlying HTTP client.
    ///
    /// # Example
    /// ```
    /// use quill_client::{ClientConfig, QuillClient};
    ///
    /// let client = QuillClient::new(ClientConfig::new("qk_test")).unwrap();
    /// assert_eq!(client.base_url(), "https://api.quill.dev");
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Create a client from environment variables (see [`ClientConfig::from_env`])
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The timeout
    /// and User-Agent of `config` are not applied to `client`.
    ///
    /// # Example
    /// ```
    /// use quill_client::{ClientConfig, QuillClient};
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(120))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = QuillClient::with_client(ClientConfig::new("qk_test"), http_client);
    /// ```
    pub fn with_client(config: ClientConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Building
    // =============================================================================

    /// Build an endpoint URL from path segments appended to the base URL
    ///
    /// Each segment is percent-encoded as a single path segment, so IDs
    /// containing `/`, `?` or `#` cannot reach another endpoint.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || matches!(**segment, "." | ".."))
        {
            return Err(ClientError::InvalidRequest(format!(
                "invalid path segment '{}'",
                bad
            )));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start an authenticated request to the endpoint at `segments`
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url).bearer_auth(&self.api_key))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Decode the response envelope without interpreting `success`
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] (404 becomes
    /// [`ClientError::NotFound`]), using the envelope's error text when the
    /// body has one.
    async fn handle_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&error_text)
                .ok()
                .and_then(|envelope| envelope.error_message().map(str::to_string))
                .unwrap_or(error_text);
            warn!("Request failed with status {}: {}", status, message);
            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound(message));
            }
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response and extract `data` from a successful envelope
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let envelope = self.handle_envelope::<T>(response).await?;

        if !envelope.success {
            let message = envelope
                .error_message()
                .unwrap_or("Request was not successful")
                .to_string();
            warn!("API reported failure: {}", message);
            return Err(ClientError::api_error(status, message));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::ParseError("Response envelope is missing data".into()))
    }

    /// Handle an API response that carries no data (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let status = response.status().as_u16();
        let envelope = self
            .handle_envelope::<serde_json::Value>(response)
            .await?;

        if !envelope.success {
            let message = envelope
                .error_message()
                .unwrap_or("Request was not successful")
                .to_string();
            warn!("API reported failure: {}", message);
            return Err(ClientError::api_error(status, message));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = QuillClient::new(ClientConfig::new("qk_test")).unwrap();
        assert_eq!(client.base_url(), "https://api.quill.dev");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let config = ClientConfig::new("qk_test").with_base_url("http://localhost:8080/");
        let client = QuillClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let err = QuillClient::new(ClientConfig::new("")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let config = ClientConfig::new("qk_test").with_base_url("http://localhost:8080");
        let client = QuillClient::with_client(config, http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_url_encodes_each_segment() {
        let client = QuillClient::new(ClientConfig::new("qk_test")).unwrap();
        let url = client
            .url(&["v1", "generate", "../../account?x=", "status"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.quill.dev/v1/generate/..%2F..%2Faccount%3Fx=/status"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let config = ClientConfig::new("qk_test").with_base_url("http://localhost:8080/api/");
        let client = QuillClient::new(config).unwrap();
        let url = client.url(&["v1", "files", "f 1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/files/f%201");
    }

    #[test]
    fn test_url_rejects_dot_segments() {
        let client = QuillClient::new(ClientConfig::new("qk_test")).unwrap();
        for bad in ["..", ".", ""] {
            let err = client.url(&["v1", "publications", bad]).unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));
        }
    }
}
