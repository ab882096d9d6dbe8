//! Error types for the Quill client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Quill client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code or an unsuccessful envelope
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The API answered 404
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request, rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Local I/O failure (e.g. reading a file to upload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote generation job reported a terminal failure
    #[error("{message}")]
    JobFailed {
        /// Fixed message naming the kind of job
        message: String,
    },

    /// The job did not reach a terminal state within the allowed attempts
    #[error("{message}")]
    JobTimeout {
        /// Fixed message naming the kind of job
        message: String,
    },

    /// A status check returned `success: false` and the poll policy treats that as fatal
    #[error("Status check failed: {message}")]
    StatusCheckFailed {
        /// Error text from the envelope
        message: String,
    },

    /// Polling was abandoned through its cancellation token
    #[error("Polling cancelled")]
    Cancelled,
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::ApiError { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if this error is a terminal outcome of a polled job
    pub fn is_terminal_job_error(&self) -> bool {
        matches!(self, Self::JobFailed { .. } | Self::JobTimeout { .. })
    }
}
