//! Job poller
//!
//! Waits for an asynchronous generation job by repeatedly checking its status
//! until it completes, fails, or runs out of attempts. The poller knows
//! nothing about HTTP; status checks go through a [`StatusFetcher`].

use async_trait::async_trait;
use quill_core::domain::generation::{JobState, SessionId, StatusReport};
use quill_core::dto::response::ApiResponse;
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};

/// Performs one status check for a job
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Job-specific status data carried in the envelope
    type Data: StatusReport + Send;

    async fn fetch(&self, handle: &SessionId) -> Result<ApiResponse<Self::Data>>;
}

/// What to do with a status check that returned `success: false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsuccessfulPolicy {
    /// Treat it as still pending and keep polling
    #[default]
    KeepPolling,
    /// Stop polling with [`ClientError::StatusCheckFailed`]
    Fail,
}

/// Attempt budget and pacing of a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status checks (must be at least 1)
    pub max_attempts: u32,
    /// Pause between two status checks
    pub delay: Duration,
    pub unsuccessful: UnsuccessfulPolicy,
}

impl PollConfig {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            unsuccessful: UnsuccessfulPolicy::default(),
        }
    }

    pub fn with_unsuccessful_policy(mut self, policy: UnsuccessfulPolicy) -> Self {
        self.unsuccessful = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ClientError::InvalidRequest(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Describes a kind of job: its default pacing and terminal error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobKind {
    pub label: &'static str,
    pub default_max_attempts: u32,
    pub default_delay: Duration,
    pub failed_message: &'static str,
    pub timeout_message: &'static str,
}

impl JobKind {
    /// Single publication generation: 60 attempts, 5s apart
    pub const SINGLE: JobKind = JobKind {
        label: "generation",
        default_max_attempts: 60,
        default_delay: Duration::from_secs(5),
        failed_message: "Publication generation failed",
        timeout_message: "Publication generation timed out",
    };

    /// Bulk generation: 120 attempts, 10s apart
    pub const BULK: JobKind = JobKind {
        label: "bulk generation",
        default_max_attempts: 120,
        default_delay: Duration::from_secs(10),
        failed_message: "Bulk generation failed",
        timeout_message: "Bulk generation timed out",
    };

    pub fn default_config(&self) -> PollConfig {
        PollConfig::new(self.default_max_attempts, self.default_delay)
    }
}

/// Bounded wait for one job to reach a terminal state
#[derive(Debug, Clone)]
pub struct Poller {
    kind: JobKind,
    config: PollConfig,
    cancel: Option<CancellationToken>,
}

impl Poller {
    pub fn new(kind: JobKind, config: PollConfig) -> Self {
        Self {
            kind,
            config,
            cancel: None,
        }
    }

    /// Poller using the kind's default attempt budget and delay
    pub fn for_kind(kind: JobKind) -> Self {
        Self::new(kind, kind.default_config())
    }

    /// Abandon the poll with [`ClientError::Cancelled`] once `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `handle` until it completes, fails, or the attempts run out
    ///
    /// Returns the completed status payload. Errors from `fetcher` are
    /// returned as-is on the attempt they occur.
    pub async fn wait<F>(&self, handle: &SessionId, fetcher: &F) -> Result<ApiResponse<F::Data>>
    where
        F: StatusFetcher + ?Sized,
    {
        self.config.validate()?;
        if handle.is_empty() {
            return Err(ClientError::InvalidRequest(
                "session id cannot be empty".into(),
            ));
        }

        let max_attempts = self.config.max_attempts;

        for attempt in 0..max_attempts {
            self.check_cancelled()?;

            let payload = fetcher.fetch(handle).await?;

            if payload.success {
                match payload.state().cloned() {
                    Some(JobState::Completed) => {
                        info!(
                            "{} {} completed after {} attempt(s)",
                            self.kind.label,
                            handle,
                            attempt + 1
                        );
                        return Ok(payload);
                    }
                    Some(JobState::Failed) => {
                        warn!("{} {} reported failure", self.kind.label, handle);
                        return Err(ClientError::JobFailed {
                            message: self.kind.failed_message.to_string(),
                        });
                    }
                    state => debug!(
                        "{} {} still pending (attempt {}/{}, status: {})",
                        self.kind.label,
                        handle,
                        attempt + 1,
                        max_attempts,
                        state.as_ref().map(JobState::as_str).unwrap_or("unknown")
                    ),
                }
            } else {
                let message = payload
                    .error_message()
                    .unwrap_or("status check was not successful")
                    .to_string();

                if self.config.unsuccessful == UnsuccessfulPolicy::Fail {
                    warn!("{} {} status check failed: {}", self.kind.label, handle, message);
                    return Err(ClientError::StatusCheckFailed { message });
                }

                debug!(
                    "{} {} status check unsuccessful, treating as pending (attempt {}/{}): {}",
                    self.kind.label,
                    handle,
                    attempt + 1,
                    max_attempts,
                    message
                );
            }

            if attempt + 1 < max_attempts {
                self.check_cancelled()?;
                self.pause().await?;
            }
        }

        warn!(
            "{} {} did not finish within {} attempt(s)",
            self.kind.label, handle, max_attempts
        );
        Err(ClientError::JobTimeout {
            message: self.kind.timeout_message.to_string(),
        })
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(ClientError::Cancelled),
            _ => Ok(()),
        }
    }

    async fn pause(&self) -> Result<()> {
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(ClientError::Cancelled),
                _ = time::sleep(self.config.delay) => Ok(()),
            },
            None => {
                time::sleep(self.config.delay).await;
                Ok(())
            }
        }
    }
}
