//! Generation job domain types
//!
//! A generation job is started with a single or bulk request and then
//! observed through its status endpoint until it reaches a terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an asynchronous generation job
///
/// Issued by the API when a job is started and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a session identifier, rejecting the empty string
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state reported by a generation status check
///
/// Unknown values are kept verbatim so new server-side states are treated
/// as in-progress rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    Pending,
    Generating,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl JobState {
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Pending => "pending",
            JobState::Generating => "generating",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::Other(other) => other,
        }
    }

    /// `completed` or `failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

impl From<String> for JobState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => JobState::Pending,
            "generating" => JobState::Generating,
            "processing" => JobState::Processing,
            "completed" => JobState::Completed,
            "failed" => JobState::Failed,
            _ => JobState::Other(value),
        }
    }
}

impl From<JobState> for String {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a status check that exposes a job state
///
/// Implemented by every status type a poller can observe. `None` means the
/// payload carried no `status` field.
pub trait StatusReport {
    fn state(&self) -> Option<&JobState>;
}

/// Response to a single or bulk generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStarted {
    pub session_id: SessionId,
    #[serde(default = "pending")]
    pub status: JobState,
}

fn pending() -> JobState {
    JobState::Pending
}

/// Status of a single publication generation
///
/// Every field is optional: a poller only needs `status`, and servers omit
/// the rest freely while a job is in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStatus {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub status: Option<JobState>,
    /// Completion percentage (0-100) while generating
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Set once the generated content has been stored as a publication
    #[serde(default)]
    pub publication_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusReport for GenerationStatus {
    fn state(&self) -> Option<&JobState> {
        self.status.as_ref()
    }
}

/// Status of a bulk generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkGenerationStatus {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub status: Option<JobState>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub results: Vec<BulkItemResult>,
}

impl StatusReport for BulkGenerationStatus {
    fn state(&self) -> Option<&JobState> {
        self.status.as_ref()
    }
}

/// Outcome of one item in a bulk generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemResult {
    /// Position of the item in the bulk request
    pub index: u32,
    #[serde(default)]
    pub status: Option<JobState>,
    #[serde(default)]
    pub publication_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
