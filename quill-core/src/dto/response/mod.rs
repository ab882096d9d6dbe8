//! Response envelope
//!
//! Every Quill endpoint wraps its payload in the same envelope:
//! `{ "success": bool, "data": ..., "error": "...", "message": "..." }`.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::generation::{JobState, StatusReport};

/// JSON envelope returned by every endpoint
///
/// `data` must decode as `T` when `success` is true. When `success` is
/// false it is best effort: a payload that does not fit `T` (an empty
/// array, a partial object) is dropped and `data` is `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unsuccessful envelope carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Best human-readable explanation the server gave, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

impl<T: StatusReport> ApiResponse<T> {
    /// Job state carried in `data.status`, if present
    pub fn state(&self) -> Option<&JobState> {
        self.data.as_ref().and_then(StatusReport::state)
    }
}

#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEnvelope::deserialize(deserializer)?;

        let data = match raw.data {
            None | Some(Value::Null) => None,
            Some(value) if raw.success => {
                Some(serde_json::from_value(value).map_err(D::Error::custom)?)
            }
            Some(value) => serde_json::from_value(value).ok(),
        };

        Ok(Self {
            success: raw.success,
            data,
            error: raw.error,
            message: raw.message,
        })
    }
}

/// One page of a listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.limit) < self.total
    }
}
