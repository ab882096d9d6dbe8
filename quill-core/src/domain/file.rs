//! Uploaded file domain types

use serde::{Deserialize, Serialize};

/// A reference document uploaded for use as generation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
