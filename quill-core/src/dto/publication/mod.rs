//! Publication DTOs

use serde::{Deserialize, Serialize};

use crate::domain::publication::{ContentType, PublicationStatus};

/// Partial update of a publication; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePublication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdatePublication {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.status.is_none() && self.tags.is_none()
    }
}

/// Query string for listing publications
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPublicationsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
