//! Generation request DTOs

use serde::{Deserialize, Serialize};

use crate::domain::publication::ContentType;

/// Maximum number of items accepted in one bulk generation request
pub const MAX_BULK_ITEMS: usize = 100;

/// Request to generate a single publication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// IDs of previously uploaded files to use as reference material
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            topic: topic.into(),
            content_type,
            tone: None,
            language: None,
            word_count: None,
            keywords: Vec::new(),
            template_id: None,
            file_ids: Vec::new(),
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = Some(word_count);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_file(mut self, file_id: impl Into<String>) -> Self {
        self.file_ids.push(file_id.into());
        self
    }
}

/// Request to generate several publications in one job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkGenerateRequest {
    pub items: Vec<GenerateRequest>,
}

impl BulkGenerateRequest {
    pub fn new(items: Vec<GenerateRequest>) -> Self {
        Self { items }
    }
}
