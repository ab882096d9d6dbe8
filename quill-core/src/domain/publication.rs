//! Publication domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored piece of generated content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub content_type: ContentType,
    pub status: PublicationStatus,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Kind of content a generation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    BlogPost,
    SocialPost,
    Newsletter,
    ProductDescription,
    Email,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Article,
        ContentType::BlogPost,
        ContentType::SocialPost,
        ContentType::Newsletter,
        ContentType::ProductDescription,
        ContentType::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::BlogPost => "blog_post",
            ContentType::SocialPost => "social_post",
            ContentType::Newsletter => "newsletter",
            ContentType::ProductDescription => "product_description",
            ContentType::Email => "email",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == normalized)
            .ok_or_else(|| format!("unknown content type '{}'", s))
    }
}

/// Publication lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    Published,
    Archived,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
            PublicationStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PublicationStatus::Draft),
            "published" => Ok(PublicationStatus::Published),
            "archived" => Ok(PublicationStatus::Archived),
            _ => Err(format!("unknown publication status '{}'", s)),
        }
    }
}

/// A reusable generation template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content_type: ContentType,
}
