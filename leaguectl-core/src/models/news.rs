//! News records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults;
use super::validation::{blank_to_none, require, ValidationError};
use super::{Entity, EntityInput, Table};

/// News article as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default = "defaults::author", deserialize_with = "defaults::null_as_author")]
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for News {
    const TABLE: Table = Table::News;
    const RESOURCE: &'static str = "news";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Omitted or blank ⇒ "site administration"
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    /// Admin-authored news goes out published unless told otherwise
    #[serde(default = "defaults::yes")]
    pub published: bool,
}

impl Default for NewsInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            author: None,
            image_url: None,
            is_featured: false,
            published: true,
        }
    }
}

impl NewsInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

impl EntityInput for NewsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("content", &self.content)
    }

    fn normalized(&self) -> Self {
        let this = self.clone();
        Self {
            author: Some(defaults::text_or(this.author, defaults::author)),
            image_url: blank_to_none(this.image_url),
            ..this
        }
    }
}

/// Maximum articles in the front-page featured strip
pub const FEATURED_LIMIT: u32 = 5;

/// Filter for published news listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFilter {
    /// Restrict to `is_featured = true`
    #[serde(default)]
    pub featured: bool,
    /// Cap the number of articles returned
    #[serde(default)]
    pub limit: Option<u32>,
}

impl NewsFilter {
    pub fn featured() -> Self {
        Self {
            featured: true,
            limit: Some(FEATURED_LIMIT),
        }
    }
}
