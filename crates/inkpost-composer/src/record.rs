use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author shown when the commenter leaves the name blank
pub const DEFAULT_AUTHOR: &str = "訪客";

/// Store-assigned identifier of a comment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persisted comment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedComment {
    pub post_id: String,
    pub post_title: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Canonical comment markdown
    pub content: String,
    /// Assigned by the store on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

impl SerializedComment {
    pub fn new(
        post_id: impl Into<String>,
        post_title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            post_title: post_title.into(),
            author: DEFAULT_AUTHOR.to_string(),
            email: None,
            website: None,
            content: content.into(),
            created_at: None,
            is_visible: true,
        }
    }

    /// Set the author; a blank name keeps the current one
    pub fn with_author(mut self, author: &str) -> Self {
        if let Some(author) = non_blank(author) {
            self.author = author;
        }
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = non_blank(email);
        self
    }

    pub fn with_website(mut self, website: &str) -> Self {
        self.website = non_blank(website);
        self
    }
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_visible() -> bool {
    true
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
