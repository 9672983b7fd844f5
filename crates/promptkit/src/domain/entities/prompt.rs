//! Prompt - Prompt templates and their form schema
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use super::FieldSchema;

/// PromptTemplate - A named template with its input fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptTemplate {
    /// Stable identifier, also the draft storage key
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    /// Template text with `{{key}}` placeholders
    pub template: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(id: impl Into<String>, template: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            icon: String::new(),
            description: String::new(),
            template: template.into(),
            fields,
            tags: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Whether any tag equals `tag` (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
