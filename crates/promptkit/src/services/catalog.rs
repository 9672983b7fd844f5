//! Catalog - Read-only set of prompt templates
//!
//! Loaded once at startup. Structural defects that would make a template
//! unusable (duplicate ids or keys, broken patterns) are rejected here;
//! placeholder/field mismatches are only logged.

use std::collections::HashSet;

use crate::domain::{check_template, DomainError, PromptTemplate};

/// Ordered, immutable template catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<PromptTemplate>,
}

impl Catalog {
    /// Parse a JSON array of templates
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let templates: Vec<PromptTemplate> = serde_json::from_str(json)?;
        Self::from_templates(templates)
    }

    /// Build a catalog, checking every template
    pub fn from_templates(templates: Vec<PromptTemplate>) -> Result<Self, DomainError> {
        let mut ids = HashSet::new();

        for template in &templates {
            if !ids.insert(template.id.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate template id '{}'",
                    template.id
                )));
            }
            Self::check_fields(template)?;

            let mismatch = check_template(&template.template).against(&template.fields);
            if !mismatch.unknown_placeholders.is_empty() {
                tracing::warn!(
                    "Template '{}' has placeholders without fields: {}",
                    template.id,
                    mismatch.unknown_placeholders.join(", ")
                );
            }
            if !mismatch.unused_fields.is_empty() {
                tracing::warn!(
                    "Template '{}' has fields it never uses: {}",
                    template.id,
                    mismatch.unused_fields.join(", ")
                );
            }
            if !mismatch.padded_placeholders.is_empty() {
                tracing::warn!(
                    "Template '{}' has padded placeholders that are never filled: {}",
                    template.id,
                    mismatch.padded_placeholders.join(", ")
                );
            }
        }

        tracing::debug!("📚 Loaded {} prompt templates", templates.len());
        Ok(Self { templates })
    }

    fn check_fields(template: &PromptTemplate) -> Result<(), DomainError> {
        let mut keys = HashSet::new();
        for field in &template.fields {
            if !keys.insert(field.key.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate field key '{}' in template '{}'",
                    field.key, template.id
                )));
            }
            field.compiled_pattern()?;
        }
        Ok(())
    }

    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Find a template by id
    pub fn find(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Find a template by id, or a not-found error
    pub fn get(&self, id: &str) -> Result<&PromptTemplate, DomainError> {
        self.find(id)
            .ok_or_else(|| DomainError::not_found("PromptTemplate", id))
    }

    /// Templates carrying `tag`
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a PromptTemplate> + 'a {
        self.templates.iter().filter(move |t| t.has_tag(tag))
    }

    /// Case-insensitive search over title, description and tags
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a PromptTemplate> + 'a {
        let query = query.trim().to_lowercase();
        self.templates.iter().filter(move |t| {
            query.is_empty()
                || t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
                || t.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
        })
    }
}
