//! Field - One input slot of a prompt form

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Kind of input a field accepts
///
/// Serialized with the catalog names (`text`, `textarea`, `select`,
/// `number`, `checkbox`, `radio`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    #[serde(rename = "textarea")]
    MultilineText,
    /// One of a list of options (dropdown)
    #[serde(rename = "select")]
    SingleSelect,
    /// Real number
    Number,
    /// Checked / unchecked
    #[serde(rename = "checkbox")]
    Boolean,
    /// One of a list of options (radio group)
    #[serde(rename = "radio")]
    RadioChoice,
}

impl FieldKind {
    /// Text kinds take length bounds and patterns
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::MultilineText)
    }

    /// Choice kinds take an option list
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleSelect | Self::RadioChoice)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::MultilineText => write!(f, "textarea"),
            Self::SingleSelect => write!(f, "select"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "checkbox"),
            Self::RadioChoice => write!(f, "radio"),
        }
    }
}

/// Schema of one form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Placeholder name and form-value key, unique within a template
    pub key: String,
    /// Human-readable name used in error messages
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Length bound for text kinds, value bound for numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the whole text value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Allowed values for choice kinds, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldSchema {
    /// Create an optional, unconstrained field
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            min: None,
            max: None,
            pattern: None,
            options: None,
            placeholder: None,
            help_text: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Compile `pattern` anchored to the whole value
    ///
    /// Returns `Ok(None)` when the field has no pattern.
    pub fn compiled_pattern(&self) -> Result<Option<Regex>, DomainError> {
        let Some(pattern) = &self.pattern else {
            return Ok(None);
        };

        Regex::new(&format!("^(?:{pattern})$"))
            .map(Some)
            .map_err(|source| DomainError::InvalidPattern {
                field: self.key.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_field() {
        let json = r#"{
            "key": "tone",
            "label": "Tone",
            "type": "select",
            "required": true,
            "options": ["formal", "casual"],
            "helpText": "How it should sound"
        }"#;

        let field: FieldSchema = serde_json::from_str(json).unwrap();
        assert_eq!(field.kind, FieldKind::SingleSelect);
        assert!(field.required);
        assert_eq!(field.options.as_deref().unwrap(), ["formal", "casual"]);
        assert_eq!(field.help_text.as_deref(), Some("How it should sound"));
        assert_eq!(field.min, None);
    }

    #[test]
    fn test_kind_names() {
        for (name, kind) in [
            ("\"text\"", FieldKind::Text),
            ("\"textarea\"", FieldKind::MultilineText),
            ("\"number\"", FieldKind::Number),
            ("\"checkbox\"", FieldKind::Boolean),
            ("\"radio\"", FieldKind::RadioChoice),
        ] {
            assert_eq!(serde_json::from_str::<FieldKind>(name).unwrap(), kind);
            assert_eq!(format!("\"{kind}\""), name);
        }
    }

    #[test]
    fn test_compiled_pattern_is_anchored() {
        let field = FieldSchema::new("code", "Code", FieldKind::Text).with_pattern("[a-z]+");
        let regex = field.compiled_pattern().unwrap().unwrap();

        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abc1"));
    }

    #[test]
    fn test_invalid_pattern_reports_field() {
        let field = FieldSchema::new("code", "Code", FieldKind::Text).with_pattern("(unclosed");
        match field.compiled_pattern() {
            Err(DomainError::InvalidPattern { field, .. }) => assert_eq!(field, "code"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }
}
