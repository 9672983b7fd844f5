//! Value - User-supplied form values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single form value
///
/// Untagged so that catalog and draft JSON reads naturally
/// (`"text"`, `42`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Form values keyed by field key
pub type FormValues = BTreeMap<String, FieldValue>;

impl FieldValue {
    /// Empty or whitespace-only text
    ///
    /// Numbers and booleans are never blank: an unchecked checkbox or a
    /// zero is a real answer.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Read the value as a real number
    ///
    /// Text is trimmed and parsed. Only finite values count; `NaN` and
    /// `inf` are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Plain decimal rendering: `3`, `2.5`, `-0.25`, `Infinity`
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(FieldValue::from("").is_blank());
        assert!(FieldValue::from(" \n\t").is_blank());
        assert!(!FieldValue::from(" a ").is_blank());
        assert!(!FieldValue::from(0.0).is_blank());
        assert!(!FieldValue::from(false).is_blank());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FieldValue::from(7_i64).as_number(), Some(7.0));
        assert_eq!(FieldValue::from("twelve").as_number(), None);
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::from("inf").as_number(), None);
        assert_eq!(FieldValue::from("-INF").as_number(), None);
        assert_eq!(FieldValue::from(f64::INFINITY).as_number(), None);
        assert_eq!(FieldValue::from(true).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(3.0).to_string(), "3");
        assert_eq!(FieldValue::from(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from(-0.0).to_string(), "0");
        assert_eq!(FieldValue::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(FieldValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_untagged_json() {
        let values: FormValues =
            serde_json::from_str(r#"{"name": "Ada", "age": 36, "agree": true}"#).unwrap();

        assert_eq!(values["name"], FieldValue::from("Ada"));
        assert_eq!(values["age"], FieldValue::from(36.0));
        assert_eq!(values["agree"], FieldValue::from(true));
    }
}
