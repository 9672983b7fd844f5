//! Template Check - Consistency between a template and its fields
//!
//! Compilation silently drops placeholders that have no value. This report
//! lets catalog tooling surface such mismatches up front instead.

use serde::Serialize;

use super::compiler::{extract_placeholders, placeholder_tokens};
use crate::domain::entities::FieldSchema;

/// Placeholders found in a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateReport {
    pub placeholders: Vec<String>,
    /// Placeholders written with surrounding whitespace, e.g. `{{ name }}`,
    /// which compilation never fills
    pub padded_placeholders: Vec<String>,
}

/// Placeholder/field mismatches for one template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    /// Placeholders with no field of the same key
    pub unknown_placeholders: Vec<String>,
    /// Fields never referenced by the template
    pub unused_fields: Vec<String>,
    /// Padded placeholders; a field with the trimmed key never reaches them
    pub padded_placeholders: Vec<String>,
}

impl SchemaMismatch {
    pub fn is_empty(&self) -> bool {
        self.unknown_placeholders.is_empty()
            && self.unused_fields.is_empty()
            && self.padded_placeholders.is_empty()
    }
}

/// Scan a template for its placeholders
pub fn check_template(template: &str) -> TemplateReport {
    let mut padded_placeholders: Vec<String> = Vec::new();
    for raw in placeholder_tokens(template) {
        let key = raw.trim();
        if key != raw && !padded_placeholders.iter().any(|k| k == key) {
            padded_placeholders.push(key.to_string());
        }
    }

    TemplateReport {
        placeholders: extract_placeholders(template),
        padded_placeholders,
    }
}

impl TemplateReport {
    /// A template with no placeholders takes no input
    pub fn is_valid(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// Compare the placeholders with a field list
    pub fn against(&self, fields: &[FieldSchema]) -> SchemaMismatch {
        let unknown_placeholders = self
            .placeholders
            .iter()
            .filter(|p| !fields.iter().any(|f| f.key == **p))
            .cloned()
            .collect();

        let unused_fields = fields
            .iter()
            .filter(|f| !self.placeholders.contains(&f.key))
            .map(|f| f.key.clone())
            .collect();

        SchemaMismatch {
            unknown_placeholders,
            unused_fields,
            padded_placeholders: self.padded_placeholders.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FieldKind;

    #[test]
    fn test_report_validity() {
        assert!(check_template("Hi {{name}}").is_valid());
        assert!(!check_template("Hi there").is_valid());
    }

    #[test]
    fn test_mismatch() {
        let fields = [
            FieldSchema::new("name", "Name", FieldKind::Text),
            FieldSchema::new("tone", "Tone", FieldKind::SingleSelect),
        ];
        let mismatch = check_template("{{name}} writes {{topic}}").against(&fields);

        assert_eq!(mismatch.unknown_placeholders, ["topic"]);
        assert_eq!(mismatch.unused_fields, ["tone"]);
        assert!(!mismatch.is_empty());
    }

    #[test]
    fn test_consistent_template() {
        let fields = [FieldSchema::new("name", "Name", FieldKind::Text)];
        assert!(check_template("Hi {{name}}!").against(&fields).is_empty());
    }

    #[test]
    fn test_padded_placeholder_is_reported() {
        let fields = [FieldSchema::new("name", "Name", FieldKind::Text)];
        let report = check_template("Hi {{ name }}, {{name}} and {{ name}}!");
        assert_eq!(report.placeholders, ["name"]);

        let mismatch = report.against(&fields);
        assert!(mismatch.unknown_placeholders.is_empty());
        assert!(mismatch.unused_fields.is_empty());
        assert_eq!(mismatch.padded_placeholders, ["name"]);
        assert!(!mismatch.is_empty());
    }
}
