//! Validator - Checks form values against a field schema
//!
//! Produces at most one error per field, in field order. Errors are a
//! report for the caller to display, never a failure of the call.

use crate::domain::entities::{format_number, FieldKind, FieldSchema, FieldValue, FormValues, ValidationError};

/// Validate every field of `fields` against `values`
pub fn validate(fields: &[FieldSchema], values: &FormValues) -> Vec<ValidationError> {
    fields
        .iter()
        .filter_map(|field| validate_field(field, values.get(&field.key)))
        .collect()
}

/// Validate a single field; the first failing check wins
pub fn validate_field(field: &FieldSchema, value: Option<&FieldValue>) -> Option<ValidationError> {
    let value = match value {
        Some(v) if !v.is_blank() => v,
        _ if field.required => return Some(error(field, "is required")),
        _ => return None,
    };

    match field.kind {
        FieldKind::Text | FieldKind::MultilineText => check_text(field, value),
        FieldKind::Number => check_number(field, value),
        FieldKind::SingleSelect | FieldKind::RadioChoice => check_choice(field, value),
        FieldKind::Boolean => value
            .as_bool()
            .is_none()
            .then(|| error(field, "must be checked or unchecked")),
    }
}

fn check_text(field: &FieldSchema, value: &FieldValue) -> Option<ValidationError> {
    let Some(text) = value.as_text() else {
        return Some(error(field, "must be text"));
    };

    let length = text.chars().count() as f64;
    if let Some(min) = field.min {
        if length < min {
            return Some(error(
                field,
                &format!("must be at least {} characters", format_number(min)),
            ));
        }
    }
    if let Some(max) = field.max {
        if length > max {
            return Some(error(
                field,
                &format!("must be no more than {} characters", format_number(max)),
            ));
        }
    }

    match field.compiled_pattern() {
        Ok(Some(regex)) if !regex.is_match(text) => Some(error(field, "format is invalid")),
        Ok(_) => None,
        Err(e) => {
            tracing::error!("Field schema defect: {}", e);
            Some(error(field, "format is invalid"))
        }
    }
}

fn check_number(field: &FieldSchema, value: &FieldValue) -> Option<ValidationError> {
    let Some(n) = value.as_number() else {
        return Some(error(field, "must be a number"));
    };

    if let Some(min) = field.min {
        if n < min {
            return Some(error(field, &format!("must be at least {}", format_number(min))));
        }
    }
    if let Some(max) = field.max {
        if n > max {
            return Some(error(field, &format!("must be no more than {}", format_number(max))));
        }
    }
    None
}

fn check_choice(field: &FieldSchema, value: &FieldValue) -> Option<ValidationError> {
    let options = field.options.as_ref()?;
    let value = value.to_string();

    if options.iter().any(|o| *o == value) {
        None
    } else {
        Some(error(field, &format!("must be one of: {}", options.join(", "))))
    }
}

fn error(field: &FieldSchema, what: &str) -> ValidationError {
    ValidationError::new(&field.key, format!("{} {}", field.label, what))
}
