//! Form input: `--set key=value` parsing and interactive field prompts

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use promptkit::{FieldKind, FieldSchema, FieldValue};

const NONE_OPTION: &str = "(none)";

/// Split `key=value`
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected key=value, got '{}'", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Missing field key in '{}'", raw);
    }
    Ok((key.to_string(), value.to_string()))
}

/// Turn raw text into the value type a field expects
///
/// Text that does not fit the kind is kept as text so the validator can
/// report it.
pub fn coerce(field: Option<&FieldSchema>, raw: &str) -> FieldValue {
    let kind = field.map(|f| f.kind).unwrap_or(FieldKind::Text);
    match kind {
        FieldKind::Number => match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(raw.to_string()),
        },
        FieldKind::Boolean => match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "on" => FieldValue::Bool(true),
            "false" | "no" | "n" | "0" | "off" => FieldValue::Bool(false),
            _ => FieldValue::Text(raw.to_string()),
        },
        FieldKind::MultilineText => FieldValue::Text(raw.replace("\\n", "\n")),
        _ => FieldValue::Text(raw.to_string()),
    }
}

/// Ask for one field; `None` clears the value
pub fn prompt_field(field: &FieldSchema, current: Option<&FieldValue>) -> Result<Option<FieldValue>> {
    let mut label = field.label.clone();
    if field.required {
        label.push_str(&" *".red().to_string());
    }
    if let Some(help) = &field.help_text {
        println!("  {}", help.dimmed());
    }
    if let Some(placeholder) = &field.placeholder {
        println!("  {} {}", "e.g.".dimmed(), placeholder.dimmed());
    }

    match field.kind {
        FieldKind::Boolean => {
            let default = current.and_then(FieldValue::as_bool).unwrap_or(false);
            let checked = Confirm::new()
                .with_prompt(label)
                .default(default)
                .interact()
                .with_context(|| format!("Failed to read {}", field.key))?;
            Ok(Some(FieldValue::Bool(checked)))
        }

        FieldKind::SingleSelect | FieldKind::RadioChoice if field.options.is_some() => {
            let options = field.options.as_deref().unwrap_or_default();
            let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
            if !field.required {
                items.insert(0, NONE_OPTION);
            }

            let current = current.map(ToString::to_string);
            let default = items
                .iter()
                .position(|item| Some(*item) == current.as_deref())
                .unwrap_or(0);

            let picked = Select::new()
                .with_prompt(label)
                .items(&items)
                .default(default)
                .interact()
                .with_context(|| format!("Failed to read {}", field.key))?;

            Ok(match items[picked] {
                NONE_OPTION => None,
                item => Some(FieldValue::Text(item.to_string())),
            })
        }

        kind => {
            if kind == FieldKind::MultilineText {
                label.push_str(&" (\\n for new lines)".dimmed().to_string());
            }
            let initial = current
                .map(|v| v.to_string().replace('\n', "\\n"))
                .unwrap_or_default();

            let raw: String = Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true)
                .with_initial_text(initial)
                .interact_text()
                .with_context(|| format!("Failed to read {}", field.key))?;

            if raw.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(coerce(Some(field), &raw)))
        }
    }
}
