//! Template Compiler - Fills `{{key}}` placeholders with form values
//!
//! Compilation never fails. Known placeholders get the sanitized value,
//! unknown ones are dropped, and the result is tidied up:
//!
//! ```
//! use promptkit::{compile, FormValues};
//!
//! let mut values = FormValues::new();
//! values.insert("name".into(), "Ada".into());
//! assert_eq!(compile("Hello {{name}}, {{missing}}!", &values), "Hello Ada, !");
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::{FieldValue, FormValues};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute `values` into `template`
///
/// The template is scanned once, left to right. Inserted values are never
/// rescanned, so a value containing `{{other}}` stays literal text.
pub fn compile(template: &str, values: &FormValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start..];

        match placeholder_at(after_open) {
            Some((key, len)) if values.contains_key(key) => {
                out.push_str(&sanitize_value(&values[key]));
                rest = &after_open[len..];
            }
            // `{{{key}}}`: the brace stays literal when a known key follows it
            Some((key, _)) if key.starts_with('{') && known_at(&after_open[1..], values) => {
                out.push('{');
                rest = &after_open[1..];
            }
            Some((_, len)) => rest = &after_open[len..],
            None => {
                out.push('{');
                rest = &after_open[1..];
            }
        }
    }
    out.push_str(rest);

    collapse_blank_lines(&out).trim().to_string()
}

/// Render a value for insertion into a template
///
/// Text has HTML-significant characters escaped in a single pass and is
/// trimmed. Numbers and booleans are rendered plainly.
pub fn sanitize_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => escape_html(s).trim().to_string(),
        other => other.to_string(),
    }
}

/// Distinct placeholder names in first-seen order, whitespace trimmed
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for raw in placeholder_tokens(template) {
        let key = raw.trim();
        if !found.iter().any(|k| k == key) {
            found.push(key.to_string());
        }
    }
    found
}

/// Raw inner text of every `{{...}}` token, untrimmed, in template order
pub(crate) fn placeholder_tokens(template: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start..];
        match placeholder_at(after_open) {
            Some((inner, len)) => {
                tokens.push(inner);
                rest = &after_open[len..];
            }
            None => rest = &after_open[1..],
        }
    }
    tokens
}

/// Match `{{inner}}` at the start of `s`, returning `(inner, token_len)`
///
/// `inner` is non-empty and runs up to the first `}`, which must open `}}`.
fn placeholder_at(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix(OPEN)?;
    let end = body.find('}')?;
    let inner = &body[..end];

    if inner.is_empty() || !body[end..].starts_with(CLOSE) {
        return None;
    }
    Some((inner, OPEN.len() + end + CLOSE.len()))
}

/// Whether a token for a key in `values` starts at `s`, past any extra `{`
fn known_at(s: &str, values: &FormValues) -> bool {
    match placeholder_at(s) {
        Some((key, _)) if values.contains_key(key) => true,
        Some((key, _)) if key.starts_with('{') => known_at(&s[1..], values),
        _ => false,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n\s*\n").expect("static regex"))
}

/// At most one blank line between paragraphs
fn collapse_blank_lines(s: &str) -> String {
    let mut current = s.to_string();
    while blank_lines().is_match(&current) {
        current = blank_lines().replace_all(&current, "\n\n").into_owned();
    }
    current
}
