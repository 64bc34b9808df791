//! Response Normalizer — turns raw, unreliable LLM text into a
//! schema-complete JSON payload.
//!
//! Pipeline: fail on empty output → trim → strip one markdown fence pair →
//! balanced-brace extraction of the first JSON object → parse → fill schema
//! defaults → per-field coercion. Errors here are terminal for the request;
//! retries happen upstream in the model caller only.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

pub mod schema;

use schema::{coerce_text, ResponseSchema};

/// Maximum characters of offending text carried in a syntax error.
const PREVIEW_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("empty response from LLM")]
    EmptyOutput,

    #[error("no JSON object found in LLM output")]
    NoJsonFound,

    #[error("JSON syntax error: {message} (preview: {preview})")]
    JsonSyntax { message: String, preview: String },
}

/// Normalizes raw model output against `schema`.
///
/// Guarantees on success: the result's key set is a superset of the schema's,
/// every value is a string or number, and re-normalizing the serialized result
/// yields the same payload.
pub fn normalize(raw: &str, schema: &ResponseSchema) -> Result<Map<String, Value>, NormalizeError> {
    debug!("Normalizing model output against {} schema", schema.name);
    let payload = extract_payload(raw)?;
    Ok(repair(payload, schema))
}

/// Extraction half of the pipeline: locates and parses the JSON object, with
/// generic text coercion applied, but no schema repair. Used directly by the
/// GitHub profile feature, whose chart fields are computed locally rather
/// than repaired from the model.
pub fn extract_payload(raw: &str) -> Result<Map<String, Value>, NormalizeError> {
    if raw.trim().is_empty() {
        return Err(NormalizeError::EmptyOutput);
    }

    let text = strip_fences(raw.trim());
    let span = extract_object_span(text).ok_or_else(|| {
        error!("No JSON object found in LLM output");
        NormalizeError::NoJsonFound
    })?;

    let value: Value = serde_json::from_str(span).map_err(|e| {
        let preview: String = span.chars().take(PREVIEW_LEN).collect();
        error!("JSON parsing failed: {e}; problematic text preview: {preview}");
        NormalizeError::JsonSyntax {
            message: e.to_string(),
            preview,
        }
    })?;

    match value {
        Value::Object(map) => Ok(map),
        // Unreachable in practice: the span starts at `{`.
        _ => Err(NormalizeError::NoJsonFound),
    }
}

fn repair(payload: Map<String, Value>, schema: &ResponseSchema) -> Map<String, Value> {
    let mut data = payload;

    // Missing or explicitly-null schema keys get a type-appropriate default.
    for field in schema.fields {
        let absent = matches!(data.get(field.name), None | Some(Value::Null));
        if absent {
            data.insert(field.name.to_string(), field.default_value());
        }
    }

    // Coerce everything present to a primitive. Keys outside the schema get
    // the generic text rule.
    let mut normalized = Map::new();
    for (key, value) in data {
        let coerced = match schema.field(&key) {
            Some(field) => field.coerce(value),
            None => coerce_text(value),
        };
        normalized.insert(key, coerced);
    }
    normalized
}

/// Strips one leading fence line (``` with an optional language tag) and one
/// trailing closing fence. Absent fences are fine.
fn strip_fences(text: &str) -> &str {
    let mut text = text;

    if let Some(rest) = text.strip_prefix("```") {
        if let Some(newline) = rest.find('\n') {
            let tag = rest[..newline].trim_end_matches('\r');
            if tag.chars().all(|c| c.is_ascii_alphabetic()) {
                text = &rest[newline + 1..];
            }
        }
    }

    if let Some(stripped) = text.trim_end().strip_suffix("```") {
        if let Some(without_newline) = stripped.strip_suffix('\n') {
            text = without_newline;
        }
    }

    text
}

/// Finds the first `{` and its matching `}` by depth counting, ignoring
/// braces inside string literals (including escaped quotes). An object that
/// never closes yields the remainder of the text so the parser can report a
/// proper syntax error with a preview.
fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    // Unterminated object: hand the rest to the parser for diagnostics.
    Some(&text[start..])
}
