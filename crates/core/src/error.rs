//! Core error type and the structured error-body parser.
//!
//! The backend reports failures in several shapes: `{"detail": "..."}`
//! (FastAPI-style), `{"message": "..."}`, or a keyed field-error object
//! `{"notes": ["too long"], "car": ["unknown id"]}`. The fallback order
//! is a documented contract, implemented here as one pure function
//! instead of inline conditional branching at every call site.

use crate::types::DbId;

/// Errors produced by pure domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },
}

/// Reduce a structured error body to a single human-readable message.
///
/// Fallback order:
/// 1. top-level `detail` string
/// 2. top-level `message` string
/// 3. `"{field}: {messages joined with ', '}"` for every remaining key,
///    joined with `"; "` (keys in map order)
///
/// Returns `None` when the body carries none of these shapes — callers
/// then fall back to the raw HTTP status text.
pub fn validation_message(body: &serde_json::Value) -> Option<String> {
    let map = body.as_object()?;

    if let Some(detail) = map.get("detail").and_then(|v| v.as_str()) {
        return Some(detail.to_string());
    }
    if let Some(message) = map.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    let field_errors: Vec<String> = map
        .iter()
        .filter(|(key, _)| *key != "detail" && *key != "message")
        .filter_map(|(field, value)| {
            let messages = field_error_messages(value)?;
            Some(format!("{field}: {}", messages.join(", ")))
        })
        .collect();

    if field_errors.is_empty() {
        None
    } else {
        Some(field_errors.join("; "))
    }
}

/// Collect the messages for one field's error value.
///
/// Accepts an array of strings or a single string; anything else yields
/// `None` and the field is skipped.
fn field_error_messages(value: &serde_json::Value) -> Option<Vec<String>> {
    match value {
        serde_json::Value::String(s) => Some(vec![s.clone()]),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages)
            }
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
