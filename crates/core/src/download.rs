//! Saved-filename derivation for file downloads.
//!
//! The backend suggests a name via the `Content-Disposition` header
//! (`attachment; filename="run42.mcap"`). A missing or unparsable header
//! falls back to a synthesized `mcap-log-{id}.mcap`.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::DbId;
use crate::upload::FILE_EXTENSION;

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"filename="([^"]+)""#).expect("valid regex literal"))
}

/// Extract the suggested filename from a `Content-Disposition` value.
///
/// Only the quoted `filename="..."` form is recognized; anything else
/// (including an empty quoted name) yields `None`.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    filename_pattern()
        .captures(header)
        .map(|captures| captures[1].to_string())
        .filter(|name| !name.is_empty())
}

/// Synthesized filename used when the server suggests none.
pub fn fallback_file_name(id: DbId) -> String {
    format!("mcap-log-{id}{FILE_EXTENSION}")
}

/// Derive the name to save a download under.
pub fn suggested_file_name(header: Option<&str>, id: DbId) -> String {
    header
        .and_then(parse_content_disposition)
        .unwrap_or_else(|| fallback_file_name(id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
