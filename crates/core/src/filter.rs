//! Client-local search over the current collection.
//!
//! Filtering is a pure, synchronous projection recomputed on every
//! render; it never touches the stored collection or its order.

use crate::lookup::LookupDirectory;
use crate::record::LogRecord;

/// Timestamp rendering used both for display and as filter haystack.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Case-insensitive substring filter over the collection.
///
/// An empty or whitespace-only query returns every record in original
/// order. Otherwise a record matches when the query occurs in any of:
/// its stringified id, the resolved car/driver/event-type names, the
/// notes, either processing status, or the formatted capture timestamp.
pub fn filter_logs<'a>(
    logs: &'a [LogRecord],
    query: &str,
    lookups: &LookupDirectory,
) -> Vec<&'a LogRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return logs.iter().collect();
    }
    logs.iter()
        .filter(|log| matches(log, &needle, lookups))
        .collect()
}

/// Whether one record matches an already-lowercased needle.
fn matches(log: &LogRecord, needle: &str, lookups: &LookupDirectory) -> bool {
    haystack_fields(log, lookups)
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn haystack_fields(log: &LogRecord, lookups: &LookupDirectory) -> Vec<String> {
    let mut fields = vec![
        log.id.to_string(),
        lookups.resolve_name(log.car.as_ref()),
        lookups.resolve_name(log.driver.as_ref()),
        lookups.resolve_name(log.event_type.as_ref()),
    ];
    if let Some(notes) = &log.notes {
        fields.push(notes.clone());
    }
    if let Some(status) = &log.recovery_status {
        fields.push(status.clone());
    }
    if let Some(status) = &log.parse_status {
        fields.push(status.clone());
    }
    if let Some(captured) = &log.captured_at {
        fields.push(captured.format(TIMESTAMP_FORMAT).to_string());
    }
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
