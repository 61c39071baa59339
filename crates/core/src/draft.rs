//! The transient edit draft behind the edit modal.
//!
//! Lookup references are held as stringified identifiers for form
//! binding; conversion back to a wire body happens on save. The draft is
//! created when an edit opens, seeded from the selected record, and
//! discarded on modal close or after a successful save.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::lookup::LookupDirectory;
use crate::record::{LogRecord, LogUpdate, LookupRef};
use crate::types::DbId;

/// Client-local form state for editing one log record. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
    /// Vehicle identifier as a string; empty means "no association".
    pub car: String,
    /// Operator identifier as a string; empty means "no association".
    pub driver: String,
    /// Event-category identifier as a string; empty means "no association".
    pub event_type: String,
    pub notes: String,
}

impl EditDraft {
    /// Seed a draft from the selected record.
    ///
    /// A canonical foreign-key reference contributes its identifier
    /// directly; a deprecated inline name is reverse-resolved through the
    /// lookup directory. A reference that cannot be resolved seeds an
    /// empty field rather than a bogus identifier.
    pub fn from_record(record: &LogRecord, lookups: &LookupDirectory) -> Self {
        Self {
            car: seed_ref(record.car.as_ref(), lookups),
            driver: seed_ref(record.driver.as_ref(), lookups),
            event_type: seed_ref(record.event_type.as_ref(), lookups),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Convert the draft into an update wire body.
    ///
    /// Empty fields become `null`; a non-empty, non-numeric identifier
    /// field is a local validation failure — no request is issued for it.
    pub fn to_update(&self) -> Result<LogUpdate, CoreError> {
        Ok(LogUpdate {
            car: parse_ref_field("car", &self.car)?,
            driver: parse_ref_field("driver", &self.driver)?,
            event_type: parse_ref_field("event type", &self.event_type)?,
            notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
        })
    }
}

fn seed_ref(reference: Option<&LookupRef>, lookups: &LookupDirectory) -> String {
    reference
        .and_then(|r| lookups.resolve_id(r))
        .map(|id| id.to_string())
        .unwrap_or_default()
}

fn parse_ref_field(label: &str, value: &str) -> Result<Option<DbId>, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<DbId>().map(Some).map_err(|_| {
        CoreError::Validation(format!("{label} must be a numeric id, got '{trimmed}'"))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
