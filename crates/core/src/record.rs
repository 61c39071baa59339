//! The server-owned log record model and its update wire body.
//!
//! A [`LogRecord`] describes one uploaded MCAP recording's metadata. The
//! client never constructs or mutates one outside of round-tripping
//! through the API: records are created by upload, changed by
//! PATCH/PUT, destroyed by DELETE, and the local collection is only ever
//! replaced wholesale by a refetch.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Processing status labels
// ---------------------------------------------------------------------------

/// Backend processing completed successfully.
pub const STATUS_SUCCESS: &str = "success";

/// Whether a recovery/parse status label is the known-good outcome.
///
/// Anything other than `"success"` (including a missing status) renders
/// as a warning state.
pub fn status_is_success(status: Option<&str>) -> bool {
    status == Some(STATUS_SUCCESS)
}

// ---------------------------------------------------------------------------
// Lookup references
// ---------------------------------------------------------------------------

/// Reference to a lookup entity (vehicle, operator, or event category)
/// as it appears inside a log record.
///
/// The canonical shape is the identifier-bearing [`LookupRef::Linked`]
/// object. Older backend revisions returned a bare display name instead;
/// that form still deserializes (untagged fallback) and is resolved back
/// to an identifier by reverse lookup, but the client never emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupRef {
    /// Canonical foreign-key object.
    Linked { id: DbId, name: String },
    /// Deprecated inline display name.
    Name(String),
}

impl LookupRef {
    /// The display name carried inline, regardless of shape.
    pub fn display_name(&self) -> &str {
        match self {
            LookupRef::Linked { name, .. } => name,
            LookupRef::Name(name) => name,
        }
    }

    /// The identifier, if this reference carries one.
    pub fn id(&self) -> Option<DbId> {
        match self {
            LookupRef::Linked { id, .. } => Some(*id),
            LookupRef::Name(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Log record
// ---------------------------------------------------------------------------

/// Metadata for one uploaded MCAP recording, as returned by the backend.
///
/// Every field except `id` is optional: recovery may not have produced a
/// value, and the schema has grown over backend revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Server-assigned identifier, immutable, unique within the
    /// collection view.
    pub id: DbId,
    pub recovery_status: Option<String>,
    pub parse_status: Option<String>,
    pub captured_at: Option<Timestamp>,
    pub duration_seconds: Option<f64>,
    pub channel_count: Option<i64>,
    /// Channel names recovered from the recording.
    #[serde(default)]
    pub channels_summary: Option<Vec<String>>,
    /// Free-text rough-location string.
    pub rough_point: Option<String>,
    pub car: Option<LookupRef>,
    pub driver: Option<LookupRef>,
    pub event_type: Option<LookupRef>,
    pub notes: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl LogRecord {
    /// `true` when both recovery and parse report success.
    pub fn fully_processed(&self) -> bool {
        status_is_success(self.recovery_status.as_deref())
            && status_is_success(self.parse_status.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Update wire body
// ---------------------------------------------------------------------------

/// JSON body for PATCH/PUT updates to a log record.
///
/// Lookup references are sent as numeric identifiers or `null` (clearing
/// the association). All four fields are always serialized; the HTTP
/// verb, not the body shape, selects partial-merge vs full-replace
/// semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogUpdate {
    pub car: Option<DbId>,
    pub driver: Option<DbId>,
    pub event_type: Option<DbId>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
