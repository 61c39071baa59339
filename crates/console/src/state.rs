//! The view-state store.
//!
//! One explicit, serializable struct holds everything the renderer needs;
//! the renderer is strictly read-only over it and only the
//! [`Controller`](crate::controller::Controller) mutates it. Modal
//! visibility is a single tagged variant, so "at most one modal open" is
//! a type-level invariant rather than a UI convention.

use serde::Serialize;

use paddock_core::draft::EditDraft;
use paddock_core::filter::filter_logs;
use paddock_core::geometry::FeatureCollection;
use paddock_core::lookup::LookupDirectory;
use paddock_core::record::LogRecord;
use paddock_core::types::DbId;

/// Per-operation in-flight markers.
///
/// Each flag is set immediately before its request and cleared in a
/// guaranteed step after the request settles, success or failure.
/// Downloads track *which* record is in flight so concurrent per-row
/// actions stay independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BusyFlags {
    pub listing: bool,
    pub uploading: bool,
    pub fetching_log: bool,
    pub saving: bool,
    pub deleting: bool,
    pub fetching_geometry: bool,
    pub loading_summary: bool,
    pub downloading: Option<DbId>,
}

impl BusyFlags {
    /// Labels of every currently active operation, for display.
    pub fn active(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.listing {
            labels.push("refreshing");
        }
        if self.uploading {
            labels.push("uploading");
        }
        if self.fetching_log {
            labels.push("loading log");
        }
        if self.saving {
            labels.push("saving");
        }
        if self.deleting {
            labels.push("deleting");
        }
        if self.fetching_geometry {
            labels.push("loading track");
        }
        if self.loading_summary {
            labels.push("loading summary");
        }
        if self.downloading.is_some() {
            labels.push("downloading");
        }
        labels
    }
}

/// The single open modal, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Modal {
    #[default]
    None,
    Viewing(DbId),
    Editing(DbId),
    ConfirmingDelete(DbId),
    ShowingMap {
        log_id: DbId,
        /// `None` when the geometry fetch failed or was absent.
        geometry: Option<FeatureCollection>,
    },
}

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    /// Collection snapshot, order exactly as returned by the server.
    pub logs: Vec<LogRecord>,
    pub busy: BusyFlags,
    /// Single-slot error display; a new error overwrites the previous
    /// one, and starting any action clears it.
    pub error: Option<String>,
    /// Record backing the view/edit modals.
    pub selected: Option<LogRecord>,
    pub modal: Modal,
    pub draft: Option<EditDraft>,
    /// Current search text; filtering is recomputed on every render.
    pub query: String,
    /// Last fetched parse summary, rendered verbatim.
    pub summary: Option<serde_json::Value>,
}

impl ViewState {
    /// The search projection over the current collection.
    pub fn visible_logs<'a>(&'a self, lookups: &LookupDirectory) -> Vec<&'a LogRecord> {
        filter_logs(&self.logs, &self.query, lookups)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
