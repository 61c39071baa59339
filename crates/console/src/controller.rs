//! The synchronization controller.
//!
//! Owns the resource client, the session lookup directory, and the
//! [`ViewState`]. Every mutating action follows the same shape: raise
//! the busy flag and clear the error slot, perform the single request,
//! and on success close the relevant modal and refetch the full
//! collection — the refetch is the system's only consistency mechanism.
//! On failure only the error slot changes; the collection snapshot and
//! any open modal stay untouched. Busy flags clear on both paths.

use std::path::{Path, PathBuf};

use paddock_client::{ApiError, LogApi, UpdateMode};
use paddock_core::draft::EditDraft;
use paddock_core::error::CoreError;
use paddock_core::lookup::LookupDirectory;
use paddock_core::record::LogRecord;
use paddock_core::types::DbId;
use paddock_core::upload::validate_upload_filename;

use crate::command::DraftField;
use crate::state::{Modal, ViewState};

pub struct Controller {
    api: LogApi,
    lookups: LookupDirectory,
    state: ViewState,
}

impl Controller {
    pub fn new(api: LogApi) -> Self {
        Self {
            api,
            lookups: LookupDirectory::default(),
            state: ViewState::default(),
        }
    }

    /// Read-only view of the store, for the renderer and tests.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The session lookup directory.
    pub fn lookups(&self) -> &LookupDirectory {
        &self.lookups
    }

    /// The filtered collection the table renders.
    pub fn visible_logs(&self) -> Vec<&LogRecord> {
        self.state.visible_logs(&self.lookups)
    }

    /// Session start: load the lookup directory once, then the initial
    /// collection. Lookup failures degrade to empty collections inside
    /// the loader; they never block the log list.
    pub async fn init(&mut self) {
        self.lookups = paddock_client::lookups::load_lookup_directory(&self.api).await;
        self.refresh().await;
    }

    /// Refetch the full collection. A failure leaves the previously
    /// displayed snapshot untouched.
    pub async fn refresh(&mut self) {
        self.state.busy.listing = true;
        self.state.error = None;
        match self.api.list_logs().await {
            Ok(logs) => self.state.logs = logs,
            Err(e) => self.state.error = Some(action_error("fetch logs", &e)),
        }
        self.state.busy.listing = false;
    }

    /// Upload a recording from disk.
    ///
    /// The `.mcap` gate runs before anything else: a rejected name sets
    /// a validation message and produces **no network call**.
    pub async fn upload(&mut self, path: &Path) {
        self.state.error = None;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        if let Err(e) = validate_upload_filename(&file_name) {
            self.state.error = Some(core_error_message(e));
            return;
        }

        self.state.busy.uploading = true;
        match tokio::fs::read(path).await {
            Err(e) => {
                self.state.error = Some(format!("Failed to read {}: {e}", path.display()));
            }
            Ok(bytes) => match self.api.upload_log(&file_name, bytes).await {
                Ok(()) => self.refresh().await,
                Err(e) => self.state.error = Some(action_error("upload file", &e)),
            },
        }
        self.state.busy.uploading = false;
    }

    /// Fetch one record and open the details modal.
    pub async fn open_view(&mut self, id: DbId) {
        if let Some(record) = self.fetch_record(id).await {
            self.state.selected = Some(record);
            self.state.modal = Modal::Viewing(id);
        }
    }

    /// Fetch one record, seed the draft from it, and open the edit modal.
    pub async fn open_edit(&mut self, id: DbId) {
        if let Some(record) = self.fetch_record(id).await {
            self.state.draft = Some(EditDraft::from_record(&record, &self.lookups));
            self.state.selected = Some(record);
            self.state.modal = Modal::Editing(id);
        }
    }

    /// Change one field of the open edit draft.
    pub fn set_draft_field(&mut self, field: DraftField, value: String) {
        match &mut self.state.draft {
            Some(draft) => {
                match field {
                    DraftField::Car => draft.car = value,
                    DraftField::Driver => draft.driver = value,
                    DraftField::EventType => draft.event_type = value,
                    DraftField::Notes => draft.notes = value,
                }
                self.state.error = None;
            }
            None => self.state.error = Some("No edit in progress".into()),
        }
    }

    /// Submit the open edit draft.
    ///
    /// On failure the edit modal stays open with the draft intact; only
    /// a success closes it and triggers the refetch.
    pub async fn save(&mut self, mode: UpdateMode) {
        let Modal::Editing(id) = self.state.modal else {
            self.state.error = Some("No edit in progress".into());
            return;
        };
        let Some(draft) = self.state.draft.clone() else {
            self.state.error = Some("No edit in progress".into());
            return;
        };

        self.state.error = None;
        let update = match draft.to_update() {
            Ok(update) => update,
            Err(e) => {
                self.state.error = Some(core_error_message(e));
                return;
            }
        };

        self.state.busy.saving = true;
        match self.api.update_log(id, &update, mode).await {
            Ok(()) => {
                self.state.modal = Modal::None;
                self.state.draft = None;
                self.state.selected = None;
                self.refresh().await;
            }
            Err(e) => self.state.error = Some(action_error("update log", &e)),
        }
        self.state.busy.saving = false;
    }

    /// Open the delete confirmation for a record.
    pub fn request_delete(&mut self, id: DbId) {
        self.state.error = None;
        self.state.modal = Modal::ConfirmingDelete(id);
    }

    /// Perform the confirmed delete.
    pub async fn confirm_delete(&mut self) {
        let Modal::ConfirmingDelete(id) = self.state.modal else {
            self.state.error = Some("No delete pending".into());
            return;
        };

        self.state.busy.deleting = true;
        self.state.error = None;
        match self.api.delete_log(id).await {
            Ok(()) => {
                self.state.modal = Modal::None;
                self.refresh().await;
            }
            Err(e) => self.state.error = Some(action_error("delete log", &e)),
        }
        self.state.busy.deleting = false;
    }

    /// Fetch a log's spatial track and open the map preview.
    ///
    /// A failed or absent geometry is not an error: the modal opens with
    /// "no track data" and the error slot stays untouched.
    pub async fn open_map(&mut self, id: DbId) {
        self.state.busy.fetching_geometry = true;
        self.state.error = None;
        let geometry = match self.api.get_geometry(id).await {
            Ok(collection) => Some(collection),
            Err(e) => {
                tracing::warn!(log_id = id, error = %e, "No geometry available for log");
                None
            }
        };
        self.state.busy.fetching_geometry = false;
        self.state.modal = Modal::ShowingMap {
            log_id: id,
            geometry,
        };
    }

    /// Download the original recording into `dir`, returning the saved
    /// path on success.
    pub async fn download(&mut self, id: DbId, dir: &Path) -> Option<PathBuf> {
        self.state.busy.downloading = Some(id);
        self.state.error = None;

        let saved = match self.api.download_file(id).await {
            Ok(download) => {
                let dest = dir.join(&download.file_name);
                match tokio::fs::write(&dest, &download.bytes).await {
                    Ok(()) => Some(dest),
                    Err(e) => {
                        self.state.error = Some(format!("Failed to save {}: {e}", dest.display()));
                        None
                    }
                }
            }
            Err(e) => {
                self.state.error = Some(action_error("download file", &e));
                None
            }
        };

        self.state.busy.downloading = None;
        saved
    }

    /// Fetch the aggregate parse summary.
    pub async fn fetch_summary(&mut self) {
        self.state.busy.loading_summary = true;
        self.state.error = None;
        match self.api.parse_summary().await {
            Ok(summary) => self.state.summary = Some(summary),
            Err(e) => self.state.error = Some(action_error("fetch summary", &e)),
        }
        self.state.busy.loading_summary = false;
    }

    /// Update the search text. Pure state change, no network.
    pub fn set_query(&mut self, query: String) {
        self.state.query = query;
    }

    /// Close whatever modal is open, discarding selection and draft.
    pub fn close_modal(&mut self) {
        self.state.modal = Modal::None;
        self.state.selected = None;
        self.state.draft = None;
    }

    /// Shared two-step open: fetch one record, surfacing failures in the
    /// error slot and leaving modals closed.
    async fn fetch_record(&mut self, id: DbId) -> Option<LogRecord> {
        self.state.busy.fetching_log = true;
        self.state.error = None;
        let result = self.api.get_log(id).await;
        self.state.busy.fetching_log = false;

        match result {
            Ok(record) => Some(record),
            Err(e) => {
                self.state.error = Some(action_error("fetch log", &e));
                None
            }
        }
    }
}

/// Convert an API failure into the one-slot display message.
///
/// A classified validation or server error carries its own message; a
/// network failure falls back to a generic string naming the action.
fn action_error(action: &str, err: &ApiError) -> String {
    match err {
        ApiError::Validation { message } => message.clone(),
        ApiError::Server { .. } => err.to_string(),
        ApiError::Network(_) => format!("Failed to {action}"),
    }
}

fn core_error_message(err: CoreError) -> String {
    match err {
        CoreError::Validation(message) => message,
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests (pure state transitions; network paths live in tests/)
// ---------------------------------------------------------------------------
