//! Client-local upload constraints.
//!
//! The only check the client enforces itself: the selected file must
//! carry the `.mcap` extension. Everything else (magic bytes, recovery,
//! parsing) is the backend's job.

use crate::error::CoreError;

/// Expected recording file extension, dot included.
pub const FILE_EXTENSION: &str = ".mcap";

/// Reject file names that do not end in [`FILE_EXTENSION`].
///
/// Enforced before any network call; a rejected name never produces a
/// request.
pub fn validate_upload_filename(file_name: &str) -> Result<(), CoreError> {
    if file_name.ends_with(FILE_EXTENSION) && file_name.len() > FILE_EXTENSION.len() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Please select a {FILE_EXTENSION} file, got '{file_name}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
