//! Failure classification for backend requests.

use paddock_core::error::validation_message;

/// Errors from the backend REST layer.
///
/// Exactly one of three classes, decided at the response boundary:
/// the request never completed ([`Network`](ApiError::Network)), the
/// server answered non-2xx without a usable structured body
/// ([`Server`](ApiError::Server)), or the server answered non-2xx with a
/// structured error body reduced to one message
/// ([`Validation`](ApiError::Validation)).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response with no structured (or unparsable) body.
    #[error("Server error ({status} {status_text})")]
    Server { status: u16, status_text: String },

    /// Non-2xx response carrying a structured error body.
    #[error("{message}")]
    Validation { message: String },
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body text.
    ///
    /// A JSON body matching the documented extraction chain (`detail` →
    /// `message` → field-error join) becomes [`ApiError::Validation`];
    /// anything else falls back to [`ApiError::Server`] with the status
    /// text. Not-found is always surfaced as a server error regardless
    /// of body, so callers can branch on the status.
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        if status != 404 {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(message) = validation_message(&json) {
                    return ApiError::Validation { message };
                }
            }
        }
        ApiError::Server {
            status,
            status_text: status_text.to_string(),
        }
    }

    /// Whether this is a not-found server response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
