//! REST client for the backend's log and lookup endpoints.
//!
//! One method per server action, each a single network round trip with
//! no retry. Failure classification happens once, in
//! [`ensure_success`](LogApi::ensure_success).

use serde::Deserialize;

use paddock_core::download::suggested_file_name;
use paddock_core::geometry::FeatureCollection;
use paddock_core::lookup::{LookupEntity, LookupKind};
use paddock_core::record::{LogRecord, LogUpdate};
use paddock_core::types::DbId;

use crate::error::ApiError;

/// HTTP client for a single backend instance.
pub struct LogApi {
    client: reqwest::Client,
    base_url: String,
}

/// Transport semantics for an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Partial merge (`PATCH`).
    Patch,
    /// Full replace (`PUT`).
    Put,
}

/// A downloaded recording: raw bytes plus the name to save them under.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// List bodies are defensively normalized: a non-array response is an
/// empty collection, not a decode failure.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Logs(Vec<LogRecord>),
    Other(serde_json::Value),
}

impl LogApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the full log collection, in server order.
    pub async fn list_logs(&self) -> Result<Vec<LogRecord>, ApiError> {
        let response = self
            .client
            .get(format!("{}/mcap-logs/", self.base_url))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        match response.json::<ListBody>().await? {
            ListBody::Logs(logs) => Ok(logs),
            ListBody::Other(_) => Ok(Vec::new()),
        }
    }

    /// Fetch a single log record. Not-found surfaces as
    /// `ApiError::Server { status: 404, .. }`.
    pub async fn get_log(&self, id: DbId) -> Result<LogRecord, ApiError> {
        let response = self
            .client
            .get(format!("{}/mcap-logs/{}/", self.base_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Upload a recording as a multipart form with field `file`.
    ///
    /// The `.mcap` extension gate is the caller's responsibility; this
    /// method sends whatever it is given.
    pub async fn upload_log(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/mcap-logs/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Update a log's editable metadata.
    ///
    /// `mode` selects partial-merge (`PATCH`) vs full-replace (`PUT`)
    /// semantics at the transport level; the body is the same either way.
    pub async fn update_log(
        &self,
        id: DbId,
        update: &LogUpdate,
        mode: UpdateMode,
    ) -> Result<(), ApiError> {
        let url = format!("{}/mcap-logs/{}/", self.base_url, id);
        let request = match mode {
            UpdateMode::Patch => self.client.patch(url),
            UpdateMode::Put => self.client.put(url),
        };

        let response = request.json(update).send().await?;
        Self::check_status(response).await
    }

    /// Delete a log record.
    pub async fn delete_log(&self, id: DbId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/mcap-logs/{}/", self.base_url, id))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Fetch the spatial track for a log.
    ///
    /// Callers treat any failure here as "no geometry" rather than
    /// escalating it.
    pub async fn get_geometry(&self, id: DbId) -> Result<FeatureCollection, ApiError> {
        let response = self
            .client
            .get(format!("{}/mcap-logs/{}/geojson", self.base_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Download the original recording bytes.
    ///
    /// The saved name comes from the `Content-Disposition` header's
    /// `filename="..."` parameter, falling back to `mcap-log-{id}.mcap`.
    pub async fn download_file(&self, id: DbId) -> Result<Download, ApiError> {
        let response = self
            .client
            .get(format!("{}/mcap-logs/{}/download", self.base_url, id))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let header = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let file_name = suggested_file_name(header.as_deref(), id);
        let bytes = response.bytes().await?.to_vec();

        Ok(Download { file_name, bytes })
    }

    /// Fetch one of the three lookup collections.
    pub async fn fetch_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntity>, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, lookup_path(kind)))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Request an aggregate parse summary from the backend.
    pub async fn parse_summary(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .post(format!("{}/parse/summary/", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success; classifies the failure from the
    /// status and body text otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &status_text, &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Endpoint path for a lookup collection.
fn lookup_path(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Vehicle => "/cars/",
        LookupKind::Operator => "/drivers/",
        LookupKind::EventCategory => "/event-types/",
    }
}
