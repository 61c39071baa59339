//! HTTP resource client for the Paddock log backend.
//!
//! Wraps the backend's REST contract (list, fetch, multipart upload,
//! partial/full update, delete, geometry, file download, lookup
//! collections) using [`reqwest`], and normalizes failures into the
//! three-way [`ApiError`](error::ApiError) taxonomy. Every operation is
//! a single round trip; nothing here retries.

pub mod api;
pub mod error;
pub mod lookups;

pub use api::{Download, LogApi, UpdateMode};
pub use error::ApiError;
