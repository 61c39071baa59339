//! Domain types and pure logic for the Paddock log console.
//!
//! This crate has **zero I/O dependencies**. Everything here operates on
//! in-memory values: the log record model, lookup resolution, the edit
//! draft, the search filter, error-body parsing, and filename derivation.
//! The HTTP layer lives in `paddock-client`; state and orchestration live
//! in `paddock-console`.

pub mod download;
pub mod draft;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod lookup;
pub mod record;
pub mod types;
pub mod upload;

pub use error::CoreError;
pub use types::{DbId, Timestamp};
