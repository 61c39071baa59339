//! Session lookup-cache loader.
//!
//! The three reference collections load concurrently, exactly once per
//! session. Each fetch is independently fault-tolerant: a failure is
//! logged and that collection stays empty — it never aborts the others.

use paddock_core::lookup::{LookupDirectory, LookupEntity, LookupKind};

use crate::api::LogApi;
use crate::error::ApiError;

/// Fetch all three lookup collections and assemble the directory.
pub async fn load_lookup_directory(api: &LogApi) -> LookupDirectory {
    let (vehicles, operators, event_categories) = futures::join!(
        api.fetch_lookup(LookupKind::Vehicle),
        api.fetch_lookup(LookupKind::Operator),
        api.fetch_lookup(LookupKind::EventCategory),
    );

    LookupDirectory {
        vehicles: collection_or_empty(LookupKind::Vehicle, vehicles),
        operators: collection_or_empty(LookupKind::Operator, operators),
        event_categories: collection_or_empty(LookupKind::EventCategory, event_categories),
    }
}

fn collection_or_empty(
    kind: LookupKind,
    result: Result<Vec<LookupEntity>, ApiError>,
) -> Vec<LookupEntity> {
    match result {
        Ok(entities) => entities,
        Err(e) => {
            tracing::warn!(collection = kind.label(), error = %e, "Lookup collection failed to load, leaving it empty");
            Vec::new()
        }
    }
}
