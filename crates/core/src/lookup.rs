//! Session lookup tables for vehicles, operators, and event categories.
//!
//! The three collections are fetched once per session and held in memory;
//! this module only resolves between identifiers and display names. A
//! collection that failed to load is simply empty — resolution then
//! degrades to `"N/A"` / `None` rather than erroring.

use serde::{Deserialize, Serialize};

use crate::record::LookupRef;
use crate::types::DbId;

/// Display value for an unresolvable reference.
pub const UNKNOWN_LABEL: &str = "N/A";

/// One named reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntity {
    pub id: DbId,
    pub name: String,
}

/// The three independent lookup collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Vehicle,
    Operator,
    EventCategory,
}

impl LookupKind {
    /// Human-readable label for the collection.
    pub fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "car",
            Self::Operator => "driver",
            Self::EventCategory => "event type",
        }
    }
}

/// In-memory lookup tables keyed by identifier, loaded once per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupDirectory {
    pub vehicles: Vec<LookupEntity>,
    pub operators: Vec<LookupEntity>,
    pub event_categories: Vec<LookupEntity>,
}

impl LookupDirectory {
    /// The collection for a given kind.
    pub fn collection(&self, kind: LookupKind) -> &[LookupEntity] {
        match kind {
            LookupKind::Vehicle => &self.vehicles,
            LookupKind::Operator => &self.operators,
            LookupKind::EventCategory => &self.event_categories,
        }
    }

    /// Resolve a reference to a display name.
    ///
    /// An inline name is returned as-is; a foreign-key reference is
    /// looked up by identifier across all three collections. Missing
    /// references and unknown identifiers resolve to [`UNKNOWN_LABEL`].
    pub fn resolve_name(&self, reference: Option<&LookupRef>) -> String {
        match reference {
            None => UNKNOWN_LABEL.to_string(),
            Some(LookupRef::Name(name)) => name.clone(),
            Some(LookupRef::Linked { id, name }) => {
                if !name.is_empty() {
                    name.clone()
                } else {
                    self.name_by_id(*id)
                        .unwrap_or(UNKNOWN_LABEL)
                        .to_string()
                }
            }
        }
    }

    /// Resolve a reference to an identifier.
    ///
    /// A foreign-key reference yields its identifier directly; an inline
    /// name is reverse-resolved by linear search across all three
    /// collections (the deprecated compatibility path).
    pub fn resolve_id(&self, reference: &LookupRef) -> Option<DbId> {
        match reference {
            LookupRef::Linked { id, .. } => Some(*id),
            LookupRef::Name(name) => self.id_by_name(name),
        }
    }

    fn name_by_id(&self, id: DbId) -> Option<&str> {
        self.all()
            .find(|entity| entity.id == id)
            .map(|entity| entity.name.as_str())
    }

    fn id_by_name(&self, name: &str) -> Option<DbId> {
        self.all()
            .find(|entity| entity.name == name)
            .map(|entity| entity.id)
    }

    fn all(&self) -> impl Iterator<Item = &LookupEntity> {
        self.vehicles
            .iter()
            .chain(self.operators.iter())
            .chain(self.event_categories.iter())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
