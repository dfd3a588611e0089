use ledgerline_types::{EntityRef, PropertyId};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A non-fatal metadata mismatch found while capturing values.
///
/// The offending entry is skipped; everything else keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// A caller-supplied binding name matched no tracked property.
    UnresolvedMember {
        entity_ref: EntityRef,
        entity_type: String,
        member: String,
    },
    /// The entity could not produce a value for a tracked property.
    UnreadableProperty {
        entity_ref: EntityRef,
        entity_type: String,
        property_id: PropertyId,
    },
}

impl ConsistencyWarning {
    pub(crate) fn emit(&self) {
        match self {
            ConsistencyWarning::UnresolvedMember {
                entity_ref,
                entity_type,
                member,
            } => warn!(
                entity_ref = %entity_ref,
                entity_type = %entity_type,
                member = %member,
                "Binding name does not resolve to a tracked property, skipping"
            ),
            ConsistencyWarning::UnreadableProperty {
                entity_ref,
                entity_type,
                property_id,
            } => warn!(
                entity_ref = %entity_ref,
                entity_type = %entity_type,
                property_id = %property_id,
                "Property could not be read, skipping"
            ),
        }
    }
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::UnresolvedMember {
                entity_ref,
                entity_type,
                member,
            } => write!(f, "{entity_type} {entity_ref}: unresolved member '{member}'"),
            ConsistencyWarning::UnreadableProperty {
                entity_ref,
                entity_type,
                property_id,
            } => write!(f, "{entity_type} {entity_ref}: unreadable property '{property_id}'"),
        }
    }
}
