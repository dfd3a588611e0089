//! Change kinds and the merge rule applied when one entity is reported
//! more than once inside a single transaction.
//!
//! | previous | reported | result            |
//! |----------|----------|-------------------|
//! | none     | any      | reported          |
//! | create   | delete   | removed           |
//! | create   | other    | create            |
//! | update   | delete   | delete            |
//! | update   | other    | update            |
//! | delete   | any      | delete            |

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to an entity within a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl ChangeKind {
    /// All kinds, in declaration order.
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Create, ChangeKind::Update, ChangeKind::Delete];

    /// Merges a newly reported kind into the entity's previous kind (if any).
    #[must_use]
    pub fn merge(previous: Option<ChangeKind>, reported: ChangeKind) -> MergeOutcome {
        use ChangeKind::{Create, Delete, Update};

        match (previous, reported) {
            (None, kind) => MergeOutcome::Fresh(kind),
            (Some(Create), Delete) => MergeOutcome::Cancelled,
            (Some(Update), Delete) => MergeOutcome::Escalated(Delete),
            (Some(Delete), _) => MergeOutcome::Unchanged(Delete),
            (Some(kind), Create | Update) => MergeOutcome::Unchanged(kind),
        }
    }

    /// Lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Create => "create",
            ChangeKind::Update => "update",
            ChangeKind::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`ChangeKind::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First observation of the entity in this transaction.
    Fresh(ChangeKind),
    /// The kind changed (update escalated to delete); values are re-captured.
    Escalated(ChangeKind),
    /// Already enlisted; the kind stays as it was.
    Unchanged(ChangeKind),
    /// Create followed by delete: the entity leaves the ledger entirely.
    Cancelled,
}

impl MergeOutcome {
    /// The resulting kind, or `None` when the entity is no longer tracked.
    #[must_use]
    pub fn kind(self) -> Option<ChangeKind> {
        match self {
            MergeOutcome::Fresh(kind)
            | MergeOutcome::Escalated(kind)
            | MergeOutcome::Unchanged(kind) => Some(kind),
            MergeOutcome::Cancelled => None,
        }
    }

    /// Whether this observation should capture pre-values and notify observers.
    #[must_use]
    pub fn is_enlistment(self) -> bool {
        matches!(self, MergeOutcome::Fresh(_) | MergeOutcome::Escalated(_))
    }
}
