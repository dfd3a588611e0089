//! Per-transaction change summary.

use chrono::{DateTime, Utc};
use ledgerline_tracker::{Snapshot, TransactionContext};
use ledgerline_types::{ChangeKind, EntityRef, TransactionId};
use serde::{Deserialize, Serialize};

/// Which entities a transaction created, updated and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub transaction_id: TransactionId,
    /// Follows the sequence numbers of the transaction's audit entries.
    pub sequence: u64,
    pub user: String,
    pub completed_at: DateTime<Utc>,
    pub created_refs: Vec<EntityRef>,
    pub updated_refs: Vec<EntityRef>,
    pub deleted_refs: Vec<EntityRef>,
    pub number_loaded: usize,
    pub number_properties_modified: usize,
}

impl ChangeSummary {
    pub(crate) fn from_snapshot(
        ctx: &mut TransactionContext,
        snapshot: &Snapshot,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let counts = snapshot.counts();
        Self {
            transaction_id: ctx.id(),
            sequence: ctx.next_sequence(),
            user: ctx.user().to_string(),
            completed_at,
            created_refs: snapshot.refs_of(ChangeKind::Create),
            updated_refs: snapshot.refs_of(ChangeKind::Update),
            deleted_refs: snapshot.refs_of(ChangeKind::Delete),
            number_loaded: counts.loaded,
            number_properties_modified: counts.retained,
        }
    }

    /// Total number of entities with a change.
    pub fn entity_count(&self) -> usize {
        self.created_refs.len() + self.updated_refs.len() + self.deleted_refs.len()
    }
}
