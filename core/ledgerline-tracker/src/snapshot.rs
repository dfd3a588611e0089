//! The drain-and-filter step taken once per transaction.
//!
//! Every enlisted property is re-read here exactly once. Afterwards the
//! transaction is finalized and further enlistment fails.

use crate::ledger::DrainedLedger;
use crate::{ConsistencyWarning, PropertyChangeRecord, TransactionContext};
use ledgerline_model::EntityHandle;
use ledgerline_types::{ChangeKind, EntityRef, PropertyValue};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

/// Aggregate counts reported with a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotCounts {
    /// Entities seen by the recognize hooks.
    pub loaded: usize,
    /// Entities with a change kind at drain time.
    pub dirtied: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Property records that survived filtering.
    pub retained: usize,
}

/// Immutable, filtered result of draining a transaction's ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    records: Vec<PropertyChangeRecord>,
    changes: BTreeMap<EntityRef, ChangeKind>,
    counts: SnapshotCounts,
    warnings: Vec<ConsistencyWarning>,
}

impl Snapshot {
    /// Retained records in enlistment order.
    pub fn records(&self) -> &[PropertyChangeRecord] {
        &self.records
    }

    /// Change kind per entity at drain time.
    pub fn changes(&self) -> &BTreeMap<EntityRef, ChangeKind> {
        &self.changes
    }

    /// Refs of all entities with the given kind, ordered by ref.
    pub fn refs_of(&self, kind: ChangeKind) -> Vec<EntityRef> {
        self.changes
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(r, _)| *r)
            .collect()
    }

    pub fn counts(&self) -> SnapshotCounts {
        self.counts
    }

    /// Warnings raised while capturing values this transaction.
    pub fn warnings(&self) -> &[ConsistencyWarning] {
        &self.warnings
    }

    /// True when there is nothing to publish.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.changes.is_empty()
    }
}

/// One-shot compute-and-cache slot for a transaction's snapshot.
///
/// Empty until the snapshot is taken, then permanently holds it until the
/// owning context is reset.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    slot: Option<Arc<Snapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached snapshot, if taken.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.slot.clone()
    }

    pub fn is_taken(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the cached snapshot, computing it first if the cell is empty.
    pub fn get_or_init(&mut self, compute: impl FnOnce() -> Snapshot) -> Arc<Snapshot> {
        Arc::clone(self.slot.get_or_insert_with(|| Arc::new(compute())))
    }

    pub(crate) fn clear(&mut self) {
        self.slot = None;
    }
}

/// Produces the per-transaction [`Snapshot`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeSnapshotter;

impl ChangeSnapshotter {
    /// Takes the snapshot for `ctx`, or returns the one already taken.
    ///
    /// The first call drains the ledger and captures every missing
    /// post-value; later calls return the same `Arc` without touching the
    /// ledger or the entities again.
    pub fn snapshot(ctx: &mut TransactionContext) -> Arc<Snapshot> {
        let transaction_id = ctx.id();
        let loaded = ctx.loaded_count();
        let (ledger, cell, pending) = ctx.finalize_parts();

        cell.get_or_init(|| {
            let drained = ledger.map(|l| l.drain());
            let snapshot = compute(drained, loaded, std::mem::take(pending));
            info!(
                transaction_id = %transaction_id,
                dirtied = snapshot.counts.dirtied,
                retained = snapshot.counts.retained,
                loaded = snapshot.counts.loaded,
                "Change snapshot taken"
            );
            snapshot
        })
    }
}

fn compute(
    drained: Option<DrainedLedger>,
    loaded: usize,
    mut warnings: Vec<ConsistencyWarning>,
) -> Snapshot {
    let Some(DrainedLedger {
        kinds,
        entities,
        records: pending,
    }) = drained
    else {
        return Snapshot {
            records: Vec::new(),
            changes: BTreeMap::new(),
            counts: SnapshotCounts {
                loaded,
                ..SnapshotCounts::default()
            },
            warnings,
        };
    };

    let mut records = Vec::with_capacity(pending.len());
    for mut record in pending {
        if record.post_value().is_none() {
            match capture_post_value(&record, &entities) {
                Some(value) => {
                    record.capture_post(value);
                }
                None => {
                    let warning = ConsistencyWarning::UnreadableProperty {
                        entity_ref: record.entity_ref(),
                        entity_type: record.entity_type().to_string(),
                        property_id: record.property_id().clone(),
                    };
                    warning.emit();
                    warnings.push(warning);
                    continue;
                }
            }
        }
        if record.is_significant() {
            records.push(record);
        }
    }

    let count = |kind: ChangeKind| kinds.values().filter(|k| **k == kind).count();
    let counts = SnapshotCounts {
        loaded,
        dirtied: kinds.len(),
        created: count(ChangeKind::Create),
        updated: count(ChangeKind::Update),
        deleted: count(ChangeKind::Delete),
        retained: records.len(),
    };

    Snapshot {
        records,
        changes: kinds,
        counts,
        warnings,
    }
}

fn capture_post_value(
    record: &PropertyChangeRecord,
    entities: &HashMap<EntityRef, EntityHandle>,
) -> Option<PropertyValue> {
    let entity = entities.get(&record.entity_ref())?;
    if entity.is_destroyed() {
        return Some(PropertyValue::Deleted);
    }
    let property = entity.schema().property(record.property_id())?;
    entity.read(property).map(PropertyValue::Real)
}
