//! Transaction-scoped ledger of pending entity changes.

use crate::PropertyChangeRecord;
use ledgerline_model::{EntityHandle, PropertyDescriptor};
use ledgerline_types::{ChangeKind, EntityRef, MergeOutcome, PropertyId, PropertyValue};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Mutable bookkeeping for one transaction.
///
/// Holds the merged [`ChangeKind`] per entity, the property records still
/// waiting for their post-value, and a handle on every enlisted entity so
/// the post-values can be read when the snapshot is taken.
#[derive(Default)]
pub struct EntityChangeLedger {
    kinds: BTreeMap<EntityRef, ChangeKind>,
    entities: HashMap<EntityRef, EntityHandle>,
    records: Vec<PropertyChangeRecord>,
    index: HashSet<(EntityRef, PropertyId)>,
}

/// Everything taken out of a ledger by [`EntityChangeLedger::drain`].
pub(crate) struct DrainedLedger {
    pub kinds: BTreeMap<EntityRef, ChangeKind>,
    pub entities: HashMap<EntityRef, EntityHandle>,
    pub records: Vec<PropertyChangeRecord>,
}

impl EntityChangeLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged kind for an entity, or `None` if it is not tracked.
    pub fn kind_of(&self, entity_ref: &EntityRef) -> Option<ChangeKind> {
        self.kinds.get(entity_ref).copied()
    }

    /// All tracked entities and their kinds, ordered by ref.
    pub fn kinds(&self) -> &BTreeMap<EntityRef, ChangeKind> {
        &self.kinds
    }

    /// Number of entities with a change kind.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Property records in enlistment order.
    pub fn records(&self) -> &[PropertyChangeRecord] {
        &self.records
    }

    /// Looks up the record for one property of one entity.
    pub fn record(
        &self,
        entity_ref: &EntityRef,
        property_id: &PropertyId,
    ) -> Option<&PropertyChangeRecord> {
        self.records
            .iter()
            .find(|r| r.entity_ref() == *entity_ref && r.property_id() == property_id)
    }

    /// Merges a reported kind for an entity into the ledger.
    ///
    /// On cancellation (create then delete) the entity leaves the ledger
    /// entirely, records included, whatever state the entity ends up in.
    pub fn apply(&mut self, entity: &EntityHandle, reported: ChangeKind) -> MergeOutcome {
        let entity_ref = entity.entity_ref();
        let outcome = ChangeKind::merge(self.kind_of(&entity_ref), reported);

        match outcome {
            MergeOutcome::Fresh(kind) | MergeOutcome::Escalated(kind) => {
                self.kinds.insert(entity_ref, kind);
                self.entities
                    .entry(entity_ref)
                    .or_insert_with(|| EntityHandle::clone(entity));
            }
            MergeOutcome::Unchanged(_) => {}
            MergeOutcome::Cancelled => {
                self.kinds.remove(&entity_ref);
                self.entities.remove(&entity_ref);
                self.records.retain(|r| r.entity_ref() != entity_ref);
                self.index.retain(|(r, _)| *r != entity_ref);
            }
        }

        outcome
    }

    /// Adds a record for a property unless one already exists.
    /// The first pre-value wins; returns whether a record was added.
    pub fn capture(
        &mut self,
        entity: &EntityHandle,
        property: &PropertyDescriptor,
        pre_value: PropertyValue,
    ) -> bool {
        let entity_ref = entity.entity_ref();
        if !self.index.insert((entity_ref, property.property_id.clone())) {
            return false;
        }
        self.records.push(PropertyChangeRecord::new(
            entity_ref,
            entity.entity_type(),
            property,
            pre_value,
        ));
        true
    }

    /// Whether a record exists for this property of this entity.
    pub fn is_captured(&self, entity_ref: EntityRef, property_id: &PropertyId) -> bool {
        self.index.contains(&(entity_ref, property_id.clone()))
    }

    /// Takes everything out of the ledger, leaving it empty.
    pub(crate) fn drain(&mut self) -> DrainedLedger {
        self.index.clear();
        DrainedLedger {
            kinds: std::mem::take(&mut self.kinds),
            entities: std::mem::take(&mut self.entities),
            records: std::mem::take(&mut self.records),
        }
    }
}

impl fmt::Debug for EntityChangeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityChangeLedger")
            .field("kinds", &self.kinds)
            .field("records", &self.records.len())
            .finish()
    }
}
