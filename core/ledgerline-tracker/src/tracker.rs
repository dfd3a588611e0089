//! The tracker the persistence layer calls into during a transaction.

use crate::{
    ChangePublishingPolicy, ChangeSnapshotter, ConsistencyWarning, Snapshot, TransactionContext,
    TrackerResult,
};
use ledgerline_model::{EntityHandle, LifecycleObserver, NoopObserver, TrackedEntity};
use ledgerline_types::{ChangeKind, MergeOutcome, PropertyValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Operations the persistence layer invokes while a transaction runs.
///
/// Every operation is a no-op for entity types the publishing policy does
/// not enable. Enlistment after the transaction's snapshot has been taken
/// fails with [`TrackerError::AlreadyFinalized`](crate::TrackerError::AlreadyFinalized).
pub trait EntityChangeTracker {
    /// Registers a newly created entity. Pre-values are the created placeholder.
    fn enlist_created(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()>;

    /// Registers an update, reading pre-values off the entity on first enlistment.
    fn enlist_updating(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()>;

    /// Registers an update whose pre-values the caller already knows.
    ///
    /// Each `(member, value)` pair supplies the pre-value for the property
    /// that member resolves to; unresolved members raise a consistency
    /// warning and are skipped. Properties not covered are read as usual.
    fn enlist_updating_known(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
        pre_values: &[(&str, Value)],
    ) -> TrackerResult<()>;

    /// Registers a deletion. Pre-values are captured only if the entity was
    /// newly enlisted for deletion.
    fn enlist_deleting(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()>;

    /// The entity was loaded from the store.
    fn recognize_loaded(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity);

    /// The entity is about to be inserted.
    fn recognize_persisting(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity);

    /// The entity is about to be updated in the store.
    fn recognize_updating(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity);

    /// Takes (once) and returns the transaction's snapshot.
    fn snapshot(&self, ctx: &mut TransactionContext) -> Arc<Snapshot>;
}

/// How pre-values are obtained for an enlistment.
enum PreValues<'a> {
    Placeholder,
    Read,
    Known(&'a [(&'a str, Value)]),
}

#[derive(Clone, Copy)]
enum Recognition {
    Loaded,
    Persisting,
    Updating,
}

/// Canonical [`EntityChangeTracker`].
///
/// Holds no transaction state of its own and can be shared freely; all
/// mutable state lives in the [`TransactionContext`] passed to each call.
#[derive(Clone)]
pub struct ChangeTracker {
    policy: Arc<dyn ChangePublishingPolicy>,
    observer: Arc<dyn LifecycleObserver>,
}

impl ChangeTracker {
    /// Creates a tracker with the given policy and no observer.
    pub fn new(policy: Arc<dyn ChangePublishingPolicy>) -> Self {
        Self {
            policy,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attaches a lifecycle observer.
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn is_enabled(&self, entity: &dyn TrackedEntity) -> bool {
        self.policy.is_change_publishing_enabled(entity.entity_type())
    }

    fn enlist(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
        reported: ChangeKind,
        pre_values: PreValues<'_>,
    ) -> TrackerResult<()> {
        if !self.is_enabled(entity.as_ref()) {
            trace!(entity_type = %entity.entity_type(), "Change publishing disabled, ignoring");
            return Ok(());
        }
        ctx.ensure_open()?;

        let outcome = ctx.ledger_mut().apply(entity, reported);
        debug!(
            transaction_id = %ctx.id(),
            entity_ref = %entity.entity_ref(),
            reported = %reported,
            outcome = ?outcome,
            "Entity enlisted"
        );

        let kind = match outcome {
            MergeOutcome::Fresh(kind) | MergeOutcome::Escalated(kind) => kind,
            MergeOutcome::Unchanged(_) | MergeOutcome::Cancelled => return Ok(()),
        };

        match pre_values {
            PreValues::Placeholder => capture_placeholders(ctx, entity),
            PreValues::Read => capture_current(ctx, entity),
            PreValues::Known(known) => {
                capture_known(ctx, entity, known);
                capture_current(ctx, entity);
            }
        }

        self.observer.on_enlisted(entity.as_ref(), kind);
        Ok(())
    }

    fn recognize(
        &self,
        ctx: &mut TransactionContext,
        entity: &dyn TrackedEntity,
        hook: Recognition,
    ) {
        if !self.is_enabled(entity) {
            return;
        }
        ctx.record_loaded();
        match hook {
            Recognition::Loaded => self.observer.on_loaded(entity),
            Recognition::Persisting => self.observer.on_persisting(entity),
            Recognition::Updating => self.observer.on_updating(entity),
        }
    }
}

impl EntityChangeTracker for ChangeTracker {
    fn enlist_created(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()> {
        self.enlist(ctx, entity, ChangeKind::Create, PreValues::Placeholder)
    }

    fn enlist_updating(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()> {
        self.enlist(ctx, entity, ChangeKind::Update, PreValues::Read)
    }

    fn enlist_updating_known(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
        pre_values: &[(&str, Value)],
    ) -> TrackerResult<()> {
        self.enlist(ctx, entity, ChangeKind::Update, PreValues::Known(pre_values))
    }

    fn enlist_deleting(
        &self,
        ctx: &mut TransactionContext,
        entity: &EntityHandle,
    ) -> TrackerResult<()> {
        self.enlist(ctx, entity, ChangeKind::Delete, PreValues::Read)
    }

    fn recognize_loaded(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity) {
        self.recognize(ctx, entity, Recognition::Loaded);
    }

    fn recognize_persisting(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity) {
        self.recognize(ctx, entity, Recognition::Persisting);
    }

    fn recognize_updating(&self, ctx: &mut TransactionContext, entity: &dyn TrackedEntity) {
        self.recognize(ctx, entity, Recognition::Updating);
    }

    fn snapshot(&self, ctx: &mut TransactionContext) -> Arc<Snapshot> {
        ChangeSnapshotter::snapshot(ctx)
    }
}

fn capture_placeholders(ctx: &mut TransactionContext, entity: &EntityHandle) {
    let ledger = ctx.ledger_mut();
    for property in entity.schema().tracked_properties() {
        ledger.capture(entity, property, PropertyValue::Created);
    }
}

fn capture_current(ctx: &mut TransactionContext, entity: &EntityHandle) {
    for property in entity.schema().tracked_properties() {
        let ledger = ctx.ledger_mut();
        if ledger.is_captured(entity.entity_ref(), &property.property_id) {
            continue;
        }
        match entity.read(property) {
            Some(value) => {
                ledger.capture(entity, property, PropertyValue::Real(value));
            }
            None => ctx.push_warning(ConsistencyWarning::UnreadableProperty {
                entity_ref: entity.entity_ref(),
                entity_type: entity.entity_type().to_string(),
                property_id: property.property_id.clone(),
            }),
        }
    }
}

fn capture_known(ctx: &mut TransactionContext, entity: &EntityHandle, known: &[(&str, Value)]) {
    for (member, value) in known {
        match entity.schema().resolve_member(member) {
            Some(property) => {
                ctx.ledger_mut()
                    .capture(entity, property, PropertyValue::Real(value.clone()));
            }
            None => ctx.push_warning(ConsistencyWarning::UnresolvedMember {
                entity_ref: entity.entity_ref(),
                entity_type: entity.entity_type().to_string(),
                member: (*member).to_string(),
            }),
        }
    }
}
