use crate::TrackedEntity;
use ledgerline_types::ChangeKind;

/// Receives lifecycle notifications from the change tracker.
///
/// Every method has a no-op default; implement only what you need.
/// Notifications are delivered synchronously on the transaction's thread.
pub trait LifecycleObserver: Send + Sync {
    /// An entity was materialized from the store.
    fn on_loaded(&self, entity: &dyn TrackedEntity) {
        let _ = entity;
    }

    /// An entity is about to be written for the first time.
    fn on_persisting(&self, entity: &dyn TrackedEntity) {
        let _ = entity;
    }

    /// An already-stored entity is about to be written.
    fn on_updating(&self, entity: &dyn TrackedEntity) {
        let _ = entity;
    }

    /// An entity was enlisted with the ledger, or its kind escalated.
    /// Not fired for repeated reports that leave the kind unchanged.
    fn on_enlisted(&self, entity: &dyn TrackedEntity, kind: ChangeKind) {
        let _ = (entity, kind);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LifecycleObserver for NoopObserver {}
