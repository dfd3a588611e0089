//! Explicit per-transaction scope.
//!
//! A [`TransactionContext`] is threaded through every tracker call instead
//! of living in ambient thread-local state. Whoever holds `&mut` to it is
//! the single writer for that transaction.

use crate::{
    ConsistencyWarning, EntityChangeLedger, Snapshot, SnapshotCell, TrackerError, TrackerResult,
};
use ledgerline_types::TransactionId;
use std::sync::Arc;
use tracing::debug;

/// State owned by one business transaction.
#[derive(Debug)]
pub struct TransactionContext {
    id: TransactionId,
    user: String,
    ledger: Option<EntityChangeLedger>,
    snapshot: SnapshotCell,
    loaded: usize,
    system_state_changed: bool,
    sequence: u64,
    warnings: Vec<ConsistencyWarning>,
}

impl TransactionContext {
    /// Starts a new transaction on behalf of `user`.
    pub fn new(user: impl Into<String>) -> Self {
        Self::with_id(TransactionId::new(), user)
    }

    /// Starts a transaction with an id chosen by the transaction manager.
    pub fn with_id(id: TransactionId, user: impl Into<String>) -> Self {
        Self {
            id,
            user: user.into(),
            ledger: None,
            snapshot: SnapshotCell::new(),
            loaded: 0,
            system_state_changed: false,
            sequence: 0,
            warnings: Vec::new(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// The acting user stamped on audit entries.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The ledger, if anything has been enlisted yet.
    pub fn ledger(&self) -> Option<&EntityChangeLedger> {
        self.ledger.as_ref()
    }

    /// Whether the snapshot has been taken; enlistment is closed once it has.
    pub fn is_finalized(&self) -> bool {
        self.snapshot.is_taken()
    }

    /// The snapshot, if already taken.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.get()
    }

    /// Number of lifecycle recognitions seen so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    /// Set once the first entity is enlisted; consumed by the surrounding
    /// command layer to decide whether an audit trail is due.
    pub fn has_system_state_changes(&self) -> bool {
        self.system_state_changed
    }

    /// Hands out the next per-transaction sequence number, starting at 1.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Discards all transaction state and starts a fresh transaction in the
    /// same scope.
    pub fn reset(&mut self) {
        let previous = self.id;
        self.id = TransactionId::new();
        self.ledger = None;
        self.snapshot.clear();
        self.loaded = 0;
        self.system_state_changed = false;
        self.sequence = 0;
        self.warnings.clear();
        debug!(previous = %previous, transaction_id = %self.id, "Transaction context reset");
    }

    pub(crate) fn ensure_open(&self) -> TrackerResult<()> {
        if self.is_finalized() {
            return Err(TrackerError::AlreadyFinalized {
                transaction_id: self.id,
            });
        }
        Ok(())
    }

    /// The ledger, created on first use.
    pub(crate) fn ledger_mut(&mut self) -> &mut EntityChangeLedger {
        if self.ledger.is_none() {
            self.system_state_changed = true;
        }
        self.ledger.get_or_insert_with(EntityChangeLedger::new)
    }

    pub(crate) fn record_loaded(&mut self) {
        self.loaded += 1;
    }

    pub(crate) fn push_warning(&mut self, warning: ConsistencyWarning) {
        warning.emit();
        self.warnings.push(warning);
    }

    pub(crate) fn finalize_parts(
        &mut self,
    ) -> (
        Option<&mut EntityChangeLedger>,
        &mut SnapshotCell,
        &mut Vec<ConsistencyWarning>,
    ) {
        (self.ledger.as_mut(), &mut self.snapshot, &mut self.warnings)
    }
}
