//! Error types for the change tracker.

use ledgerline_types::TransactionId;
use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors that can occur while tracking changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The snapshot for this transaction was already taken; the ledger is
    /// closed for further enlistment.
    #[error("transaction {transaction_id} already finalized: no enlistment after snapshot")]
    AlreadyFinalized { transaction_id: TransactionId },
}
