//! Error types for the publishing layer.

use ledgerline_types::TransactionId;
use std::fmt;
use thiserror::Error;

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur while publishing a transaction's changes.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// One or both sinks rejected the delivery. Transaction state has
    /// already been reset when this is returned.
    #[error("delivery failed for transaction {transaction_id}: {} sink(s) failed", .failures.len())]
    SinkDelivery {
        transaction_id: TransactionId,
        failures: Vec<SinkFailure>,
    },
}

/// Which sink a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Audit,
    Change,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Audit => f.write_str("audit"),
            SinkKind::Change => f.write_str("change"),
        }
    }
}

/// A single sink's delivery error.
#[derive(Debug, Error)]
#[error("{sink} sink: {source}")]
pub struct SinkFailure {
    pub sink: SinkKind,
    #[source]
    pub source: anyhow::Error,
}
