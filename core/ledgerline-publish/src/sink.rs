use crate::{AuditEntry, ChangeSummary};

/// Receives the audit trail of a committed transaction.
///
/// Called at most once per transaction, synchronously, before commit
/// completes. Errors are reported to the caller of the pre-commit hook
/// and are not retried.
pub trait AuditSink: Send + Sync {
    fn deliver(&self, entries: &[AuditEntry]) -> anyhow::Result<()>;
}

/// Receives the change summary of a committed transaction.
pub trait ChangeSink: Send + Sync {
    fn publish(&self, summary: &ChangeSummary) -> anyhow::Result<()>;
}
