//! Commit-time hand-off of a transaction's changes to the sinks.

use crate::audit::build_entries;
use crate::{
    AuditEntry, AuditSink, ChangeSink, ChangeSummary, LedgerConfig, PublishError, PublishResult,
    SinkFailure, SinkKind,
};
use chrono::Utc;
use ledgerline_tracker::{ChangeSnapshotter, TransactionContext};
use ledgerline_types::TransactionId;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What was handed to the sinks for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub transaction_id: TransactionId,
    pub audit_entries: Vec<AuditEntry>,
    /// `None` when the transaction changed nothing and nothing was published.
    pub summary: Option<ChangeSummary>,
}

/// Resets the transaction context when dropped, whatever happened before.
struct ResetOnExit<'a> {
    ctx: &'a mut TransactionContext,
}

impl Deref for ResetOnExit<'_> {
    type Target = TransactionContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ResetOnExit<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ResetOnExit<'_> {
    fn drop(&mut self) {
        self.ctx.reset();
    }
}

/// Publishes each transaction's snapshot to the audit and change sinks.
pub struct PublishingCoordinator {
    config: LedgerConfig,
    audit_sink: Arc<dyn AuditSink>,
    change_sink: Arc<dyn ChangeSink>,
}

impl PublishingCoordinator {
    pub fn new(
        config: LedgerConfig,
        audit_sink: Arc<dyn AuditSink>,
        change_sink: Arc<dyn ChangeSink>,
    ) -> Self {
        Self {
            config,
            audit_sink,
            change_sink,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Pre-commit hook: snapshot, build the audit entries and the summary,
    /// deliver both, then reset `ctx`.
    ///
    /// Both sinks are attempted even if the first fails. The context is
    /// reset on every exit path, including a sink error or a panic.
    pub fn on_pre_commit(&self, ctx: &mut TransactionContext) -> PublishResult<PublishReport> {
        let mut ctx = ResetOnExit { ctx };
        let transaction_id = ctx.id();
        let snapshot = ChangeSnapshotter::snapshot(&mut ctx);

        if snapshot.is_empty() {
            debug!(transaction_id = %transaction_id, "Nothing changed, skipping publish");
            return Ok(PublishReport {
                transaction_id,
                audit_entries: Vec::new(),
                summary: None,
            });
        }

        let completed_at = Utc::now();
        let audit_entries = build_entries(&mut ctx, &snapshot, &self.config, completed_at);
        let summary = ChangeSummary::from_snapshot(&mut ctx, &snapshot, completed_at);

        let mut failures = Vec::new();
        if self.config.audit.enabled && !audit_entries.is_empty() {
            if let Err(source) = self.audit_sink.deliver(&audit_entries) {
                warn!(
                    transaction_id = %transaction_id,
                    error = %source,
                    "Audit sink delivery failed"
                );
                failures.push(SinkFailure {
                    sink: SinkKind::Audit,
                    source,
                });
            }
        }
        if let Err(source) = self.change_sink.publish(&summary) {
            warn!(transaction_id = %transaction_id, error = %source, "Change sink delivery failed");
            failures.push(SinkFailure {
                sink: SinkKind::Change,
                source,
            });
        }

        if !failures.is_empty() {
            return Err(PublishError::SinkDelivery {
                transaction_id,
                failures,
            });
        }

        info!(
            transaction_id = %transaction_id,
            audit_entries = audit_entries.len(),
            entities = summary.entity_count(),
            "Transaction changes published"
        );
        Ok(PublishReport {
            transaction_id,
            audit_entries,
            summary: Some(summary),
        })
    }

    /// Abort hook: discards the transaction's state without publishing.
    pub fn on_rollback(&self, ctx: &mut TransactionContext) {
        let pending = ctx.ledger().map_or(0, |l| l.len());
        debug!(transaction_id = %ctx.id(), pending, "Transaction rolled back, discarding changes");
        ctx.reset();
    }
}
