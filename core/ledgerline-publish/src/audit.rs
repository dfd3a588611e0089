//! Audit entries built from a change snapshot.

use crate::LedgerConfig;
use chrono::{DateTime, Utc};
use ledgerline_tracker::{PropertyChangeRecord, Snapshot, TransactionContext};
use ledgerline_types::{EntityRef, PropertyId, PropertyValue, TransactionId};
use serde::{Deserialize, Serialize};

/// One audited property change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub transaction_id: TransactionId,
    /// Position within the transaction, starting at 1.
    pub sequence: u64,
    /// Display name of the entity's type.
    pub entity_type_name: String,
    pub entity_ref: EntityRef,
    pub member_id: String,
    pub property_id: PropertyId,
    /// `None` for placeholders and null values.
    pub pre_value: Option<String>,
    pub post_value: Option<String>,
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

/// Builds one entry per retained record, in snapshot order.
pub(crate) fn build_entries(
    ctx: &mut TransactionContext,
    snapshot: &Snapshot,
    config: &LedgerConfig,
    completed_at: DateTime<Utc>,
) -> Vec<AuditEntry> {
    snapshot
        .records()
        .iter()
        .map(|record| entry_for(ctx, record, config, completed_at))
        .collect()
}

fn entry_for(
    ctx: &mut TransactionContext,
    record: &PropertyChangeRecord,
    config: &LedgerConfig,
    completed_at: DateTime<Utc>,
) -> AuditEntry {
    let max_len = config.audit.max_value_length;
    AuditEntry {
        transaction_id: ctx.id(),
        sequence: ctx.next_sequence(),
        entity_type_name: config.display_name(record.entity_type()).to_string(),
        entity_ref: record.entity_ref(),
        member_id: record.member().to_string(),
        property_id: record.property_id().clone(),
        pre_value: render(record.pre_value(), max_len),
        post_value: record.post_value().and_then(|v| render(v, max_len)),
        user: ctx.user().to_string(),
        timestamp: completed_at,
    }
}

fn render(value: &PropertyValue, max_len: usize) -> Option<String> {
    value.render().map(|s| truncate(s, max_len))
}

/// Truncates to at most `max_len` characters, never splitting a char.
fn truncate(mut s: String, max_len: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_len) {
        s.truncate(idx);
    }
    s
}
