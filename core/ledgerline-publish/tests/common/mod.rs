#![allow(dead_code)]

use ledgerline_model::{EntityHandle, EntityTypeSchema, LiveEntity, PropertyDescriptor};
use ledgerline_publish::{AuditEntry, AuditSink, ChangeSink, ChangeSummary};
use ledgerline_tracker::{ChangeTracker, TrackAll};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn invoice_schema() -> Arc<EntityTypeSchema> {
    Arc::new(EntityTypeSchema::new(
        "invoice",
        vec![
            PropertyDescriptor::stored("/number"),
            PropertyDescriptor::stored("/total"),
            PropertyDescriptor::stored("/notes"),
        ],
    ))
}

pub fn invoice(number: &str, total: i64) -> (Arc<LiveEntity>, EntityHandle) {
    let entity = Arc::new(LiveEntity::new(
        invoice_schema(),
        json!({"number": number, "total": total, "notes": null}),
    ));
    let handle: EntityHandle = entity.clone();
    (entity, handle)
}

pub fn tracker() -> ChangeTracker {
    ChangeTracker::new(Arc::new(TrackAll))
}

/// Audit sink that keeps every delivered batch.
#[derive(Default)]
pub struct CollectingAuditSink {
    pub batches: Mutex<Vec<Vec<AuditEntry>>>,
}

impl CollectingAuditSink {
    pub fn batches(&self) -> Vec<Vec<AuditEntry>> {
        self.batches.lock().unwrap().clone()
    }
}

impl AuditSink for CollectingAuditSink {
    fn deliver(&self, entries: &[AuditEntry]) -> anyhow::Result<()> {
        self.batches.lock().unwrap().push(entries.to_vec());
        Ok(())
    }
}

/// Change sink that keeps every published summary.
#[derive(Default)]
pub struct CollectingChangeSink {
    pub summaries: Mutex<Vec<ChangeSummary>>,
}

impl CollectingChangeSink {
    pub fn summaries(&self) -> Vec<ChangeSummary> {
        self.summaries.lock().unwrap().clone()
    }
}

impl ChangeSink for CollectingChangeSink {
    fn publish(&self, summary: &ChangeSummary) -> anyhow::Result<()> {
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

/// Sink that rejects everything.
pub struct FailingSink;

impl AuditSink for FailingSink {
    fn deliver(&self, _entries: &[AuditEntry]) -> anyhow::Result<()> {
        anyhow::bail!("audit store unavailable")
    }
}

impl ChangeSink for FailingSink {
    fn publish(&self, _summary: &ChangeSummary) -> anyhow::Result<()> {
        anyhow::bail!("message bus unavailable")
    }
}

/// Audit sink that panics on delivery.
pub struct PanickingSink;

impl AuditSink for PanickingSink {
    fn deliver(&self, _entries: &[AuditEntry]) -> anyhow::Result<()> {
        panic!("audit store crashed")
    }
}
