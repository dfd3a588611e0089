#![allow(dead_code)]

use ledgerline_model::{
    EntityHandle, EntityTypeSchema, LifecycleObserver, LiveEntity, PropertyDescriptor,
    TrackedEntity,
};
use ledgerline_tracker::{ChangeTracker, TrackAll};
use ledgerline_types::ChangeKind;
use serde_json::{Value, json};
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
            PropertyDescriptor::derived("/total_with_tax"),
            PropertyDescriptor::transient("/selected"),
        ],
    ))
}

pub fn session_schema() -> Arc<EntityTypeSchema> {
    Arc::new(EntityTypeSchema::new(
        "session",
        vec![PropertyDescriptor::stored("/token")],
    ))
}

/// Returns the live entity (for mutation) and the handle given to the tracker.
pub fn invoice(number: &str, total: i64) -> (Arc<LiveEntity>, EntityHandle) {
    let entity = Arc::new(LiveEntity::new(
        invoice_schema(),
        json!({"number": number, "total": total, "total_with_tax": total, "selected": false}),
    ));
    let handle: EntityHandle = entity.clone();
    (entity, handle)
}

pub fn session(token: &str) -> (Arc<LiveEntity>, EntityHandle) {
    let entity = Arc::new(LiveEntity::new(session_schema(), json!({"token": token})));
    let handle: EntityHandle = entity.clone();
    (entity, handle)
}

pub fn tracker() -> ChangeTracker {
    ChangeTracker::new(Arc::new(TrackAll))
}

/// Observer that records every notification as a string.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_loaded(&self, entity: &dyn TrackedEntity) {
        self.push(format!("loaded:{}", entity.entity_type()));
    }

    fn on_persisting(&self, entity: &dyn TrackedEntity) {
        self.push(format!("persisting:{}", entity.entity_type()));
    }

    fn on_updating(&self, entity: &dyn TrackedEntity) {
        self.push(format!("updating:{}", entity.entity_type()));
    }

    fn on_enlisted(&self, entity: &dyn TrackedEntity, kind: ChangeKind) {
        self.push(format!("enlisted:{}:{kind}", entity.entity_type()));
    }
}

/// An entity whose declared properties cannot be read once `broken` is set.
pub struct FlakyEntity {
    pub inner: LiveEntity,
    pub broken: Mutex<bool>,
}

impl FlakyEntity {
    pub fn new(data: Value) -> Self {
        Self {
            inner: LiveEntity::new(invoice_schema(), data),
            broken: Mutex::new(false),
        }
    }

    pub fn break_reads(&self) {
        *self.broken.lock().unwrap() = true;
    }
}

impl TrackedEntity for FlakyEntity {
    fn entity_ref(&self) -> ledgerline_types::EntityRef {
        self.inner.entity_ref()
    }

    fn schema(&self) -> &EntityTypeSchema {
        self.inner.schema()
    }

    fn read(&self, property: &PropertyDescriptor) -> Option<Value> {
        if *self.broken.lock().unwrap() {
            return None;
        }
        self.inner.read(property)
    }

    fn is_destroyed(&self) -> bool {
        self.inner.is_destroyed()
    }
}
