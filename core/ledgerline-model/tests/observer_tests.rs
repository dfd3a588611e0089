use ledgerline_model::{
    EntityTypeSchema, LifecycleObserver, LiveEntity, NoopObserver, PropertyDescriptor,
    TrackedEntity,
};
use ledgerline_types::ChangeKind;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn make_entity() -> LiveEntity {
    let schema = Arc::new(EntityTypeSchema::new("task", vec![PropertyDescriptor::stored("/done")]));
    LiveEntity::new(schema, json!({"done": false}))
}

// ── Default implementations ──────────────────────────────────────

#[test]
fn noop_observer_accepts_everything() {
    let observer = NoopObserver;
    let entity = make_entity();
    observer.on_loaded(&entity);
    observer.on_persisting(&entity);
    observer.on_updating(&entity);
    observer.on_enlisted(&entity, ChangeKind::Create);
}

// ── Custom observers ─────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl LifecycleObserver for Recorder {
    fn on_enlisted(&self, entity: &dyn TrackedEntity, kind: ChangeKind) {
        self.seen
            .lock()
            .unwrap()
            .push(format!("{}:{kind}", entity.entity_type()));
    }
}

#[test]
fn custom_observer_overrides_one_hook() {
    let observer = Recorder::default();
    let entity = make_entity();
    observer.on_loaded(&entity);
    observer.on_enlisted(&entity, ChangeKind::Update);
    assert_eq!(*observer.seen.lock().unwrap(), vec!["task:update".to_string()]);
}
