use crate::{EntityTypeSchema, PropertyDescriptor};
use ledgerline_types::EntityRef;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// The persistence layer's view of an entity, as needed by the tracker.
///
/// Values are read twice per transaction: when the entity is enlisted and
/// once more when the snapshot is taken. Implementations are expected to
/// return the entity's live state at the moment of the call.
pub trait TrackedEntity: Send + Sync {
    fn entity_ref(&self) -> EntityRef;

    fn schema(&self) -> &EntityTypeSchema;

    fn entity_type(&self) -> &str {
        &self.schema().entity_type
    }

    /// Reads the current value of a property.
    /// Returns `None` if the property cannot be resolved on this entity.
    fn read(&self, property: &PropertyDescriptor) -> Option<Value>;

    /// Whether the entity has been destroyed or detached from the store.
    fn is_destroyed(&self) -> bool;
}

/// Shared handle the tracker keeps on every enlisted entity.
pub type EntityHandle = Arc<dyn TrackedEntity>;

/// A JSON-backed entity with interior mutability.
///
/// Property values live in `data` and are addressed by the descriptor's
/// member path (a JSON pointer). Declared properties missing from `data`
/// read as `null`.
#[derive(Debug)]
pub struct LiveEntity {
    entity_ref: EntityRef,
    schema: Arc<EntityTypeSchema>,
    state: RwLock<LiveState>,
}

#[derive(Debug)]
struct LiveState {
    data: Value,
    destroyed: bool,
}

impl LiveEntity {
    /// Creates an entity with a freshly minted ref.
    pub fn new(schema: Arc<EntityTypeSchema>, data: Value) -> Self {
        Self::with_ref(EntityRef::new(), schema, data)
    }

    pub fn with_ref(entity_ref: EntityRef, schema: Arc<EntityTypeSchema>, data: Value) -> Self {
        Self {
            entity_ref,
            schema,
            state: RwLock::new(LiveState {
                data,
                destroyed: false,
            }),
        }
    }

    /// Rebuilds an entity from its stored id and JSON payload.
    pub fn from_stored(
        schema: Arc<EntityTypeSchema>,
        id: &str,
        json_data: &str,
    ) -> ledgerline_types::Result<Self> {
        let entity_ref = EntityRef::parse(id)?;
        let data: Value = serde_json::from_str(json_data)?;
        Ok(Self::with_ref(entity_ref, schema, data))
    }

    /// Extract a value from `data` using a JSON pointer (e.g., "/title").
    pub fn get(&self, pointer: &str) -> Option<Value> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .data
            .pointer(pointer)
            .cloned()
    }

    /// Extract a string value from `data` using a JSON pointer.
    pub fn get_str(&self, pointer: &str) -> Option<String> {
        self.get(pointer).and_then(|v| v.as_str().map(str::to_string))
    }

    /// Writes a value at a JSON pointer, creating the last path segment if
    /// its parent object exists. Returns false if the parent is missing.
    pub fn set(&self, pointer: &str, value: Value) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = state.data.pointer_mut(pointer) {
            *slot = value;
            return true;
        }

        let Some((parent, last)) = pointer.rsplit_once('/') else {
            return false;
        };
        let key = last.replace("~1", "/").replace("~0", "~");
        match state.data.pointer_mut(parent) {
            Some(Value::Object(map)) => {
                map.insert(key, value);
                true
            }
            _ => false,
        }
    }

    /// Marks the entity as destroyed.
    pub fn destroy(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .destroyed = true;
    }

    /// Returns a copy of the entity's data.
    pub fn data(&self) -> Value {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .data
            .clone()
    }
}

impl TrackedEntity for LiveEntity {
    fn entity_ref(&self) -> EntityRef {
        self.entity_ref
    }

    fn schema(&self) -> &EntityTypeSchema {
        &self.schema
    }

    fn read(&self, property: &PropertyDescriptor) -> Option<Value> {
        self.schema.property(&property.property_id)?;
        Some(self.get(&property.member).unwrap_or(Value::Null))
    }

    fn is_destroyed(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .destroyed
    }
}
