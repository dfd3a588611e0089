use ledgerline_types::PropertyId;
use serde::{Deserialize, Serialize};

/// Describes an entity type's properties as far as change tracking cares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeSchema {
    pub entity_type: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityTypeSchema {
    pub fn new(entity_type: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            entity_type: entity_type.into(),
            properties,
        }
    }

    /// Properties whose values are captured: persistable and not derived.
    pub fn tracked_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_tracked())
    }

    /// Looks up a property by its id.
    pub fn property(&self, property_id: &PropertyId) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| &p.property_id == property_id)
    }

    /// Resolves a binding name (member path or property id) to a tracked property.
    pub fn resolve_member(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.tracked_properties()
            .find(|p| p.member == name || p.property_id.as_str() == name)
    }
}

/// One property of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub property_id: PropertyId,
    /// JSON pointer path into the entity data (e.g., "/title").
    pub member: String,
    /// Whether the property is written to the store at all.
    pub persistable: bool,
    /// Whether the value is computed from other properties.
    #[serde(default)]
    pub derived: bool,
}

impl PropertyDescriptor {
    /// A property with an explicit id and member path.
    pub fn named(
        property_id: impl Into<PropertyId>,
        member: &str,
        persistable: bool,
        derived: bool,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            member: member.into(),
            persistable,
            derived,
        }
    }

    /// Shorthand for a plain stored property; the id is the path without its
    /// leading slash, with nested segments joined by dots.
    pub fn stored(member: &str) -> Self {
        Self::named(id_from_member(member), member, true, false)
    }

    /// Shorthand for a derived (computed) property. Never tracked.
    pub fn derived(member: &str) -> Self {
        Self::named(id_from_member(member), member, true, true)
    }

    /// Shorthand for a transient (non-persistable) property. Never tracked.
    pub fn transient(member: &str) -> Self {
        Self::named(id_from_member(member), member, false, false)
    }

    pub fn is_tracked(&self) -> bool {
        self.persistable && !self.derived
    }
}

fn id_from_member(member: &str) -> String {
    member.trim_start_matches('/').replace('/', ".")
}
