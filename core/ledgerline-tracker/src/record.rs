//! Per-property change records.

use ledgerline_model::PropertyDescriptor;
use ledgerline_types::{EntityRef, PropertyId, PropertyValue};
use serde::Serialize;

/// One (entity, property) pair enlisted in the current transaction.
///
/// The pre-value is fixed at enlistment. The post-value is assigned exactly
/// once, when the snapshot is taken, and the record is immutable from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChangeRecord {
    entity_ref: EntityRef,
    entity_type: String,
    property_id: PropertyId,
    member: String,
    pre_value: PropertyValue,
    post_value: Option<PropertyValue>,
}

impl PropertyChangeRecord {
    pub(crate) fn new(
        entity_ref: EntityRef,
        entity_type: &str,
        property: &PropertyDescriptor,
        pre_value: PropertyValue,
    ) -> Self {
        Self {
            entity_ref,
            entity_type: entity_type.to_string(),
            property_id: property.property_id.clone(),
            member: property.member.clone(),
            pre_value,
            post_value: None,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        self.entity_ref
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn pre_value(&self) -> &PropertyValue {
        &self.pre_value
    }

    /// `None` until the post-value has been captured.
    pub fn post_value(&self) -> Option<&PropertyValue> {
        self.post_value.as_ref()
    }

    /// Assigns the post-value unless one is already set.
    pub(crate) fn capture_post(&mut self, value: PropertyValue) -> bool {
        if self.post_value.is_some() {
            return false;
        }
        self.post_value = Some(value);
        true
    }

    /// Whether the record is worth publishing.
    ///
    /// Created-then-deleted is invisible from outside. Otherwise a first
    /// appearance or a final disappearance always counts, and anything
    /// else counts only if the value actually changed.
    pub fn is_significant(&self) -> bool {
        let Some(post) = &self.post_value else {
            return false;
        };
        match (&self.pre_value, post) {
            (PropertyValue::Created, PropertyValue::Deleted) => false,
            (PropertyValue::Created, _) | (_, PropertyValue::Deleted) => true,
            (pre, post) => pre != post,
        }
    }
}
