//! Property values as seen by the tracker.

use serde::{Deserialize, Serialize};

/// A captured property value.
///
/// Placeholders are separate variants; a real string such as `"NEW"` is
/// always `Real`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A genuine value read off the entity.
    Real(serde_json::Value),
    /// The entity did not exist before this transaction (the NEW sentinel).
    Created,
    /// The entity no longer exists after this transaction (the DELETED sentinel).
    Deleted,
}

impl PropertyValue {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, PropertyValue::Created)
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        matches!(self, PropertyValue::Deleted)
    }

    /// The real value, if this is not a placeholder.
    #[must_use]
    pub fn as_real(&self) -> Option<&serde_json::Value> {
        match self {
            PropertyValue::Real(v) => Some(v),
            _ => None,
        }
    }

    /// Renders the value for an audit trail.
    ///
    /// Placeholders and JSON `null` render as `None`, strings render
    /// unquoted, everything else renders as compact JSON.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            PropertyValue::Real(serde_json::Value::Null) => None,
            PropertyValue::Real(serde_json::Value::String(s)) => Some(s.clone()),
            PropertyValue::Real(other) => Some(other.to_string()),
            PropertyValue::Created | PropertyValue::Deleted => None,
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        PropertyValue::Real(value)
    }
}
