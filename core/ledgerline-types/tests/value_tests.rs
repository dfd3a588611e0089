use ledgerline_types::PropertyValue;
use pretty_assertions::{assert_eq, assert_ne};
use serde_json::json;

// ── Placeholders ─────────────────────────────────────────────────

#[test]
fn placeholders_never_equal_real_values() {
    assert_ne!(PropertyValue::Created, PropertyValue::Real(json!("NEW")));
    assert_ne!(PropertyValue::Deleted, PropertyValue::Real(json!("DELETED")));
    assert_ne!(PropertyValue::Created, PropertyValue::Deleted);
}

#[test]
fn placeholder_predicates() {
    assert!(PropertyValue::Created.is_created());
    assert!(!PropertyValue::Created.is_deleted());
    assert!(PropertyValue::Deleted.is_deleted());
    assert!(PropertyValue::Real(json!(1)).as_real().is_some());
    assert!(PropertyValue::Deleted.as_real().is_none());
}

// ── Rendering ────────────────────────────────────────────────────

#[test]
fn render_strings_unquoted() {
    assert_eq!(PropertyValue::Real(json!("hello")).render(), Some("hello".to_string()));
}

#[test]
fn render_other_values_as_json() {
    assert_eq!(PropertyValue::Real(json!(42)).render(), Some("42".to_string()));
    assert_eq!(PropertyValue::Real(json!(true)).render(), Some("true".to_string()));
    assert_eq!(
        PropertyValue::Real(json!({"a": [1, 2]})).render(),
        Some(r#"{"a":[1,2]}"#.to_string())
    );
}

#[test]
fn render_null_and_placeholders_as_none() {
    assert_eq!(PropertyValue::Real(json!(null)).render(), None);
    assert_eq!(PropertyValue::Created.render(), None);
    assert_eq!(PropertyValue::Deleted.render(), None);
}

#[test]
fn serde_keeps_placeholders_distinct() {
    let json = serde_json::to_string(&PropertyValue::Created).unwrap();
    let parsed: PropertyValue = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, PropertyValue::Created);

    let real = PropertyValue::Real(json!("created"));
    let json = serde_json::to_string(&real).unwrap();
    let parsed: PropertyValue = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, real);
}
