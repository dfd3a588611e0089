use ledgerline_types::{EntityRef, PropertyId, TransactionId};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

// ── EntityRef ────────────────────────────────────────────────────

#[test]
fn entity_ref_unique() {
    assert_ne!(EntityRef::new(), EntityRef::new());
}

#[test]
fn entity_ref_from_uuid_roundtrip() {
    let uuid = Uuid::now_v7();
    assert_eq!(EntityRef::from_uuid(uuid).as_uuid(), uuid);
}

#[test]
fn entity_ref_same_uuid_same_entity() {
    let uuid = Uuid::now_v7();
    let mut set = HashSet::new();
    set.insert(EntityRef::from_uuid(uuid));
    set.insert(EntityRef::from_uuid(uuid));
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_ref_parse() {
    let r = EntityRef::new();
    assert_eq!(EntityRef::parse(&r.to_string()).unwrap(), r);
    assert!(EntityRef::from_str("not-a-uuid").is_err());
}

#[test]
fn entity_ref_parse_keeps_stored_key() {
    let stored = "0190a6f2-7c3e-7b1a-9d4e-2f5c8a1b3d6e";
    let r = EntityRef::parse(stored).unwrap();
    assert_eq!(r.as_uuid(), Uuid::parse_str(stored).unwrap());
    assert_eq!(r.to_string(), stored);
    assert!(EntityRef::parse("row-42").is_err());
}

// ── TransactionId ────────────────────────────────────────────────

#[test]
fn transaction_id_unique() {
    assert_ne!(TransactionId::new(), TransactionId::default());
}

#[test]
fn transaction_id_serde_is_transparent() {
    let id = TransactionId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
}

// ── PropertyId ───────────────────────────────────────────────────

#[test]
fn property_id_conversions() {
    let a = PropertyId::from("title");
    let b = PropertyId::new(String::from("title"));
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "title");
    assert_eq!(a.to_string(), "title");
}
