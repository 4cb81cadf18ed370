mod common;

use atelier_store::{Store, StoreError};
use atelier_types::EntityKind;
use pretty_assertions::assert_eq;
use serde_json::json;

fn snapshot_json() -> String {
    json!({
        "elements": [
            {"id": "e1", "tag": "div", "ownership": {"type": "SCREEN", "id": "s1"}},
            {"id": "e2", "tag": "p", "ownership": {"type": "ELEMENT", "id": "e1"},
             "properties": {"content": {"text": "Hi"}}}
        ],
        "instances": [
            {"id": "i1", "componentId": "c1", "ownership": {"type": "SCREEN", "id": "s1"}}
        ],
        "variableModes": [
            {"id": "m1", "name": "Desktop", "isDefault": true},
            {"id": "m2", "name": "Mobile"}
        ],
        "collections": [
            {"id": "col", "name": "Breakpoints", "modeIds": ["m1", "m2"]}
        ],
        "records": {
            "tasks": [{"title": "a"}, {"title": "b"}]
        }
    })
    .to_string()
}

#[test]
fn loads_snapshot_and_builds_indexes() {
    common::init_tracing();
    let store = Store::from_snapshot_json(&snapshot_json()).unwrap();
    assert_eq!(store.elements().len(), 2);
    assert_eq!(store.entities_by_ownership(EntityKind::Screen, "s1").len(), 2);
    assert_eq!(store.entities_by_ownership(EntityKind::Element, "e1").len(), 1);
    assert_eq!(store.records_by_model_id("tasks").len(), 2);
    assert_eq!(
        store.default_mode_for_collection("col").map(|m| m.name.as_str()),
        Some("Desktop")
    );
}

#[test]
fn snapshot_round_trip_preserves_contents() {
    let store = Store::from_snapshot_json(&snapshot_json()).unwrap();
    let again = Store::from_snapshot(store.to_snapshot()).unwrap();
    assert_eq!(
        serde_json::to_value(again.to_snapshot()).unwrap(),
        serde_json::to_value(store.to_snapshot()).unwrap()
    );
}

#[test]
fn snapshot_with_broken_default_mode_fails() {
    let json = json!({
        "variableModes": [{"id": "m1", "name": "A"}],
        "collections": [{"id": "col", "name": "X", "modeIds": ["m1"]}]
    })
    .to_string();
    assert!(matches!(
        Store::from_snapshot_json(&json),
        Err(StoreError::DefaultModeViolation { count: 0, .. })
    ));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    assert!(matches!(
        Store::from_snapshot_json("{not json"),
        Err(StoreError::Serialization(_))
    ));
}

#[test]
fn invalid_ownership_kind_fails_to_load() {
    let json = json!({
        "elements": [{"id": "e1", "tag": "div", "ownership": {"type": "TOKEN", "id": "t"}}]
    })
    .to_string();
    assert!(Store::from_snapshot_json(&json).is_err());
}
