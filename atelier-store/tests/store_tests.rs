mod common;

use atelier_model::{
    BindingRef, Component, Element, Instance, Preset, PresetType, TokenValue, VariableMode,
};
use atelier_store::{Store, StoreError};
use atelier_types::{EntityId, EntityKind, Ownership};
use common::{collection, element, instance, mode};
use pretty_assertions::assert_eq;
use serde_json::json;

fn store_with_modes() -> Store {
    let mut store = Store::new();
    store
        .add_collection_with_modes(
            collection("col", &["light", "dark"]),
            vec![mode("light", true), mode("dark", false)],
        )
        .unwrap();
    store
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn ui_entity_lookup_covers_both_kinds() {
    let mut store = Store::new();
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();
    store.insert(instance("i1", "c1", Ownership::screen("s1"))).unwrap();

    assert_eq!(store.ui_entity_by_id("e1").map(|u| u.kind()), Some(EntityKind::Element));
    assert_eq!(store.ui_entity_by_id("i1").map(|u| u.kind()), Some(EntityKind::Instance));
    assert!(store.ui_entity_by_id("nope").is_none());
}

#[test]
fn entities_by_ownership_lists_elements_then_instances() {
    let mut store = Store::new();
    store.insert(instance("i1", "c1", Ownership::screen("s1"))).unwrap();
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();
    store.insert(element("e2", Ownership::screen("other"))).unwrap();

    assert_eq!(
        store.entities_by_ownership(EntityKind::Screen, "s1"),
        vec![EntityId::from("e1"), EntityId::from("i1")]
    );
}

#[test]
fn token_value_lookup_by_token_and_mode() {
    let mut store = store_with_modes();
    for (id, mode_id, value) in [("tv1", "light", "#fff"), ("tv2", "dark", "#000")] {
        store
            .insert(TokenValue {
                id: id.into(),
                token_id: "t1".into(),
                mode_id: mode_id.into(),
                value: json!(value),
            })
            .unwrap();
    }
    assert_eq!(
        store.token_value_by_token_id_and_mode_id("t1", "dark").map(|v| &v.value),
        Some(&json!("#000"))
    );
    assert!(store.token_value_by_token_id_and_mode_id("t1", "sepia").is_none());
}

#[test]
fn default_mode_lookup() {
    let store = store_with_modes();
    assert_eq!(
        store.default_mode_for_collection("col").map(|m| m.id.as_str()),
        Some("light")
    );
    assert_eq!(
        store
            .default_variable_mode_by_ids(&["dark".into(), "light".into()])
            .map(|m| m.id.as_str()),
        Some("light")
    );
    assert!(store.default_mode_for_collection("missing").is_none());
}

// ── Default-mode invariant ───────────────────────────────────────

#[test]
fn collection_without_default_is_rejected() {
    let mut store = Store::new();
    let err = store
        .add_collection_with_modes(collection("col", &["a", "b"]), vec![mode("a", false), mode("b", false)])
        .unwrap_err();
    assert!(matches!(err, StoreError::DefaultModeViolation { count: 0, .. }));
    assert!(store.collection_by_id("col").is_none());
    assert!(store.variable_mode_by_id("a").is_none());
}

#[test]
fn collection_with_two_defaults_is_rejected() {
    let mut store = Store::new();
    let err = store
        .add_collection_with_modes(collection("col", &["a", "b"]), vec![mode("a", true), mode("b", true)])
        .unwrap_err();
    assert!(matches!(err, StoreError::DefaultModeViolation { count: 2, .. }));
}

#[test]
fn flagging_a_second_default_mode_is_rejected() {
    let mut store = store_with_modes();
    let err = store
        .update::<VariableMode>("dark", |m| m.is_default = true)
        .unwrap_err();
    assert!(matches!(err, StoreError::DefaultModeViolation { .. }));
    assert!(!store.variable_mode_by_id("dark").unwrap().is_default);
}

#[test]
fn removing_the_default_mode_is_rejected() {
    let mut store = store_with_modes();
    assert!(store.remove::<VariableMode>("light").is_err());
    assert!(store.remove::<VariableMode>("dark").unwrap().is_some());
}

#[test]
fn set_default_mode_swaps_atomically() {
    let mut store = store_with_modes();
    store.set_default_mode("col", "dark").unwrap();
    assert_eq!(
        store.default_mode_for_collection("col").map(|m| m.id.as_str()),
        Some("dark")
    );
    assert!(!store.variable_mode_by_id("light").unwrap().is_default);
    store.validate_default_modes().unwrap();
}

#[test]
fn set_default_mode_requires_membership() {
    let mut store = store_with_modes();
    store.insert(mode("sepia", false)).unwrap();
    let err = store.set_default_mode("col", "sepia").unwrap_err();
    assert!(matches!(err, StoreError::ModeNotInCollection { .. }));
    let err = store.set_default_mode("nope", "light").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: EntityKind::Collection, .. }));
}

#[test]
fn bulk_replace_that_breaks_invariant_rolls_back() {
    let mut store = store_with_modes();
    let err = store
        .set_all(vec![mode("light", false), mode("dark", false)])
        .unwrap_err();
    assert!(matches!(err, StoreError::DefaultModeViolation { .. }));
    assert!(store.variable_mode_by_id("light").unwrap().is_default);
}

// ── Mutations ────────────────────────────────────────────────────

#[test]
fn removing_instance_keeps_component() {
    let mut store = Store::new();
    store
        .insert(Component {
            id: "c1".into(),
            name: "Card".into(),
        })
        .unwrap();
    store.insert(instance("i1", "c1", Ownership::screen("s1"))).unwrap();
    store.remove::<Instance>("i1").unwrap();
    assert!(store.instance_by_id("i1").is_none());
    assert!(store.component_by_id("c1").is_some());
}

#[test]
fn remove_ui_subtree_takes_nested_nodes_only() {
    let mut store = Store::new();
    store.insert(element("root", Ownership::screen("s1"))).unwrap();
    store.insert(element("child", Ownership::element("root"))).unwrap();
    store.insert(instance("inst", "c1", Ownership::element("child"))).unwrap();
    store.insert(element("inside", Ownership::instance("inst"))).unwrap();
    store.insert(element("comp-el", Ownership::component("c1"))).unwrap();
    store.insert(element("sibling", Ownership::screen("s1"))).unwrap();

    let mut removed = store.remove_ui_subtree("root");
    removed.sort();
    assert_eq!(
        removed,
        vec![
            EntityId::from("child"),
            EntityId::from("inside"),
            EntityId::from("inst"),
            EntityId::from("root"),
        ]
    );
    assert!(store.element_by_id("comp-el").is_some());
    assert!(store.element_by_id("sibling").is_some());
    assert!(store.remove_ui_subtree("root").is_empty());
}

#[test]
fn style_edit_keeps_entities_by_ownership_order() {
    let mut store = Store::new();
    store.insert(element("a", Ownership::screen("s1"))).unwrap();
    store.insert(element("b", Ownership::screen("s1"))).unwrap();
    store.insert(instance("i1", "c1", Ownership::screen("s1"))).unwrap();
    let before = store.entities_by_ownership(EntityKind::Screen, "s1");

    store
        .update::<atelier_model::Element>("a", |e| e.properties.style.set("color", "red"))
        .unwrap();

    assert_eq!(store.entities_by_ownership(EntityKind::Screen, "s1"), before);
    let reloaded = Store::from_snapshot(store.to_snapshot()).unwrap();
    assert_eq!(reloaded.entities_by_ownership(EntityKind::Screen, "s1"), before);
}

#[test]
fn move_ui_node_reparents_elements_and_instances() {
    let mut store = Store::new();
    store.insert(element("frame", Ownership::screen("s1"))).unwrap();
    store.insert(element("label", Ownership::screen("s1"))).unwrap();
    store.insert(instance("i1", "c1", Ownership::screen("s1"))).unwrap();

    store.move_ui_node("label", EntityKind::Element, "frame").unwrap();
    store.move_ui_node("i1", EntityKind::Component, "c2").unwrap();

    assert_eq!(
        store.entities_by_ownership(EntityKind::Element, "frame"),
        vec![EntityId::from("label")]
    );
    assert_eq!(
        store.entities_by_ownership(EntityKind::Component, "c2"),
        vec![EntityId::from("i1")]
    );
    assert_eq!(
        store.entities_by_ownership(EntityKind::Screen, "s1"),
        vec![EntityId::from("frame")]
    );
}

#[test]
fn move_ui_node_rejects_non_owner_kinds() {
    let mut store = Store::new();
    store.insert(element("label", Ownership::screen("s1"))).unwrap();
    let revision = store.revision();

    let err = store.move_ui_node("label", EntityKind::Token, "t1").unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidOwnership(atelier_types::TypesError::InvalidOwnerKind(EntityKind::Token))
    ));
    assert_eq!(store.revision(), revision);
    assert!(matches!(
        store.move_ui_node("ghost", EntityKind::Screen, "s1"),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn typography_preset_replaces_previous_one() {
    let mut store = store_with_modes();
    for id in ["heading", "body"] {
        store
            .insert(Preset {
                id: id.into(),
                name: id.into(),
                preset_type: PresetType::Typography,
                collection_id: "col".into(),
            })
            .unwrap();
    }
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();

    store.apply_typography_preset("e1", "heading").unwrap();
    store.apply_typography_preset("e1", "body").unwrap();
    assert_eq!(
        store.element_by_id("e1").unwrap().bindings,
        vec![BindingRef::typography_preset("body")]
    );
}

#[test]
fn element_preset_is_not_typography() {
    let mut store = store_with_modes();
    store
        .insert(Preset {
            id: "card".into(),
            name: "card".into(),
            preset_type: PresetType::Element,
            collection_id: "col".into(),
        })
        .unwrap();
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();
    assert!(matches!(
        store.apply_typography_preset("e1", "card"),
        Err(StoreError::NotTypographyPreset(_))
    ));
    assert!(matches!(
        store.apply_typography_preset("ghost", "card"),
        Err(StoreError::NotTypographyPreset(_))
    ));
}

#[test]
fn revision_moves_on_any_mutation() {
    let mut store = Store::new();
    let r0 = store.revision();
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();
    let r1 = store.revision();
    store.records_mut().push_record("m1", serde_json::Map::new());
    let r2 = store.revision();
    assert!(r0 < r1 && r1 < r2);
    assert_eq!(store.revision(), r2);
}

#[test]
fn update_reindexes_through_store() {
    let mut store = Store::new();
    store.insert(element("e1", Ownership::screen("s1"))).unwrap();
    store
        .update::<Element>("e1", |e| e.ownership = Ownership::screen("s2"))
        .unwrap();
    assert!(store.entities_by_ownership(EntityKind::Screen, "s1").is_empty());
    assert_eq!(store.entities_by_ownership(EntityKind::Screen, "s2").len(), 1);
}
