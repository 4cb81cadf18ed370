use atelier_model::{
    BindingRef, Content, Element, Entity, Instance, OverrideValue, ReferenceKind, UiEntity,
};
use atelier_types::{EntityKind, Ownership};
use pretty_assertions::assert_eq;
use serde_json::json;

fn element_json() -> serde_json::Value {
    json!({
        "id": "e1",
        "tag": "div",
        "ownership": {"type": "SCREEN", "id": "s1"},
        "properties": {
            "style": {
                "backgroundColor": "#FAFAFA",
                "color": "#000",
                "binding": {
                    "color": {"kind": "TOKEN", "id": "t1"}
                }
            },
            "content": {"text": "Hello"}
        },
        "bindings": [
            {"kind": "PRESET_MODE_VALUE", "presetId": "pr1", "presetType": "TYPOGRAPHY"}
        ]
    })
}

#[test]
fn element_deserializes_flat_style_map() {
    let element: Element = serde_json::from_value(element_json()).unwrap();
    assert_eq!(element.ownership, Ownership::screen("s1"));
    assert_eq!(element.properties.style.literal("backgroundColor"), Some(&json!("#FAFAFA")));
    assert_eq!(
        element.properties.style.binding("color"),
        Some(&BindingRef::token("t1"))
    );
    assert!(!element.properties.style.values.contains_key("binding"));
    assert_eq!(element.properties.content, Some(Content::text("Hello")));
    assert_eq!(element.bindings, vec![BindingRef::typography_preset("pr1")]);
}

#[test]
fn element_round_trips_through_json() {
    let element: Element = serde_json::from_value(element_json()).unwrap();
    let back: Element = serde_json::from_value(serde_json::to_value(&element).unwrap()).unwrap();
    assert_eq!(back, element);
}

#[test]
fn empty_and_null_literals_are_unset() {
    let mut element = Element::new("e1", "div", Ownership::screen("s1"));
    element.properties.style.set("color", "");
    element.properties.style.set("margin", serde_json::Value::Null);
    element.properties.style.set("opacity", 0);
    assert_eq!(element.properties.style.literal("color"), None);
    assert_eq!(element.properties.style.literal("margin"), None);
    assert_eq!(element.properties.style.literal("opacity"), Some(&json!(0)));
}

#[test]
fn instance_override_reference_and_literal() {
    let instance: Instance = serde_json::from_value(json!({
        "id": "i1",
        "componentId": "c1",
        "ownership": {"type": "SCREEN", "id": "s1"},
        "override": {
            "props": {
                "p1": {"value": {"type": "TOKEN", "id": "t1"}},
                "p2": {"value": "plain"},
                "p3": {"value": {"label": "not a reference"}}
            }
        }
    }))
    .unwrap();

    assert_eq!(
        instance.prop_override("p1"),
        Some(&OverrideValue::reference(ReferenceKind::Token, "t1"))
    );
    assert_eq!(instance.prop_override("p2"), Some(&OverrideValue::literal("plain")));
    assert_eq!(
        instance.prop_override("p3"),
        Some(&OverrideValue::literal(json!({"label": "not a reference"})))
    );
    assert_eq!(instance.prop_override("p4"), None);
}

#[test]
fn override_prop_replaces_previous() {
    let mut instance = Instance::new("i1", "c1", Ownership::screen("s1"));
    instance.override_prop("p1", OverrideValue::literal(1));
    instance.override_prop("p1", OverrideValue::literal(2));
    assert_eq!(instance.prop_override("p1"), Some(&OverrideValue::literal(2)));
}

#[test]
fn set_root_binding_keeps_one_typography_preset() {
    let mut element = Element::new("e1", "p", Ownership::screen("s1"));
    element.set_root_binding(BindingRef::typography_preset("a"));
    element.set_root_binding(BindingRef::typography_preset("b"));
    assert_eq!(element.bindings, vec![BindingRef::typography_preset("b")]);
}

#[test]
fn ui_entity_union_accessors() {
    let element = Element::new("e1", "div", Ownership::screen("s1"));
    let instance = Instance::new("i1", "c1", Ownership::element("e1"));

    let ui = UiEntity::Element(&element);
    assert_eq!(ui.kind(), EntityKind::Element);
    assert_eq!(ui.id(), "e1");
    assert!(ui.as_instance().is_none());

    let ui = UiEntity::Instance(&instance);
    assert_eq!(ui.kind(), EntityKind::Instance);
    assert_eq!(ui.ownership(), &Ownership::element("e1"));
    assert_eq!(ui.as_instance().map(|i| i.component_id.as_str()), Some("c1"));
}

#[test]
fn entity_trait_reports_kind_and_ownership() {
    let element = Element::new("e1", "div", Ownership::component("c1"));
    assert_eq!(Element::KIND, EntityKind::Element);
    assert_eq!(element.id(), "e1");
    assert_eq!(Entity::ownership(&element), Some(&Ownership::component("c1")));
}
