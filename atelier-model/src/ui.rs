//! Canvas nodes: elements and component instances.

use atelier_types::{EntityId, EntityKind, Ownership};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{BindingRef, Entity, replace_binding};

/// A design-canvas node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: EntityId,
    /// Semantic HTML-like tag (`div`, `img`, `p`, ...).
    pub tag: String,
    pub ownership: Ownership,
    #[serde(default)]
    pub properties: Properties,
    /// Root-level bindings, at most one per slot (see [`BindingRef::same_slot`]).
    #[serde(default)]
    pub bindings: Vec<BindingRef>,
}

impl Element {
    #[must_use]
    pub fn new(id: impl Into<EntityId>, tag: impl Into<String>, ownership: Ownership) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            ownership,
            properties: Properties::default(),
            bindings: Vec::new(),
        }
    }

    /// Adds a root binding, replacing any binding in the same slot.
    pub fn set_root_binding(&mut self, binding: BindingRef) {
        replace_binding(&mut self.bindings, binding);
    }
}

impl Entity for Element {
    const KIND: EntityKind = EntityKind::Element;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn ownership(&self) -> Option<&Ownership> {
        Some(&self.ownership)
    }
}

/// A placement of a component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: EntityId,
    pub component_id: EntityId,
    pub ownership: Ownership,
    /// Instance-local style/content overrides.
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub bindings: Vec<BindingRef>,
    #[serde(default, rename = "override")]
    pub overrides: InstanceOverrides,
}

impl Instance {
    #[must_use]
    pub fn new(
        id: impl Into<EntityId>,
        component_id: impl Into<EntityId>,
        ownership: Ownership,
    ) -> Self {
        Self {
            id: id.into(),
            component_id: component_id.into(),
            ownership,
            properties: Properties::default(),
            bindings: Vec::new(),
            overrides: InstanceOverrides::default(),
        }
    }

    /// The override this instance sets for `prop_id`, if any.
    #[must_use]
    pub fn prop_override(&self, prop_id: &str) -> Option<&OverrideValue> {
        self.overrides.props.get(prop_id).map(|o| &o.value)
    }

    /// Sets (or replaces) the override for a prop.
    pub fn override_prop(&mut self, prop_id: impl Into<EntityId>, value: OverrideValue) {
        self.overrides
            .props
            .insert(prop_id.into(), PropOverride { value });
    }

    pub fn set_root_binding(&mut self, binding: BindingRef) {
        replace_binding(&mut self.bindings, binding);
    }
}

impl Entity for Instance {
    const KIND: EntityKind = EntityKind::Instance;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn ownership(&self) -> Option<&Ownership> {
        Some(&self.ownership)
    }
}

/// Style and content of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub style: StyleProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// Declarative style map.
///
/// Serialized flat: literal values sit next to a `binding` map that shadows
/// them, e.g. `{"color": "#000", "binding": {"color": {"kind": "TOKEN", ...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub binding: BTreeMap<String, BindingRef>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl StyleProperties {
    /// The literal value of `property`, ignoring nulls and empty strings.
    #[must_use]
    pub fn literal(&self, property: &str) -> Option<&Value> {
        self.values.get(property).filter(|v| is_set(v))
    }

    #[must_use]
    pub fn binding(&self, property: &str) -> Option<&BindingRef> {
        self.binding.get(property)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(property.into(), value.into());
    }

    pub fn bind(&mut self, property: impl Into<String>, binding: BindingRef) {
        self.binding.insert(property.into(), binding);
    }

    pub fn unbind(&mut self, property: &str) -> Option<BindingRef> {
        self.binding.remove(property)
    }
}

/// Text or image content of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingRef>,
}

impl Content {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bound(binding: BindingRef) -> Self {
        Self {
            binding: Some(binding),
            ..Self::default()
        }
    }
}

/// Per-instance overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceOverrides {
    #[serde(default)]
    pub props: BTreeMap<EntityId, PropOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropOverride {
    pub value: OverrideValue,
}

/// An override value: a typed reference or a literal.
///
/// Objects shaped `{"type": <REFERENCE_KIND>, "id": ...}` are references;
/// anything else is taken literally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Reference(ValueReference),
    Literal(Value),
}

impl OverrideValue {
    #[must_use]
    pub fn reference(kind: ReferenceKind, id: impl Into<EntityId>) -> Self {
        OverrideValue::Reference(ValueReference {
            kind,
            id: id.into(),
        })
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        OverrideValue::Literal(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueReference {
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub id: EntityId,
}

/// What an override reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceKind {
    /// One of the prop's own enumerated values.
    PropValue,
    Token,
    DataVariable,
    DataModelField,
    /// A whole data model (record-set props).
    DataModel,
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
