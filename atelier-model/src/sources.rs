//! Variable sources a property can be bound to.

use atelier_types::{EntityId, EntityKind, Ownership, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PresetType;
use crate::entity::{flat_entity, scoped_entity};

// ── Props ────────────────────────────────────────────────────────

/// A component or screen parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prop {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub prop_type: PropType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Ownership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Enumerated values; one may be flagged as the default.
    #[serde(default)]
    pub values: Vec<PropValue>,
    /// Declared data model of a `DATA` prop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<EntityId>,
}

impl Prop {
    /// The prop's own value: the default-flagged value, else the first
    /// value, else `default_value`.
    #[must_use]
    pub fn effective_value(&self) -> Option<&Value> {
        self.values
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.values.first())
            .map(|v| &v.value)
            .or(self.default_value.as_ref())
    }

    /// Looks up one of the prop's enumerated values.
    #[must_use]
    pub fn value_by_id(&self, value_id: &str) -> Option<&PropValue> {
        self.values.iter().find(|v| v.id == value_id)
    }

    #[must_use]
    pub fn is_data_set(&self) -> bool {
        self.prop_type == PropType::Data
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropValue {
    pub id: EntityId,
    pub value: Value,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropType {
    #[default]
    String,
    Number,
    Boolean,
    Color,
    Enum,
    Image,
    /// A record set drawn from a data model.
    Data,
    #[serde(other)]
    Other,
}

// ── Tokens & modes ───────────────────────────────────────────────

/// A design token. Its value varies per mode of its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: EntityId,
    pub name: String,
    pub collection_id: EntityId,
}

/// The value of a token in one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValue {
    pub id: EntityId,
    pub token_id: EntityId,
    pub mode_id: EntityId,
    pub value: Value,
}

/// Groups tokens or presets and lists the modes they vary along.
///
/// Exactly one of the referenced modes is flagged default; the store
/// refuses mutations that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub collection_type: CollectionType,
    #[serde(default)]
    pub mode_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    #[default]
    Tokens,
    Presets,
}

/// One axis value of a collection (a breakpoint, a theme).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<EntityId>,
}

/// Aggregates related modes (all breakpoints, all themes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableModeGroup {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub mode_ids: Vec<EntityId>,
}

// ── Data ─────────────────────────────────────────────────────────

/// A data variable: a scalar value or a (filtered) record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub variable_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Ownership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<EntityId>,
    /// AND-combined equality filters applied to the model's records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<RecordFilter>,
}

impl Variable {
    #[must_use]
    pub fn is_data_set(&self) -> bool {
        self.variable_type == VariableType::Data
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    #[default]
    String,
    Number,
    Boolean,
    Data,
    #[serde(other)]
    Other,
}

/// `record[field] == value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub field: String,
    pub value: Value,
}

impl RecordFilter {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        record.get(&self.field) == Some(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelField {
    pub id: EntityId,
    pub name: String,
    pub model_id: EntityId,
}

// ── Presets ──────────────────────────────────────────────────────

/// A named bundle of style values that varies per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub preset_type: PresetType,
    pub collection_id: EntityId,
}

/// A preset's style bundle for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetModeValue {
    pub id: EntityId,
    pub preset_id: EntityId,
    pub mode_id: EntityId,
    #[serde(default)]
    pub value: Map<String, Value>,
}

scoped_entity!(Prop, EntityKind::Prop);
scoped_entity!(Variable, EntityKind::Variable);
flat_entity!(Token, EntityKind::Token);
flat_entity!(TokenValue, EntityKind::TokenValue);
flat_entity!(Collection, EntityKind::Collection);
flat_entity!(VariableMode, EntityKind::VariableMode);
flat_entity!(VariableModeGroup, EntityKind::VariableModeGroup);
flat_entity!(DataModel, EntityKind::DataModel);
flat_entity!(DataModelField, EntityKind::DataModelField);
flat_entity!(Preset, EntityKind::Preset);
flat_entity!(PresetModeValue, EntityKind::PresetModeValue);
