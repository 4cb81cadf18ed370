//! Binding references.
//!
//! A property that is not a literal carries a [`BindingRef`] naming the
//! variable source it reads from. The set of sources is closed; anything
//! the deserializer does not recognise lands in [`BindingRef::Unsupported`]
//! so a malformed project still loads and the property simply resolves to
//! nothing.

use atelier_types::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reference from a property to a variable source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BindingRef {
    /// A component prop. `property_name` is the CSS property the value lands
    /// in, when the binding sits on a style.
    #[serde(rename_all = "camelCase")]
    Prop {
        id: EntityId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        property_name: Option<String>,
    },

    /// A design token, resolved in its collection's default mode.
    Token { id: EntityId },

    /// A field of a data model, read from the live record.
    DataModelField { id: EntityId },

    /// A data variable (scalar value or record set).
    DataVariable { id: EntityId },

    /// A preset's value for the default mode.
    #[serde(rename_all = "camelCase")]
    PresetModeValue {
        preset_id: EntityId,
        preset_type: PresetType,
    },

    /// Any discriminant this build does not understand.
    #[serde(other)]
    Unsupported,
}

impl BindingRef {
    #[must_use]
    pub fn prop(id: impl Into<EntityId>) -> Self {
        BindingRef::Prop {
            id: id.into(),
            property_name: None,
        }
    }

    #[must_use]
    pub fn token(id: impl Into<EntityId>) -> Self {
        BindingRef::Token { id: id.into() }
    }

    #[must_use]
    pub fn data_model_field(id: impl Into<EntityId>) -> Self {
        BindingRef::DataModelField { id: id.into() }
    }

    #[must_use]
    pub fn data_variable(id: impl Into<EntityId>) -> Self {
        BindingRef::DataVariable { id: id.into() }
    }

    #[must_use]
    pub fn typography_preset(preset_id: impl Into<EntityId>) -> Self {
        BindingRef::PresetModeValue {
            preset_id: preset_id.into(),
            preset_type: PresetType::Typography,
        }
    }

    /// The binding's kind, or `None` for [`BindingRef::Unsupported`].
    #[must_use]
    pub fn kind(&self) -> Option<BindingKind> {
        match self {
            BindingRef::Prop { .. } => Some(BindingKind::Prop),
            BindingRef::Token { .. } => Some(BindingKind::Token),
            BindingRef::DataModelField { .. } => Some(BindingKind::DataModelField),
            BindingRef::DataVariable { .. } => Some(BindingKind::DataVariable),
            BindingRef::PresetModeValue { .. } => Some(BindingKind::PresetModeValue),
            BindingRef::Unsupported => None,
        }
    }

    /// True if both bindings occupy the same root-binding slot.
    ///
    /// Slots are per kind; preset bindings are additionally split by preset
    /// type, so an element holds at most one typography preset.
    #[must_use]
    pub fn same_slot(&self, other: &BindingRef) -> bool {
        match (self, other) {
            (
                BindingRef::PresetModeValue { preset_type: a, .. },
                BindingRef::PresetModeValue { preset_type: b, .. },
            ) => a == b,
            _ => self.kind().is_some() && self.kind() == other.kind(),
        }
    }
}

/// Inserts `binding` into a root-binding list, replacing whatever held its slot.
pub fn replace_binding(bindings: &mut Vec<BindingRef>, binding: BindingRef) {
    bindings.retain(|existing| !existing.same_slot(&binding));
    bindings.push(binding);
}

/// Discriminant of a [`BindingRef`], as used in `bindings.<KIND>` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BindingKind {
    Prop,
    Token,
    DataModelField,
    DataVariable,
    PresetModeValue,
}

impl BindingKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Prop => "PROP",
            BindingKind::Token => "TOKEN",
            BindingKind::DataModelField => "DATA_MODEL_FIELD",
            BindingKind::DataVariable => "DATA_VARIABLE",
            BindingKind::PresetModeValue => "PRESET_MODE_VALUE",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROP" => Ok(BindingKind::Prop),
            "TOKEN" => Ok(BindingKind::Token),
            "DATA_MODEL_FIELD" => Ok(BindingKind::DataModelField),
            "DATA_VARIABLE" => Ok(BindingKind::DataVariable),
            "PRESET_MODE_VALUE" => Ok(BindingKind::PresetModeValue),
            other => Err(format!("unknown binding kind: {other}")),
        }
    }
}

/// What a preset bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetType {
    Typography,
    Element,
}
