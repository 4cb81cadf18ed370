use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Every kind of entity the store knows about.
///
/// Serialized in `SCREAMING_SNAKE_CASE` (`"ELEMENT"`, `"PRESET_MODE_VALUE"`),
/// which is also the form used in ownership references and binding paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Screen,
    Component,
    Element,
    Instance,
    Prop,
    Token,
    TokenValue,
    Variable,
    VariableMode,
    VariableModeGroup,
    Collection,
    Preset,
    PresetModeValue,
    DataModel,
    DataModelField,
}

impl EntityKind {
    pub const ALL: [EntityKind; 15] = [
        EntityKind::Screen,
        EntityKind::Component,
        EntityKind::Element,
        EntityKind::Instance,
        EntityKind::Prop,
        EntityKind::Token,
        EntityKind::TokenValue,
        EntityKind::Variable,
        EntityKind::VariableMode,
        EntityKind::VariableModeGroup,
        EntityKind::Collection,
        EntityKind::Preset,
        EntityKind::PresetModeValue,
        EntityKind::DataModel,
        EntityKind::DataModelField,
    ];

    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Screen => "SCREEN",
            EntityKind::Component => "COMPONENT",
            EntityKind::Element => "ELEMENT",
            EntityKind::Instance => "INSTANCE",
            EntityKind::Prop => "PROP",
            EntityKind::Token => "TOKEN",
            EntityKind::TokenValue => "TOKEN_VALUE",
            EntityKind::Variable => "VARIABLE",
            EntityKind::VariableMode => "VARIABLE_MODE",
            EntityKind::VariableModeGroup => "VARIABLE_MODE_GROUP",
            EntityKind::Collection => "COLLECTION",
            EntityKind::Preset => "PRESET",
            EntityKind::PresetModeValue => "PRESET_MODE_VALUE",
            EntityKind::DataModel => "DATA_MODEL",
            EntityKind::DataModelField => "DATA_MODEL_FIELD",
        }
    }

    /// True for the kinds that may appear as an ownership `type`.
    #[must_use]
    pub const fn is_owner_kind(&self) -> bool {
        matches!(
            self,
            EntityKind::Screen | EntityKind::Element | EntityKind::Instance | EntityKind::Component
        )
    }

    /// True for the kinds that make up the composite UI tree.
    #[must_use]
    pub const fn is_ui_kind(&self) -> bool {
        matches!(self, EntityKind::Element | EntityKind::Instance)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypesError::UnknownKind(s.to_owned()))
    }
}
