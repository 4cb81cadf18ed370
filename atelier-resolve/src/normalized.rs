use atelier_model::{PresetType, PropType, RecordFilter};
use atelier_types::EntityId;
use serde::Serialize;
use serde_json::Value;

/// Whether literal content is text or an image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
}

/// A property resolved to its source, before render context is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalizedBinding {
    /// A literal style value, or literal text/image content.
    #[serde(rename_all = "camelCase")]
    Literal {
        value: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        content_type: Option<ContentType>,
    },

    #[serde(rename_all = "camelCase")]
    Prop {
        prop_id: EntityId,
        prop_type: PropType,
        /// The CSS property the value lands in, if any.
        property_name: Option<String>,
        /// The prop's own value (default-flagged, first, or `defaultValue`).
        prop_value: Option<Value>,
        /// Declared model of a `DATA` prop.
        model_id: Option<EntityId>,
    },

    #[serde(rename_all = "camelCase")]
    Token {
        token_id: EntityId,
        /// Value in the token's default mode.
        token_value: Option<Value>,
    },

    /// Field name only; the value comes from the live record.
    #[serde(rename_all = "camelCase")]
    DataModelField {
        field_id: EntityId,
        field_name: String,
        model_name: String,
    },

    #[serde(rename_all = "camelCase")]
    DataVariable {
        variable_id: EntityId,
        value: Option<Value>,
        model_id: Option<EntityId>,
        is_data_set: bool,
        filters: Vec<RecordFilter>,
    },

    #[serde(rename_all = "camelCase")]
    PresetModeValue {
        preset_id: EntityId,
        preset_type: PresetType,
        value: Option<Value>,
    },
}

impl NormalizedBinding {
    /// True for bindings that resolve to a record array.
    #[must_use]
    pub fn is_data_set(&self) -> bool {
        match self {
            NormalizedBinding::Prop { prop_type, .. } => *prop_type == PropType::Data,
            NormalizedBinding::DataVariable { is_data_set, .. } => *is_data_set,
            _ => false,
        }
    }

    /// The prop type, for prop bindings.
    #[must_use]
    pub fn prop_type(&self) -> Option<PropType> {
        match self {
            NormalizedBinding::Prop { prop_type, .. } => Some(*prop_type),
            _ => None,
        }
    }
}
