use atelier_model::{
    BindingRef, Instance, OverrideValue, ReferenceKind, UiEntity, Variable,
};
use atelier_store::Store;
use atelier_types::{EntityId, EntityKind, Record};
use serde_json::Value;
use tracing::debug;

use crate::normalized::{ContentType, NormalizedBinding};
use crate::path::PropertyPath;

/// Per-render context for [`Resolver::resolve_prepared`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveContext<'a> {
    /// The record being rendered when inside a repeated (data-set) subtree.
    pub current_data_record: Option<&'a Record>,
    /// The instance whose overrides apply to prop bindings.
    pub current_instance: Option<&'a Instance>,
}

impl<'a> ResolveContext<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(mut self, record: &'a Record) -> Self {
        self.current_data_record = Some(record);
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: &'a Instance) -> Self {
        self.current_instance = Some(instance);
        self
    }
}

/// Read-only binding resolution over a [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'s> {
    store: &'s Store,
}

impl<'s> Resolver<'s> {
    #[must_use]
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &'s Store {
        self.store
    }

    /// Resolves `path` on `ui_id` straight to its render value.
    #[must_use]
    pub fn resolve(&self, ui_id: &str, path: &str, ctx: &ResolveContext<'_>) -> Option<Value> {
        let normalized = self.resolve_normalized(ui_id, path)?;
        self.resolve_prepared(&normalized, ctx)
    }

    // ── Normalization ───────────────────────────────────────────

    /// Reads the property at `path` and follows its binding to the source.
    ///
    /// Returns `None` when the node does not exist, the path is malformed,
    /// the property is unset, or the binding dangles.
    #[must_use]
    pub fn resolve_normalized(&self, ui_id: &str, path: &str) -> Option<NormalizedBinding> {
        let Some(ui) = self.store.ui_entity_by_id(ui_id) else {
            debug!(ui_id, "no element or instance to resolve against");
            return None;
        };
        let Some(parsed) = PropertyPath::parse(path) else {
            debug!(ui_id, path, "unrecognised property path");
            return None;
        };

        match parsed {
            PropertyPath::Content => self.normalize_content(ui),
            PropertyPath::Style(property) => {
                let style = &ui.properties().style;
                match style.binding(&property) {
                    Some(binding) => self.resolve_style_binding(binding, &property),
                    None => style.literal(&property).map(|value| NormalizedBinding::Literal {
                        value: value.clone(),
                        content_type: None,
                    }),
                }
            }
            PropertyPath::Binding(kind) => {
                let binding = ui.bindings().iter().find(|b| b.kind() == Some(kind))?;
                self.resolve_reference(binding)
            }
        }
    }

    fn normalize_content(&self, ui: UiEntity<'_>) -> Option<NormalizedBinding> {
        let content = ui.properties().content.as_ref()?;
        if let Some(binding) = &content.binding {
            return self.resolve_reference(binding);
        }

        let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);
        if let Some(text) = non_empty(&content.text) {
            Some(NormalizedBinding::Literal {
                value: Value::String(text),
                content_type: Some(ContentType::Text),
            })
        } else {
            non_empty(&content.src).map(|src| NormalizedBinding::Literal {
                value: Value::String(src),
                content_type: Some(ContentType::Image),
            })
        }
    }

    /// A style binding without an explicit `propertyName` lands in the
    /// style key it is bound under.
    fn resolve_style_binding(&self, binding: &BindingRef, property: &str) -> Option<NormalizedBinding> {
        let mut normalized = self.resolve_reference(binding)?;
        if let NormalizedBinding::Prop { property_name, .. } = &mut normalized {
            property_name.get_or_insert_with(|| property.to_owned());
        }
        Some(normalized)
    }

    /// Follows a binding reference to its source entity.
    #[must_use]
    pub fn resolve_reference(&self, binding: &BindingRef) -> Option<NormalizedBinding> {
        let store = self.store;
        match binding {
            BindingRef::Prop { id, property_name } => {
                let Some(prop) = store.prop_by_id(id.as_str()) else {
                    debug!(kind = %EntityKind::Prop, %id, "bound prop missing");
                    return None;
                };
                Some(NormalizedBinding::Prop {
                    prop_id: prop.id.clone(),
                    prop_type: prop.prop_type,
                    property_name: property_name.clone(),
                    prop_value: prop.effective_value().cloned(),
                    model_id: if prop.is_data_set() {
                        self.existing_model(prop.model_id.as_ref())
                    } else {
                        prop.model_id.clone()
                    },
                })
            }
            BindingRef::Token { id } => {
                let Some(token) = store.token_by_id(id.as_str()) else {
                    debug!(kind = %EntityKind::Token, %id, "bound token missing");
                    return None;
                };
                Some(NormalizedBinding::Token {
                    token_id: token.id.clone(),
                    token_value: self.token_value(id.as_str()),
                })
            }
            BindingRef::DataModelField { id } => {
                let Some(field) = store.model_field_by_id(id.as_str()) else {
                    debug!(kind = %EntityKind::DataModelField, %id, "bound field missing");
                    return None;
                };
                let Some(model) = store.model_by_id(field.model_id.as_str()) else {
                    debug!(kind = %EntityKind::DataModel, id = %field.model_id, "field's model missing");
                    return None;
                };
                Some(NormalizedBinding::DataModelField {
                    field_id: field.id.clone(),
                    field_name: field.name.clone(),
                    model_name: model.name.clone(),
                })
            }
            BindingRef::DataVariable { id } => {
                let Some(variable) = store.variable_by_id(id.as_str()) else {
                    debug!(kind = %EntityKind::Variable, %id, "bound variable missing");
                    return None;
                };
                let model_id = if variable.is_data_set() {
                    self.existing_model(variable.model_id.as_ref())
                } else {
                    variable.model_id.clone()
                };
                Some(NormalizedBinding::DataVariable {
                    variable_id: variable.id.clone(),
                    value: variable.value.clone(),
                    model_id,
                    is_data_set: variable.is_data_set(),
                    filters: variable.filters.clone(),
                })
            }
            BindingRef::PresetModeValue { preset_id, .. } => {
                let Some(preset) = store.preset_by_id(preset_id.as_str()) else {
                    debug!(kind = %EntityKind::Preset, id = %preset_id, "bound preset missing");
                    return None;
                };
                let value = store
                    .default_mode_for_collection(preset.collection_id.as_str())
                    .and_then(|mode| {
                        store.preset_mode_value_by_preset_id_and_mode_id(
                            preset.id.as_str(),
                            mode.id.as_str(),
                        )
                    })
                    .map(|pmv| Value::Object(pmv.value.clone()));
                if value.is_none() {
                    debug!(kind = %EntityKind::Preset, id = %preset_id, "no value for the default mode");
                }
                Some(NormalizedBinding::PresetModeValue {
                    preset_id: preset.id.clone(),
                    preset_type: preset.preset_type,
                    value,
                })
            }
            BindingRef::Unsupported => {
                debug!("unsupported binding kind");
                None
            }
        }
    }

    /// Token value in its collection's default mode.
    fn token_value(&self, token_id: &str) -> Option<Value> {
        let store = self.store;
        let token = store.token_by_id(token_id)?;
        let Some(mode) = store.default_mode_for_collection(token.collection_id.as_str()) else {
            debug!(
                kind = %EntityKind::Collection,
                id = %token.collection_id,
                "token collection or default mode missing"
            );
            return None;
        };
        let value = store.token_value_by_token_id_and_mode_id(token_id, mode.id.as_str());
        if value.is_none() {
            debug!(kind = %EntityKind::TokenValue, token_id, mode_id = %mode.id, "no token value");
        }
        value.map(|v| v.value.clone())
    }

    // ── Preparation ─────────────────────────────────────────────

    /// Applies render context and override precedence.
    ///
    /// Data-set bindings resolve to an array of records. `None` means the
    /// property has no value in this context.
    #[must_use]
    pub fn resolve_prepared(
        &self,
        normalized: &NormalizedBinding,
        ctx: &ResolveContext<'_>,
    ) -> Option<Value> {
        if let (NormalizedBinding::DataModelField { field_name, .. }, Some(record)) =
            (normalized, ctx.current_data_record)
        {
            return record.get(field_name).cloned();
        }

        if normalized.is_data_set() {
            let records = self.resolve_data_set(normalized, ctx);
            return Some(Value::Array(records.into_iter().map(Value::Object).collect()));
        }

        match normalized {
            NormalizedBinding::Prop {
                prop_id,
                property_name,
                prop_value,
                ..
            } => {
                let overridden = ctx
                    .current_instance
                    .and_then(|instance| instance.prop_override(prop_id.as_str()))
                    .and_then(|ov| self.resolve_override(prop_id.as_str(), ov, ctx));
                let value = overridden.or_else(|| prop_value.clone())?;
                Some(map_display(property_name.as_deref(), value))
            }
            NormalizedBinding::Token { token_value, .. } => token_value.clone(),
            NormalizedBinding::DataVariable { value, .. }
            | NormalizedBinding::PresetModeValue { value, .. } => value.clone(),
            NormalizedBinding::Literal { value, .. } => Some(value.clone()),
            NormalizedBinding::DataModelField { .. } => None,
        }
    }

    /// Value of an instance-level prop override, if it resolves.
    fn resolve_override(
        &self,
        prop_id: &str,
        ov: &OverrideValue,
        ctx: &ResolveContext<'_>,
    ) -> Option<Value> {
        let store = self.store;
        let reference = match ov {
            OverrideValue::Literal(Value::Null) => return None,
            OverrideValue::Literal(value) => return Some(value.clone()),
            OverrideValue::Reference(reference) => reference,
        };
        let id = reference.id.as_str();

        let value = match reference.kind {
            ReferenceKind::Token => self.token_value(id),
            ReferenceKind::DataVariable => store.variable_by_id(id).and_then(|v| v.value.clone()),
            ReferenceKind::PropValue => store
                .prop_by_id(prop_id)
                .and_then(|prop| prop.value_by_id(id))
                .map(|pv| pv.value.clone()),
            ReferenceKind::DataModelField => {
                let record = ctx.current_data_record?;
                let field = store.model_field_by_id(id)?;
                record.get(&field.name).cloned()
            }
            ReferenceKind::DataModel => None,
        };
        if value.is_none() {
            debug!(prop_id, reference_id = id, kind = ?reference.kind, "override did not resolve");
        }
        value
    }

    /// Records behind a data-set binding.
    /// `model_id` if that data model exists.
    fn existing_model(&self, model_id: Option<&EntityId>) -> Option<EntityId> {
        let model_id = model_id?;
        if self.store.model_by_id(model_id.as_str()).is_none() {
            debug!(kind = %EntityKind::DataModel, id = %model_id, "data set model missing");
            return None;
        }
        Some(model_id.clone())
    }

    fn resolve_data_set(&self, normalized: &NormalizedBinding, ctx: &ResolveContext<'_>) -> Vec<Record> {
        let store = self.store;

        if let (NormalizedBinding::Prop { prop_id, .. }, Some(instance)) =
            (normalized, ctx.current_instance)
        {
            if let Some(OverrideValue::Reference(reference)) = instance.prop_override(prop_id.as_str())
            {
                match reference.kind {
                    ReferenceKind::DataModel => {
                        return store.records_by_model_id(reference.id.as_str()).to_vec();
                    }
                    ReferenceKind::DataVariable => {
                        if let Some(variable) = store.variable_by_id(reference.id.as_str()) {
                            return self.variable_records(variable);
                        }
                        debug!(kind = %EntityKind::Variable, id = %reference.id, "override variable missing");
                    }
                    _ => {}
                }
            }
        }

        match normalized {
            NormalizedBinding::Prop { model_id, .. } => model_id
                .as_ref()
                .map(|model_id| store.records_by_model_id(model_id.as_str()).to_vec())
                .unwrap_or_default(),
            NormalizedBinding::DataVariable {
                model_id, filters, ..
            } => model_id
                .as_ref()
                .map(|model_id| {
                    store
                        .records_by_model_id(model_id.as_str())
                        .iter()
                        .filter(|record| filters.iter().all(|f| f.matches(record)))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn variable_records(&self, variable: &Variable) -> Vec<Record> {
        let Some(model_id) = &variable.model_id else {
            return Vec::new();
        };
        self.store
            .records_by_model_id(model_id.as_str())
            .iter()
            .filter(|record| variable.filters.iter().all(|f| f.matches(record)))
            .cloned()
            .collect()
    }
}

/// A boolean bound to `display` toggles between `flex` and `none`.
fn map_display(property_name: Option<&str>, value: Value) -> Value {
    match (property_name, &value) {
        (Some("display"), Value::Bool(visible)) => {
            Value::String(if *visible { "flex" } else { "none" }.to_owned())
        }
        _ => value,
    }
}
