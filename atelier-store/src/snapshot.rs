//! Serialized form of a whole store.

use atelier_model::{
    Collection, Component, DataModel, DataModelField, Element, Instance, Preset, PresetModeValue,
    Prop, Screen, Token, TokenValue, Variable, VariableMode, VariableModeGroup,
};
use atelier_types::{EntityId, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::{Store, StoreResult};

/// Every collection as a plain array, plus records per model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub screens: Vec<Screen>,
    pub components: Vec<Component>,
    pub elements: Vec<Element>,
    pub instances: Vec<Instance>,
    pub props: Vec<Prop>,
    pub tokens: Vec<Token>,
    pub token_values: Vec<TokenValue>,
    pub variables: Vec<Variable>,
    pub variable_modes: Vec<VariableMode>,
    pub variable_mode_groups: Vec<VariableModeGroup>,
    pub collections: Vec<Collection>,
    pub presets: Vec<Preset>,
    pub preset_mode_values: Vec<PresetModeValue>,
    pub data_models: Vec<DataModel>,
    pub data_model_fields: Vec<DataModelField>,
    pub records: BTreeMap<EntityId, Vec<Record>>,
}

impl Store {
    /// Builds a store from a snapshot, validating collection default modes.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        let mut store = Store::new();
        store.set_all(snapshot.screens)?;
        store.set_all(snapshot.components)?;
        store.set_all(snapshot.elements)?;
        store.set_all(snapshot.instances)?;
        store.set_all(snapshot.props)?;
        store.set_all(snapshot.tokens)?;
        store.set_all(snapshot.token_values)?;
        store.set_all(snapshot.variables)?;
        store.set_all(snapshot.variable_mode_groups)?;
        store.set_all(snapshot.presets)?;
        store.set_all(snapshot.preset_mode_values)?;
        store.set_all(snapshot.data_models)?;
        store.set_all(snapshot.data_model_fields)?;
        // Modes before collections, so the collection check sees them.
        store.set_all(snapshot.variable_modes)?;
        store.set_all(snapshot.collections)?;
        for (model_id, records) in snapshot.records {
            store.records_mut().set_records(model_id, records);
        }
        info!(
            elements = store.elements().len(),
            instances = store.instances().len(),
            "store loaded from snapshot"
        );
        Ok(store)
    }

    /// Parses and loads a JSON snapshot.
    pub fn from_snapshot_json(json: &str) -> StoreResult<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Captures the store's current contents.
    #[must_use]
    pub fn to_snapshot(&self) -> StoreSnapshot {
        fn all<T: crate::Stored>(store: &Store) -> Vec<T> {
            store.collection::<T>().iter().cloned().collect()
        }

        StoreSnapshot {
            screens: all(self),
            components: all(self),
            elements: all(self),
            instances: all(self),
            props: all(self),
            tokens: all(self),
            token_values: all(self),
            variables: all(self),
            variable_modes: all(self),
            variable_mode_groups: all(self),
            collections: all(self),
            presets: all(self),
            preset_mode_values: all(self),
            data_models: all(self),
            data_model_fields: all(self),
            records: self
                .records()
                .model_ids()
                .map(|id| (id.clone(), self.records_by_model_id(id.as_str()).to_vec()))
                .collect(),
        }
    }
}
