//! The application state: one collection per entity kind plus records.

use atelier_model::{
    Collection, Component, DataModel, DataModelField, Element, Entity, Instance, Preset,
    PresetModeValue, PresetType, Prop, Screen, Token, TokenValue, UiEntity, Variable,
    VariableMode, VariableModeGroup,
};
use atelier_types::{EntityId, EntityKind, Ownership, Record};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

use crate::{EntityCollection, RecordStore, StoreError, StoreResult};

/// Explicit, passed-by-reference application state.
///
/// Readers borrow it immutably; every mutation goes through a method that
/// keeps ownership indexes and cross-entity invariants intact.
#[derive(Debug, Clone, Default)]
pub struct Store {
    screens: EntityCollection<Screen>,
    components: EntityCollection<Component>,
    elements: EntityCollection<Element>,
    instances: EntityCollection<Instance>,
    props: EntityCollection<Prop>,
    tokens: EntityCollection<Token>,
    token_values: EntityCollection<TokenValue>,
    variables: EntityCollection<Variable>,
    variable_modes: EntityCollection<VariableMode>,
    variable_mode_groups: EntityCollection<VariableModeGroup>,
    collections: EntityCollection<Collection>,
    presets: EntityCollection<Preset>,
    preset_mode_values: EntityCollection<PresetModeValue>,
    data_models: EntityCollection<DataModel>,
    data_model_fields: EntityCollection<DataModelField>,
    records: RecordStore,
}

/// Maps an entity type to its collection in the [`Store`].
///
/// The `check_*` hooks let a kind veto mutations that would break a
/// cross-entity invariant; most kinds accept everything.
pub trait Stored: Entity {
    fn collection(store: &Store) -> &EntityCollection<Self>;

    fn collection_mut(store: &mut Store) -> &mut EntityCollection<Self>;

    /// Called with the value about to be stored by `insert` or `update`.
    fn check(store: &Store, staged: &Self) -> StoreResult<()> {
        let _ = (store, staged);
        Ok(())
    }

    /// Called before `remove`.
    fn check_remove(store: &Store, id: &str) -> StoreResult<()> {
        let _ = (store, id);
        Ok(())
    }

    /// Called after `set_all`; an error rolls the bulk replace back.
    fn check_bulk(store: &Store) -> StoreResult<()> {
        let _ = store;
        Ok(())
    }
}

macro_rules! stored {
    ($ty:ty, $field:ident) => {
        impl Stored for $ty {
            fn collection(store: &Store) -> &EntityCollection<Self> {
                &store.$field
            }

            fn collection_mut(store: &mut Store) -> &mut EntityCollection<Self> {
                &mut store.$field
            }
        }
    };
}

stored!(Screen, screens);
stored!(Component, components);
stored!(Element, elements);
stored!(Instance, instances);
stored!(Prop, props);
stored!(Token, tokens);
stored!(TokenValue, token_values);
stored!(Variable, variables);
stored!(VariableModeGroup, variable_mode_groups);
stored!(Preset, presets);
stored!(PresetModeValue, preset_mode_values);
stored!(DataModel, data_models);
stored!(DataModelField, data_model_fields);

impl Stored for Collection {
    fn collection(store: &Store) -> &EntityCollection<Self> {
        &store.collections
    }

    fn collection_mut(store: &mut Store) -> &mut EntityCollection<Self> {
        &mut store.collections
    }

    fn check(store: &Store, staged: &Self) -> StoreResult<()> {
        expect_one_default(staged, |id| store.variable_modes.get(id))
    }

    fn check_bulk(store: &Store) -> StoreResult<()> {
        store.validate_default_modes()
    }
}

impl Stored for VariableMode {
    fn collection(store: &Store) -> &EntityCollection<Self> {
        &store.variable_modes
    }

    fn collection_mut(store: &mut Store) -> &mut EntityCollection<Self> {
        &mut store.variable_modes
    }

    fn check(store: &Store, staged: &Self) -> StoreResult<()> {
        for collection in store.collections_with_mode(staged.id.as_str()) {
            expect_one_default(collection, |id| {
                if id == staged.id.as_str() {
                    Some(staged)
                } else {
                    store.variable_modes.get(id)
                }
            })?;
        }
        Ok(())
    }

    fn check_remove(store: &Store, id: &str) -> StoreResult<()> {
        for collection in store.collections_with_mode(id) {
            expect_one_default(collection, |mode_id| {
                if mode_id == id {
                    None
                } else {
                    store.variable_modes.get(mode_id)
                }
            })?;
        }
        Ok(())
    }

    fn check_bulk(store: &Store) -> StoreResult<()> {
        store.validate_default_modes()
    }
}

/// Counts the default-flagged modes of `collection` through `lookup`.
fn default_mode_count<'m>(
    collection: &Collection,
    lookup: impl Fn(&str) -> Option<&'m VariableMode>,
) -> usize {
    let mut seen = HashSet::new();
    collection
        .mode_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| lookup(id.as_str()))
        .filter(|mode| mode.is_default)
        .count()
}

fn expect_one_default<'m>(
    collection: &Collection,
    lookup: impl Fn(&str) -> Option<&'m VariableMode>,
) -> StoreResult<()> {
    match default_mode_count(collection, lookup) {
        1 => Ok(()),
        count => Err(StoreError::DefaultModeViolation {
            collection_id: collection.id.clone(),
            count,
        }),
    }
}

// ── Generic access & mutation ────────────────────────────────────

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn collection<T: Stored>(&self) -> &EntityCollection<T> {
        T::collection(self)
    }

    #[must_use]
    pub fn get<T: Stored>(&self, id: &str) -> Option<&T> {
        T::collection(self).get(id)
    }

    /// Inserts or replaces an entity, returning the previous value.
    pub fn insert<T: Stored>(&mut self, entity: T) -> StoreResult<Option<T>> {
        T::check(self, &entity)?;
        Ok(T::collection_mut(self).insert(entity))
    }

    /// Updates an entity in place through `f`.
    pub fn update<T: Stored>(&mut self, id: &str, f: impl FnOnce(&mut T)) -> StoreResult<&T> {
        let staged = T::collection(self).staged(id, f)?;
        T::check(self, &staged)?;
        let collection = T::collection_mut(self);
        collection.insert(staged);
        collection.get(id).ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            id: id.into(),
        })
    }

    /// Removes an entity. Removing something that is not there is a no-op.
    pub fn remove<T: Stored>(&mut self, id: &str) -> StoreResult<Option<T>> {
        T::check_remove(self, id)?;
        Ok(T::collection_mut(self).remove(id))
    }

    /// Replaces a whole collection, rebuilding its ownership index.
    pub fn set_all<T: Stored>(&mut self, entities: impl IntoIterator<Item = T>) -> StoreResult<()> {
        let previous = T::collection(self).clone();
        T::collection_mut(self).set_all(entities);
        if let Err(e) = T::check_bulk(self) {
            *T::collection_mut(self) = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Identifies the current state of the whole store. Changes whenever any
    /// collection or record set changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        [
            self.screens.generation(),
            self.components.generation(),
            self.elements.generation(),
            self.instances.generation(),
            self.props.generation(),
            self.tokens.generation(),
            self.token_values.generation(),
            self.variables.generation(),
            self.variable_modes.generation(),
            self.variable_mode_groups.generation(),
            self.collections.generation(),
            self.presets.generation(),
            self.preset_mode_values.generation(),
            self.data_models.generation(),
            self.data_model_fields.generation(),
            self.records.generation(),
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }

    #[must_use]
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordStore {
        &mut self.records
    }
}

// ── Read accessors ───────────────────────────────────────────────

impl Store {
    #[must_use]
    pub fn elements(&self) -> &EntityCollection<Element> {
        &self.elements
    }

    #[must_use]
    pub fn instances(&self) -> &EntityCollection<Instance> {
        &self.instances
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn instance_by_id(&self, id: &str) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// Looks `id` up among elements, then instances.
    #[must_use]
    pub fn ui_entity_by_id(&self, id: &str) -> Option<UiEntity<'_>> {
        self.elements
            .get(id)
            .map(UiEntity::Element)
            .or_else(|| self.instances.get(id).map(UiEntity::Instance))
    }

    #[must_use]
    pub fn screen_by_id(&self, id: &str) -> Option<&Screen> {
        self.screens.get(id)
    }

    #[must_use]
    pub fn component_by_id(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    #[must_use]
    pub fn prop_by_id(&self, id: &str) -> Option<&Prop> {
        self.props.get(id)
    }

    #[must_use]
    pub fn token_by_id(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }

    #[must_use]
    pub fn variable_by_id(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    #[must_use]
    pub fn preset_by_id(&self, id: &str) -> Option<&Preset> {
        self.presets.get(id)
    }

    #[must_use]
    pub fn preset_mode_value_by_id(&self, id: &str) -> Option<&PresetModeValue> {
        self.preset_mode_values.get(id)
    }

    #[must_use]
    pub fn preset_mode_value_by_preset_id_and_mode_id(
        &self,
        preset_id: &str,
        mode_id: &str,
    ) -> Option<&PresetModeValue> {
        self.preset_mode_values
            .iter()
            .find(|v| v.preset_id == preset_id && v.mode_id == mode_id)
    }

    #[must_use]
    pub fn collection_by_id(&self, id: &str) -> Option<&Collection> {
        self.collections.get(id)
    }

    #[must_use]
    pub fn variable_mode_by_id(&self, id: &str) -> Option<&VariableMode> {
        self.variable_modes.get(id)
    }

    #[must_use]
    pub fn variable_mode_group_by_id(&self, id: &str) -> Option<&VariableModeGroup> {
        self.variable_mode_groups.get(id)
    }

    /// Modes belonging to a mode group, in the group's order.
    pub fn modes_in_group(&self, group_id: &str) -> impl Iterator<Item = &VariableMode> {
        self.variable_mode_groups
            .get(group_id)
            .into_iter()
            .flat_map(|group| group.mode_ids.iter())
            .filter_map(|id| self.variable_modes.get(id.as_str()))
    }

    #[must_use]
    pub fn token_value_by_token_id_and_mode_id(
        &self,
        token_id: &str,
        mode_id: &str,
    ) -> Option<&TokenValue> {
        self.token_values
            .iter()
            .find(|v| v.token_id == token_id && v.mode_id == mode_id)
    }

    #[must_use]
    pub fn model_by_id(&self, id: &str) -> Option<&DataModel> {
        self.data_models.get(id)
    }

    #[must_use]
    pub fn model_field_by_id(&self, id: &str) -> Option<&DataModelField> {
        self.data_model_fields.get(id)
    }

    /// The first mode among `ids` flagged default.
    #[must_use]
    pub fn default_variable_mode_by_ids(&self, ids: &[EntityId]) -> Option<&VariableMode> {
        ids.iter()
            .filter_map(|id| self.variable_modes.get(id.as_str()))
            .find(|mode| mode.is_default)
    }

    #[must_use]
    pub fn default_mode_for_collection(&self, collection_id: &str) -> Option<&VariableMode> {
        let collection = self.collections.get(collection_id)?;
        self.default_variable_mode_by_ids(&collection.mode_ids)
    }

    #[must_use]
    pub fn records_by_model_id(&self, model_id: &str) -> &[Record] {
        self.records.records_by_model_id(model_id)
    }

    /// Ids of the elements, then instances, owned by `(owner_type, owner_id)`.
    #[must_use]
    pub fn entities_by_ownership(&self, owner_type: EntityKind, owner_id: &str) -> Vec<EntityId> {
        self.elements
            .ids_by_ownership(owner_type, owner_id)
            .iter()
            .chain(self.instances.ids_by_ownership(owner_type, owner_id))
            .cloned()
            .collect()
    }

    fn collections_with_mode<'a>(&'a self, mode_id: &'a str) -> impl Iterator<Item = &'a Collection> {
        self.collections
            .iter()
            .filter(move |c| c.mode_ids.iter().any(|id| id == mode_id))
    }
}

// ── Domain mutations ─────────────────────────────────────────────

impl Store {
    /// Checks that every collection has exactly one default mode.
    pub fn validate_default_modes(&self) -> StoreResult<()> {
        for collection in self.collections.iter() {
            expect_one_default(collection, |id| self.variable_modes.get(id))?;
        }
        Ok(())
    }

    /// Adds a collection together with its modes as one mutation.
    pub fn add_collection_with_modes(
        &mut self,
        collection: Collection,
        modes: Vec<VariableMode>,
    ) -> StoreResult<()> {
        let mut staged = self.variable_modes.clone();
        for mode in modes {
            staged.insert(mode);
        }
        expect_one_default(&collection, |id| staged.get(id))?;
        for other in self.collections.iter().filter(|c| c.id != collection.id) {
            expect_one_default(other, |id| staged.get(id))?;
        }
        self.variable_modes = staged;
        self.collections.insert(collection);
        Ok(())
    }

    /// Makes `mode_id` the single default mode of a collection.
    pub fn set_default_mode(&mut self, collection_id: &str, mode_id: &str) -> StoreResult<()> {
        let collection = self
            .collections
            .get(collection_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Collection,
                id: collection_id.into(),
            })?;
        if !collection.mode_ids.iter().any(|id| id == mode_id) {
            return Err(StoreError::ModeNotInCollection {
                collection_id: collection_id.into(),
                mode_id: mode_id.into(),
            });
        }
        if !self.variable_modes.contains(mode_id) {
            return Err(StoreError::NotFound {
                kind: EntityKind::VariableMode,
                id: mode_id.into(),
            });
        }

        let mut staged = self.variable_modes.clone();
        for id in &collection.mode_ids {
            let should_default = id == mode_id;
            if staged.get(id.as_str()).is_some_and(|m| m.is_default != should_default) {
                staged.update(id.as_str(), |m| m.is_default = should_default)?;
            }
        }
        for collection in self.collections.iter() {
            expect_one_default(collection, |id| staged.get(id))?;
        }
        debug!(collection = %collection_id, mode = %mode_id, "default mode changed");
        self.variable_modes = staged;
        Ok(())
    }

    /// Binds a typography preset to an element or instance, replacing any
    /// typography preset it already had.
    pub fn apply_typography_preset(&mut self, ui_id: &str, preset_id: &str) -> StoreResult<()> {
        let preset = self.presets.get(preset_id).ok_or_else(|| StoreError::NotFound {
            kind: EntityKind::Preset,
            id: preset_id.into(),
        })?;
        if preset.preset_type != PresetType::Typography {
            return Err(StoreError::NotTypographyPreset(preset.id.clone()));
        }
        let binding = atelier_model::BindingRef::typography_preset(preset.id.clone());

        if self.elements.contains(ui_id) {
            self.elements.update(ui_id, |e| e.set_root_binding(binding))?;
        } else if self.instances.contains(ui_id) {
            self.instances.update(ui_id, |i| i.set_root_binding(binding))?;
        } else {
            return Err(StoreError::NotFound {
                kind: EntityKind::Element,
                id: ui_id.into(),
            });
        }
        Ok(())
    }

    /// Removes an element or instance and every element/instance nested
    /// under it. Component definitions are never removed.
    pub fn remove_ui_subtree(&mut self, ui_id: &str) -> Vec<EntityId> {
        let Some(root) = self.ui_entity_by_id(ui_id) else {
            return Vec::new();
        };
        let mut queue = VecDeque::from([(root.kind(), root.id().clone())]);
        let mut doomed: Vec<(EntityKind, EntityId)> = Vec::new();
        let mut seen = HashSet::new();

        while let Some((kind, id)) = queue.pop_front() {
            if !seen.insert(id.clone()) {
                continue;
            }
            for child in self.elements.ids_by_ownership(kind, id.as_str()) {
                queue.push_back((EntityKind::Element, child.clone()));
            }
            for child in self.instances.ids_by_ownership(kind, id.as_str()) {
                queue.push_back((EntityKind::Instance, child.clone()));
            }
            doomed.push((kind, id));
        }

        let mut removed = Vec::with_capacity(doomed.len());
        for (kind, id) in doomed {
            let gone = match kind {
                EntityKind::Element => self.elements.remove(id.as_str()).is_some(),
                EntityKind::Instance => self.instances.remove(id.as_str()).is_some(),
                _ => false,
            };
            if gone {
                removed.push(id);
            }
        }
        debug!(root = %ui_id, count = removed.len(), "removed ui subtree");
        removed
    }

    /// Moves an element or instance under a new owner.
    ///
    /// The owner is not required to exist yet. Fails with
    /// [`StoreError::InvalidOwnership`] when `owner_type` cannot own canvas
    /// nodes.
    pub fn move_ui_node(
        &mut self,
        ui_id: &str,
        owner_type: EntityKind,
        owner_id: &str,
    ) -> StoreResult<()> {
        let ownership = Ownership::new(owner_type, owner_id)?;
        if self.elements.contains(ui_id) {
            self.elements.update(ui_id, |e| e.ownership = ownership)?;
        } else if self.instances.contains(ui_id) {
            self.instances.update(ui_id, |i| i.ownership = ownership)?;
        } else {
            return Err(StoreError::NotFound {
                kind: EntityKind::Element,
                id: ui_id.into(),
            });
        }
        debug!(node = %ui_id, owner_type = %owner_type, owner_id, "moved ui node");
        Ok(())
    }
}
