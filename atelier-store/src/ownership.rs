//! Secondary index from owner to owned entity ids.

use atelier_model::Entity;
use atelier_types::{EntityId, EntityKind};
use indexmap::IndexSet;
use indexmap::set::Slice;
use std::collections::HashMap;

type Owned = IndexSet<EntityId>;

/// `ownership[owner_type][owner_id] -> [entity ids]`.
///
/// Derivable entirely from the entities' `ownership` fields. Only
/// [`crate::EntityCollection`] mutates the index it owns, and it keeps each
/// owner's ids in collection order.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    ownership: HashMap<EntityKind, HashMap<EntityId, Owned>>,
}

impl OwnershipIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from scratch.
    pub fn derive<'a, T: Entity + 'a>(entities: impl IntoIterator<Item = &'a T>) -> Self {
        let mut index = Self::new();
        index.rebuild(entities);
        index
    }

    /// Appends `entity` to its owner's ids. Entities without ownership are
    /// skipped.
    pub fn add_ownership<T: Entity>(&mut self, entity: &T) {
        if let Some(owned) = self.owned_mut(entity) {
            owned.insert(entity.id().clone());
        }
    }

    /// Inserts `entity` among its owner's ids so that they stay sorted by
    /// `position`.
    ///
    /// `position` maps an id to its place in the owning collection. The
    /// owner's existing ids must already be sorted by it.
    pub fn add_ownership_ordered<T: Entity>(
        &mut self,
        entity: &T,
        position: impl Fn(&EntityId) -> Option<usize>,
    ) {
        let Some(at) = position(entity.id()) else {
            self.add_ownership(entity);
            return;
        };
        if let Some(owned) = self.owned_mut(entity) {
            if owned.contains(entity.id()) {
                return;
            }
            let index = owned.partition_point(|id| position(id).is_some_and(|p| p < at));
            owned.shift_insert(index, entity.id().clone());
        }
    }

    fn owned_mut<T: Entity>(&mut self, entity: &T) -> Option<&mut Owned> {
        let ownership = entity.ownership()?;
        Some(
            self.ownership
                .entry(ownership.owner_type())
                .or_default()
                .entry(ownership.owner_id().clone())
                .or_default(),
        )
    }

    /// Forgets `entity` under the owner its `ownership` field names.
    pub fn remove_ownership<T: Entity>(&mut self, entity: &T) {
        let Some(ownership) = entity.ownership() else {
            return;
        };
        let Some(by_owner) = self.ownership.get_mut(&ownership.owner_type()) else {
            return;
        };
        if let Some(owned) = by_owner.get_mut(ownership.owner_id().as_str()) {
            owned.shift_remove(entity.id());
            if owned.is_empty() {
                by_owner.remove(ownership.owner_id().as_str());
            }
        }
        if by_owner.is_empty() {
            self.ownership.remove(&ownership.owner_type());
        }
    }

    pub fn clear_ownerships(&mut self) {
        self.ownership.clear();
    }

    /// Clears the index and re-adds every entity.
    pub fn rebuild<'a, T: Entity + 'a>(&mut self, entities: impl IntoIterator<Item = &'a T>) {
        self.clear_ownerships();
        for entity in entities {
            self.add_ownership(entity);
        }
    }

    /// Ids owned by `(owner_type, owner_id)`, in insertion order.
    #[must_use]
    pub fn get(&self, owner_type: EntityKind, owner_id: &str) -> &Slice<EntityId> {
        self.ownership
            .get(&owner_type)
            .and_then(|by_owner| by_owner.get(owner_id))
            .map_or_else(Slice::new, IndexSet::as_slice)
    }

    /// Number of distinct owners with at least one entity.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.ownership.values().map(HashMap::len).sum()
    }

    /// Same owners with the same ids in the same order.
    #[must_use]
    pub fn same_entries(&self, other: &OwnershipIndex) -> bool {
        if self.owner_count() != other.owner_count() {
            return false;
        }
        self.ownership.iter().all(|(kind, by_owner)| {
            by_owner
                .iter()
                .all(|(owner_id, ids)| *other.get(*kind, owner_id.as_str()) == *ids.as_slice())
        })
    }
}
