//! Normalized `ids[] + entities{}` collection.

use atelier_model::Entity;
use atelier_types::{EntityId, EntityKind};
use indexmap::IndexSet;
use indexmap::set::Slice;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{OwnershipIndex, StoreError, StoreResult};

/// Process-wide source of generation numbers. Values are never reused, so
/// a generation identifies one state of one collection even across stores.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// An ordered, id-keyed collection of one entity kind.
///
/// Every mutation keeps the ownership index in step with the entities and
/// moves the collection to a fresh generation. There is no `get_mut`;
/// `update` is the only way to change a stored entity.
#[derive(Debug, Clone)]
pub struct EntityCollection<T: Entity> {
    ids: IndexSet<EntityId>,
    entities: HashMap<EntityId, T>,
    ownership: OwnershipIndex,
    generation: u64,
}

impl<T: Entity> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: IndexSet::new(),
            entities: HashMap::new(),
            ownership: OwnershipIndex::new(),
            generation: next_generation(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &Slice<EntityId> {
        self.ids.as_slice()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Current generation. Changes on every mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn ownership_index(&self) -> &OwnershipIndex {
        &self.ownership
    }

    /// Ids owned by `(owner_type, owner_id)`.
    #[must_use]
    pub fn ids_by_ownership(&self, owner_type: EntityKind, owner_id: &str) -> &Slice<EntityId> {
        self.ownership.get(owner_type, owner_id)
    }

    /// Entities owned by `(owner_type, owner_id)`.
    pub fn by_ownership(&self, owner_type: EntityKind, owner_id: &str) -> impl Iterator<Item = &T> {
        self.ids_by_ownership(owner_type, owner_id)
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    /// Inserts or replaces an entity, returning the previous value.
    ///
    /// A replaced entity keeps its position in the id order and, while its
    /// ownership is unchanged, its position among its siblings. A replaced
    /// entity that moves to a new owner lands among the new owner's ids
    /// where the id order puts it.
    pub fn insert(&mut self, entity: T) -> Option<T> {
        let id = entity.id().clone();
        let previous = self.entities.remove(id.as_str());
        match &previous {
            Some(old) if old.ownership() == entity.ownership() => {}
            Some(old) => {
                self.ownership.remove_ownership(old);
                let ids = &self.ids;
                self.ownership
                    .add_ownership_ordered(&entity, |other| ids.get_index_of(other));
            }
            None => {
                self.ids.insert(id.clone());
                self.ownership.add_ownership(&entity);
            }
        }
        self.entities.insert(id, entity);
        self.generation = next_generation();
        previous
    }

    /// Applies `f` to a copy of the entity and stores the result.
    ///
    /// The ownership index follows any ownership change `f` makes. Changing
    /// the id is rejected.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut T)) -> StoreResult<&T> {
        let staged = self.staged(id, f)?;
        let key = staged.id().clone();
        self.insert(staged);
        self.entities
            .get(key.as_str())
            .ok_or(StoreError::NotFound { kind: T::KIND, id: key })
    }

    /// Returns what `update(id, f)` would store, without storing it.
    pub fn staged(&self, id: &str, f: impl FnOnce(&mut T)) -> StoreResult<T> {
        let current = self.entities.get(id).ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            id: id.into(),
        })?;
        let mut staged = current.clone();
        f(&mut staged);
        if staged.id() != current.id() {
            return Err(StoreError::IdChanged {
                kind: T::KIND,
                id: current.id().clone(),
                new_id: staged.id().clone(),
            });
        }
        Ok(staged)
    }

    /// Removes an entity and its ownership entry.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let removed = self.entities.remove(id)?;
        self.ids.shift_remove(removed.id());
        self.ownership.remove_ownership(&removed);
        self.generation = next_generation();
        Some(removed)
    }

    /// Replaces the whole collection. The ownership index is rebuilt from
    /// scratch; later duplicates of an id replace earlier ones in place.
    pub fn set_all(&mut self, entities: impl IntoIterator<Item = T>) {
        self.ids.clear();
        self.entities.clear();
        for entity in entities {
            let id = entity.id().clone();
            if self.entities.insert(id.clone(), entity).is_none() {
                self.ids.insert(id);
            }
        }
        let mut index = OwnershipIndex::new();
        index.rebuild(self.iter());
        self.ownership = index;
        self.generation = next_generation();
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.set_all(std::iter::empty());
    }
}
