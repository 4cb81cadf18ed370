use atelier_store::{EngineConfig, Memo, MemoStats, Store};
use atelier_types::{EntityId, EntityKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use crate::node::CompositeEntity;
use crate::{TreeBuilder, TreeError, TreeResult};

/// Memoized composite trees, one slot per owner.
///
/// A slot is reused while the store's element and instance collections are
/// unchanged. Whenever the store changes, slots of owners that are gone and
/// own nothing are dropped.
#[derive(Debug, Default)]
pub struct CompositeTreeSelector {
    builder: TreeBuilder,
    memos: HashMap<(EntityKind, EntityId), Memo<(u64, u64), Vec<CompositeEntity>>>,
    pruned_at: Option<u64>,
}

impl CompositeTreeSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            builder: TreeBuilder::with_config(config),
            memos: HashMap::new(),
            pruned_at: None,
        }
    }

    pub fn select(
        &mut self,
        store: &Store,
        owner_type: EntityKind,
        owner_id: &str,
    ) -> TreeResult<Arc<Vec<CompositeEntity>>> {
        if !owner_type.is_owner_kind() {
            return Err(TreeError::InvalidOwnerKind(owner_type));
        }
        self.prune(store);
        let key = (
            store.elements().generation(),
            store.instances().generation(),
        );
        let builder = &self.builder;
        self.memos
            .entry((owner_type, EntityId::from(owner_id)))
            .or_default()
            .get_or_try_compute(key, || builder.build(store, owner_type, owner_id))
    }

    /// Summed hit/miss counters over every slot.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memos.values().fold(MemoStats::default(), |acc, memo| {
            let stats = memo.stats();
            MemoStats {
                hits: acc.hits + stats.hits,
                misses: acc.misses + stats.misses,
            }
        })
    }

    /// Number of owners with a cached tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    fn prune(&mut self, store: &Store) {
        let revision = store.revision();
        if self.pruned_at == Some(revision) {
            return;
        }
        let before = self.memos.len();
        self.memos
            .retain(|(owner_type, owner_id), _| owner_is_live(store, *owner_type, owner_id.as_str()));
        if self.memos.len() < before {
            trace!(dropped = before - self.memos.len(), "pruned tree slots");
        }
        self.pruned_at = Some(revision);
    }

    /// Forgets the slot of one owner.
    pub fn invalidate(&mut self, owner_type: EntityKind, owner_id: &str) {
        self.memos.remove(&(owner_type, EntityId::from(owner_id)));
    }
}

/// An owner is live while it exists or still owns a canvas node.
fn owner_is_live(store: &Store, owner_type: EntityKind, owner_id: &str) -> bool {
    let exists = match owner_type {
        EntityKind::Screen => store.screen_by_id(owner_id).is_some(),
        EntityKind::Component => store.component_by_id(owner_id).is_some(),
        EntityKind::Element | EntityKind::Instance => store.ui_entity_by_id(owner_id).is_some(),
        _ => false,
    };
    exists || !store.entities_by_ownership(owner_type, owner_id).is_empty()
}
