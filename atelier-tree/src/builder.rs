//! Composite tree assembly.
//!
//! Discovery runs breadth-first from the nodes the requested owner holds
//! directly. A node's children are the elements and instances it owns, and
//! for an instance also everything its component owns. Linking then hangs
//! each discovered node under its owner, or under every discovered instance
//! of its owning component.

use atelier_model::UiEntity;
use atelier_store::{EngineConfig, Store, TreeConfig};
use atelier_types::{EntityId, EntityKind};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

use crate::node::{CompositeEntity, UiNode};
use crate::{TreeError, TreeResult};

/// Builds a composite tree with the default configuration.
pub fn build_composite_tree(
    store: &Store,
    owner_type: EntityKind,
    owner_id: &str,
) -> TreeResult<Vec<CompositeEntity>> {
    TreeBuilder::new().build(store, owner_type, owner_id)
}

#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    config: TreeConfig,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            config: config.tree.clone(),
        }
    }

    /// Returns the forest rooted at the nodes `(owner_type, owner_id)` owns
    /// directly, in discovery order.
    ///
    /// A node whose owner is outside the tree is left out. The only error is
    /// an owner kind that cannot own canvas nodes.
    pub fn build(
        &self,
        store: &Store,
        owner_type: EntityKind,
        owner_id: &str,
    ) -> TreeResult<Vec<CompositeEntity>> {
        if !owner_type.is_owner_kind() {
            return Err(TreeError::InvalidOwnerKind(owner_type));
        }

        let discovery = Discovery::run(store, owner_type, owner_id);
        let links = discovery.link();
        let mut path = Vec::new();
        let forest: Vec<_> = discovery
            .roots
            .iter()
            .filter_map(|id| self.assemble(&discovery, &links, id, &mut path))
            .collect();

        debug!(
            owner_type = %owner_type,
            owner_id,
            roots = forest.len(),
            nodes = discovery.order.len(),
            "built composite tree"
        );
        Ok(forest)
    }

    /// Materialises `id` and its linked subtree.
    ///
    /// `path` holds the ancestors of `id`. A child already on it would close
    /// a cycle and is not attached again.
    fn assemble(
        &self,
        discovery: &Discovery<'_>,
        links: &HashMap<EntityId, Vec<EntityId>>,
        id: &EntityId,
        path: &mut Vec<EntityId>,
    ) -> Option<CompositeEntity> {
        let node = discovery.nodes.get(id)?;
        let mut entity = CompositeEntity::leaf(UiNode::from(*node));

        if path.len() + 1 >= self.config.max_depth {
            warn!(%id, max_depth = self.config.max_depth, "composite tree truncated at max depth");
            return Some(entity);
        }

        path.push(id.clone());
        for child in links.get(id).into_iter().flatten() {
            if path.contains(child) {
                warn!(parent = %id, %child, "ownership cycle, child not attached");
                continue;
            }
            if let Some(subtree) = self.assemble(discovery, links, child, path) {
                entity.children.push(subtree);
            }
        }
        path.pop();

        Some(entity)
    }
}

/// Nodes reachable from the requested owner, first discovery wins.
struct Discovery<'s> {
    roots: Vec<EntityId>,
    order: Vec<EntityId>,
    nodes: HashMap<EntityId, UiEntity<'s>>,
}

impl<'s> Discovery<'s> {
    fn run(store: &'s Store, owner_type: EntityKind, owner_id: &str) -> Self {
        let mut discovery = Discovery {
            roots: Vec::new(),
            order: Vec::new(),
            nodes: HashMap::new(),
        };
        let mut queue = VecDeque::new();

        for id in store.entities_by_ownership(owner_type, owner_id) {
            if discovery.visit(store, &id) {
                discovery.roots.push(id.clone());
                queue.push_back(id);
            }
        }

        while let Some(parent_id) = queue.pop_front() {
            let Some(parent) = discovery.nodes.get(&parent_id).copied() else {
                continue;
            };

            let mut candidates = store.entities_by_ownership(EntityKind::Element, parent_id.as_str());
            candidates.extend(store.entities_by_ownership(EntityKind::Instance, parent_id.as_str()));
            if let Some(instance) = parent.as_instance() {
                candidates.extend(
                    store.entities_by_ownership(EntityKind::Component, instance.component_id.as_str()),
                );
            }

            for id in candidates {
                if discovery.visit(store, &id) {
                    queue.push_back(id);
                }
            }
        }

        discovery
    }

    /// Records `id` if it is new and exists. Returns whether it was recorded.
    fn visit(&mut self, store: &'s Store, id: &EntityId) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        let Some(entity) = store.ui_entity_by_id(id.as_str()) else {
            return false;
        };
        self.nodes.insert(id.clone(), entity);
        self.order.push(id.clone());
        true
    }

    /// Parent id to child ids, children in discovery order.
    ///
    /// Component-owned nodes are linked under every discovered instance of
    /// their component.
    fn link(&self) -> HashMap<EntityId, Vec<EntityId>> {
        let mut instances_by_component: HashMap<&EntityId, Vec<&EntityId>> = HashMap::new();
        for id in &self.order {
            if let Some(instance) = self.nodes.get(id).and_then(UiEntity::as_instance) {
                instances_by_component
                    .entry(&instance.component_id)
                    .or_default()
                    .push(id);
            }
        }

        let mut links: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
        for id in &self.order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let owner = node.ownership();
            match owner.owner_type() {
                EntityKind::Element | EntityKind::Instance => {
                    if self.nodes.contains_key(owner.owner_id()) {
                        links.entry(owner.owner_id().clone()).or_default().push(id.clone());
                    }
                }
                EntityKind::Component => {
                    let hosts = instances_by_component
                        .get(owner.owner_id())
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    for host in hosts {
                        links.entry((*host).clone()).or_default().push(id.clone());
                    }
                }
                _ => {}
            }
        }
        links
    }
}
