use atelier_model::{Element, Instance, UiEntity};
use atelier_types::{EntityId, EntityKind, Ownership};
use serde::Serialize;

/// An owned element or instance inside a composite tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiNode {
    Element(Element),
    Instance(Instance),
}

impl UiNode {
    #[must_use]
    pub fn id(&self) -> &EntityId {
        match self {
            UiNode::Element(element) => &element.id,
            UiNode::Instance(instance) => &instance.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            UiNode::Element(_) => EntityKind::Element,
            UiNode::Instance(_) => EntityKind::Instance,
        }
    }

    #[must_use]
    pub fn ownership(&self) -> &Ownership {
        match self {
            UiNode::Element(element) => &element.ownership,
            UiNode::Instance(instance) => &instance.ownership,
        }
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            UiNode::Element(element) => Some(element),
            UiNode::Instance(_) => None,
        }
    }

    #[must_use]
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            UiNode::Instance(instance) => Some(instance),
            UiNode::Element(_) => None,
        }
    }
}

impl From<UiEntity<'_>> for UiNode {
    fn from(entity: UiEntity<'_>) -> Self {
        match entity {
            UiEntity::Element(element) => UiNode::Element(element.clone()),
            UiEntity::Instance(instance) => UiNode::Instance(instance.clone()),
        }
    }
}

/// A node with its assembled subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeEntity {
    #[serde(flatten)]
    pub node: UiNode,
    pub children: Vec<CompositeEntity>,
}

impl CompositeEntity {
    #[must_use]
    pub fn leaf(node: UiNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &EntityId {
        self.node.id()
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.node.kind()
    }

    /// Ids of this node and its descendants, pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<&EntityId> {
        let mut out = Vec::new();
        collect_ids(self, &mut out);
        out
    }

    /// Number of nodes in this subtree, including itself.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CompositeEntity::size).sum::<usize>()
    }
}

fn collect_ids<'a>(entity: &'a CompositeEntity, out: &mut Vec<&'a EntityId>) {
    out.push(entity.id());
    for child in &entity.children {
        collect_ids(child, out);
    }
}
