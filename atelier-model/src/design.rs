use atelier_types::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};

use crate::entity::flat_entity;

/// A top-level page of the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: EntityId,
    pub name: String,
}

/// A reusable component definition.
///
/// Its internal elements are owned by `(COMPONENT, id)` and are mirrored
/// under every instance of the component when a tree is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: EntityId,
    pub name: String,
}

flat_entity!(Screen, EntityKind::Screen);
flat_entity!(Component, EntityKind::Component);
