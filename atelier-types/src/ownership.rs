//! Weak parent references.
//!
//! An [`Ownership`] names the container an entity logically belongs to.
//! It is a lookup key only: the owner may be missing from the store while
//! a project is being edited, and readers must treat that as an orphan
//! rather than an error.

use serde::{Deserialize, Serialize};

use crate::{EntityId, EntityKind, TypesError};

/// Identifies the parent container of an entity.
///
/// The owner type is always one of SCREEN, COMPONENT, ELEMENT or INSTANCE;
/// the constructor and deserializer both reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOwnership")]
pub struct Ownership {
    #[serde(rename = "type")]
    owner_type: EntityKind,
    #[serde(rename = "id")]
    owner_id: EntityId,
}

#[derive(Deserialize)]
struct RawOwnership {
    #[serde(rename = "type")]
    owner_type: EntityKind,
    id: EntityId,
}

impl TryFrom<RawOwnership> for Ownership {
    type Error = TypesError;

    fn try_from(raw: RawOwnership) -> Result<Self, Self::Error> {
        Ownership::new(raw.owner_type, raw.id)
    }
}

impl Ownership {
    /// Creates an ownership reference, validating the owner kind.
    pub fn new(owner_type: EntityKind, owner_id: impl Into<EntityId>) -> crate::Result<Self> {
        if !owner_type.is_owner_kind() {
            return Err(TypesError::InvalidOwnerKind(owner_type));
        }
        Ok(Self {
            owner_type,
            owner_id: owner_id.into(),
        })
    }

    /// Owned directly by a screen.
    #[must_use]
    pub fn screen(id: impl Into<EntityId>) -> Self {
        Self {
            owner_type: EntityKind::Screen,
            owner_id: id.into(),
        }
    }

    /// Owned by a component definition.
    #[must_use]
    pub fn component(id: impl Into<EntityId>) -> Self {
        Self {
            owner_type: EntityKind::Component,
            owner_id: id.into(),
        }
    }

    /// Nested inside an element.
    #[must_use]
    pub fn element(id: impl Into<EntityId>) -> Self {
        Self {
            owner_type: EntityKind::Element,
            owner_id: id.into(),
        }
    }

    /// Nested inside an instance.
    #[must_use]
    pub fn instance(id: impl Into<EntityId>) -> Self {
        Self {
            owner_type: EntityKind::Instance,
            owner_id: id.into(),
        }
    }

    #[must_use]
    pub const fn owner_type(&self) -> EntityKind {
        self.owner_type
    }

    #[must_use]
    pub fn owner_id(&self) -> &EntityId {
        &self.owner_id
    }

    /// True if this ownership points at exactly `(owner_type, owner_id)`.
    #[must_use]
    pub fn is(&self, owner_type: EntityKind, owner_id: &str) -> bool {
        self.owner_type == owner_type && self.owner_id.as_str() == owner_id
    }

    /// True if the owner is another UI node (element or instance).
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.owner_type.is_ui_kind()
    }
}
