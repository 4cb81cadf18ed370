use atelier_types::{EntityId, EntityKind, Ownership};

use crate::{BindingRef, Element, Instance, Properties};

/// Common surface of every stored entity.
///
/// The store's collections and ownership index are generic over this trait.
/// Entities that are never scoped to a container keep the default
/// `ownership()` of `None`.
pub trait Entity: Clone + std::fmt::Debug {
    /// The kind every value of this type reports.
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;

    fn ownership(&self) -> Option<&Ownership> {
        None
    }
}

/// Borrowed view of either UI node kind.
///
/// The resolver looks ids up in the union of elements and instances; this
/// is what that lookup returns.
#[derive(Debug, Clone, Copy)]
pub enum UiEntity<'a> {
    Element(&'a Element),
    Instance(&'a Instance),
}

impl<'a> UiEntity<'a> {
    #[must_use]
    pub fn id(&self) -> &'a EntityId {
        match self {
            UiEntity::Element(e) => &e.id,
            UiEntity::Instance(i) => &i.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            UiEntity::Element(_) => EntityKind::Element,
            UiEntity::Instance(_) => EntityKind::Instance,
        }
    }

    #[must_use]
    pub fn ownership(&self) -> &'a Ownership {
        match self {
            UiEntity::Element(e) => &e.ownership,
            UiEntity::Instance(i) => &i.ownership,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &'a Properties {
        match self {
            UiEntity::Element(e) => &e.properties,
            UiEntity::Instance(i) => &i.properties,
        }
    }

    /// Root-level bindings (`bindings[]`).
    #[must_use]
    pub fn bindings(&self) -> &'a [BindingRef] {
        match self {
            UiEntity::Element(e) => &e.bindings,
            UiEntity::Instance(i) => &i.bindings,
        }
    }

    #[must_use]
    pub fn as_instance(&self) -> Option<&'a Instance> {
        match self {
            UiEntity::Instance(i) => Some(i),
            UiEntity::Element(_) => None,
        }
    }
}

/// Implements [`Entity`] for a struct with an `id` field and no ownership.
macro_rules! flat_entity {
    ($ty:ty, $kind:expr) => {
        impl $crate::Entity for $ty {
            const KIND: atelier_types::EntityKind = $kind;

            fn id(&self) -> &atelier_types::EntityId {
                &self.id
            }
        }
    };
}

/// Implements [`Entity`] for a struct with `id` and `ownership: Option<Ownership>`.
macro_rules! scoped_entity {
    ($ty:ty, $kind:expr) => {
        impl $crate::Entity for $ty {
            const KIND: atelier_types::EntityKind = $kind;

            fn id(&self) -> &atelier_types::EntityId {
                &self.id
            }

            fn ownership(&self) -> Option<&atelier_types::Ownership> {
                self.ownership.as_ref()
            }
        }
    };
}

pub(crate) use flat_entity;
pub(crate) use scoped_entity;
