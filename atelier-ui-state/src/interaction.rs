//! Hover, focus and selection.
//!
//! Each entity kind has its own scalar slots; hovering an element does not
//! disturb the hovered instance, and there is no hierarchy between slots.

use atelier_types::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// The interaction slots of one entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSlots {
    pub hovered: Option<EntityId>,
    pub focused: Option<EntityId>,
    pub selected: Option<EntityId>,
}

impl InteractionSlots {
    fn is_empty(&self) -> bool {
        self.hovered.is_none() && self.focused.is_none() && self.selected.is_none()
    }
}

/// Interaction state for every entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    slots: HashMap<EntityKind, InteractionSlots>,
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slots(&self, kind: EntityKind) -> Option<&InteractionSlots> {
        self.slots.get(&kind)
    }

    fn slots_mut(&mut self, kind: EntityKind) -> &mut InteractionSlots {
        self.slots.entry(kind).or_default()
    }

    // ── Hover ───────────────────────────────────────────────────

    pub fn hover(&mut self, kind: EntityKind, id: impl Into<EntityId>) {
        let id = id.into();
        trace!(%kind, %id, "hover");
        self.slots_mut(kind).hovered = Some(id);
    }

    /// Clears the hover if `id` is the hovered entity. A late leave event
    /// for an entity that is no longer hovered changes nothing.
    pub fn unhover(&mut self, kind: EntityKind, id: &str) {
        self.clear_if(kind, id, |slots| &mut slots.hovered);
    }

    #[must_use]
    pub fn hovered(&self, kind: EntityKind) -> Option<&EntityId> {
        self.slots(kind).and_then(|s| s.hovered.as_ref())
    }

    #[must_use]
    pub fn is_hovered(&self, kind: EntityKind, id: &str) -> bool {
        self.hovered(kind).is_some_and(|h| h == id)
    }

    // ── Focus ───────────────────────────────────────────────────

    pub fn focus(&mut self, kind: EntityKind, id: impl Into<EntityId>) {
        let id = id.into();
        trace!(%kind, %id, "focus");
        self.slots_mut(kind).focused = Some(id);
    }

    /// Clears the focus if `id` holds it.
    pub fn blur(&mut self, kind: EntityKind, id: &str) {
        self.clear_if(kind, id, |slots| &mut slots.focused);
    }

    #[must_use]
    pub fn focused(&self, kind: EntityKind) -> Option<&EntityId> {
        self.slots(kind).and_then(|s| s.focused.as_ref())
    }

    #[must_use]
    pub fn is_focused(&self, kind: EntityKind, id: &str) -> bool {
        self.focused(kind).is_some_and(|f| f == id)
    }

    // ── Selection ───────────────────────────────────────────────

    /// Selects `id`, replacing any selection of the same kind.
    pub fn select(&mut self, kind: EntityKind, id: impl Into<EntityId>) {
        let id = id.into();
        trace!(%kind, %id, "select");
        self.slots_mut(kind).selected = Some(id);
    }

    pub fn deselect(&mut self, kind: EntityKind) {
        if let Some(slots) = self.slots.get_mut(&kind) {
            slots.selected = None;
        }
    }

    #[must_use]
    pub fn selected(&self, kind: EntityKind) -> Option<&EntityId> {
        self.slots(kind).and_then(|s| s.selected.as_ref())
    }

    #[must_use]
    pub fn is_selected(&self, kind: EntityKind, id: &str) -> bool {
        self.selected(kind).is_some_and(|s| s == id)
    }

    // ── Reset ───────────────────────────────────────────────────

    /// Clears every slot of one kind.
    pub fn clear(&mut self, kind: EntityKind) {
        self.slots.remove(&kind);
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    /// Drops `id` from every slot of `kind`, e.g. after the entity was removed.
    pub fn forget(&mut self, kind: EntityKind, id: &str) {
        let Some(slots) = self.slots.get_mut(&kind) else {
            return;
        };
        for slot in [&mut slots.hovered, &mut slots.focused, &mut slots.selected] {
            if slot.as_ref().is_some_and(|current| current == id) {
                *slot = None;
            }
        }
        if slots.is_empty() {
            self.slots.remove(&kind);
        }
    }

    fn clear_if(
        &mut self,
        kind: EntityKind,
        id: &str,
        slot: impl FnOnce(&mut InteractionSlots) -> &mut Option<EntityId>,
    ) {
        if let Some(slots) = self.slots.get_mut(&kind) {
            let slot = slot(slots);
            if slot.as_ref().is_some_and(|current| current == id) {
                *slot = None;
            }
        }
    }
}
