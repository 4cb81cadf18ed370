//! Mutually exclusive modes per editor section.

use atelier_types::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// A set of mutually exclusive modes with a default.
pub trait Mode: Clone + PartialEq + Default + Debug {
    /// Section name used in logs.
    const SECTION: &'static str;
}

/// The current mode of one section plus one step of history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeState<M> {
    current: M,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous: Option<M>,
}

impl<M: Mode> ModeState<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> &M {
        &self.current
    }

    /// The mode before the last change.
    #[must_use]
    pub fn previous(&self) -> Option<&M> {
        self.previous.as_ref()
    }

    #[must_use]
    pub fn is(&self, mode: &M) -> bool {
        self.current == *mode
    }

    /// Switches to `mode`. Returns false when it was already current.
    pub fn set(&mut self, mode: M) -> bool {
        if self.current == mode {
            return false;
        }
        debug!(section = M::SECTION, from = ?self.current, to = ?mode, "mode changed");
        self.previous = Some(std::mem::replace(&mut self.current, mode));
        true
    }

    pub fn reset(&mut self) -> bool {
        self.set(M::default())
    }

    /// Switches to `mode`, or back to the default if `mode` is current.
    pub fn toggle(&mut self, mode: M) -> bool {
        if self.current == mode {
            self.reset()
        } else {
            self.set(mode)
        }
    }

    /// Returns to the previous mode, if any.
    pub fn back(&mut self) -> bool {
        match self.previous.take() {
            Some(previous) => self.set(previous),
            None => false,
        }
    }
}

macro_rules! modes {
    ($(#[$meta:meta])* $name:ident, $section:literal { $default:ident $(, $variant:ident)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
        }

        impl Mode for $name {
            const SECTION: &'static str = $section;
        }
    };
}

modes!(
    /// What the canvas shows.
    CanvasMode, "canvas" { Design, Preview, Code }
);
modes!(LeftPanelMode, "left_panel" { Layers, Components, Assets, Data });
modes!(RightPanelMode, "right_panel" { Style, Props, Interactions });
modes!(VariablesPanelMode, "variables_panel" { Tokens, Presets, Variables });

/// What the editor is currently editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationTarget {
    #[default]
    None,
    Screen(EntityId),
    Component(EntityId),
}

impl Mode for NavigationTarget {
    const SECTION: &'static str = "navigation";
}

impl NavigationTarget {
    #[must_use]
    pub fn id(&self) -> Option<&EntityId> {
        match self {
            NavigationTarget::None => None,
            NavigationTarget::Screen(id) | NavigationTarget::Component(id) => Some(id),
        }
    }
}

/// Every section's mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorModes {
    pub canvas: ModeState<CanvasMode>,
    pub left_panel: ModeState<LeftPanelMode>,
    pub right_panel: ModeState<RightPanelMode>,
    pub variables_panel: ModeState<VariablesPanelMode>,
    pub navigation: ModeState<NavigationTarget>,
}

impl EditorModes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a screen or component for editing. The canvas returns to
    /// design mode when the target changes.
    pub fn navigate(&mut self, target: NavigationTarget) {
        if self.navigation.set(target) {
            self.canvas.reset();
        }
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
