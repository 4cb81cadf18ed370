//! Editor-side state that is not part of the design document: what the
//! pointer hovers, what has focus, what is selected, and which mode each
//! editor section is in.

mod interaction;
mod modes;

pub use interaction::{InteractionSlots, InteractionState};
pub use modes::{
    CanvasMode, EditorModes, LeftPanelMode, Mode, ModeState, NavigationTarget, RightPanelMode,
    VariablesPanelMode,
};
