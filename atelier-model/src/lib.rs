//! Entity model for the Atelier design-state engine.
//!
//! Defines every entity the builder stores in its normalized collections:
//! - [`Element`] / [`Instance`]: the nodes of a screen or component tree
//! - [`Prop`], [`Token`], [`Variable`], [`Preset`]: the variable sources
//!   a node property can be bound to
//! - [`Collection`], [`VariableMode`]: the mode axes (breakpoints, themes)
//!   that token and preset values vary along
//! - [`BindingRef`]: the closed set of references a property may carry
//!   instead of a literal value
//!
//! All entities implement [`Entity`], which is what the store's generic
//! collections and ownership index are written against.

mod binding;
mod design;
mod entity;
mod sources;
mod ui;

pub use binding::{BindingKind, BindingRef, PresetType, replace_binding};
pub use design::{Component, Screen};
pub use entity::{Entity, UiEntity};
pub use sources::{
    Collection, CollectionType, DataModel, DataModelField, Preset, PresetModeValue, Prop,
    PropType, PropValue, RecordFilter, Token, TokenValue, Variable, VariableMode,
    VariableModeGroup, VariableType,
};
pub use ui::{
    Content, Element, Instance, InstanceOverrides, OverrideValue, PropOverride, Properties,
    ReferenceKind, StyleProperties, ValueReference,
};
