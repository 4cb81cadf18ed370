//! Binding resolution for the Atelier design-state engine.
//!
//! Turning a node property into something renderable happens in two steps:
//!
//! 1. [`Resolver::resolve_normalized`] reads the property (`content`,
//!    `style.<name>`, `bindings.<KIND>`), decides whether it is a literal or a
//!    binding, and follows the binding to its source entity. The result is a
//!    [`NormalizedBinding`]: the source identified, its raw fields carried.
//! 2. [`Resolver::resolve_prepared`] applies the per-render context (the
//!    instance being rendered, the current data record) and override
//!    precedence to produce the final value.
//!
//! Neither step ever fails loudly. Projects are edited live and dangling
//! references are normal; a property that cannot be resolved simply has no
//! value, and sibling properties are unaffected.
//!
//! [`StyleAggregator`] runs the pipeline over the full set of CSS properties
//! a node can carry and applies the style-level rules (presets, defaults).

mod normalized;
mod path;
mod resolver;
mod styles;

pub use normalized::{ContentType, NormalizedBinding};
pub use path::PropertyPath;
pub use resolver::{ResolveContext, Resolver};
pub use styles::{
    ComputedStyles, ContentDescriptor, STYLE_PROPERTIES, StyleAggregator, StyleSelector,
};
