//! Composite trees for the Atelier canvas.
//!
//! Elements and instances are stored flat, each pointing at its owner. This
//! crate rebuilds the hierarchy below a screen, component, element or
//! instance, splicing a component's internals into every instance of it.

mod builder;
mod error;
mod extract;
mod node;
mod selector;

pub use builder::{TreeBuilder, build_composite_tree};
pub use error::{TreeError, TreeResult};
pub use extract::{
    extract_all_elements_from_tree, extract_all_instances_from_tree, extract_nested_elements,
};
pub use node::{CompositeEntity, UiNode};
pub use selector::CompositeTreeSelector;
