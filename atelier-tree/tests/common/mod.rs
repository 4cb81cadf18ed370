//! Builders and rendering helpers for tree tests.

#![allow(dead_code)]

use atelier_model::{Element, Instance};
use atelier_store::Store;
use atelier_tree::CompositeEntity;
use atelier_types::Ownership;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn add_element(store: &mut Store, id: &str, ownership: Ownership) {
    store
        .insert(Element::new(id, "div", ownership))
        .expect("element inserts");
}

pub fn add_instance(store: &mut Store, id: &str, component_id: &str, ownership: Ownership) {
    store
        .insert(Instance::new(id, component_id, ownership))
        .expect("instance inserts");
}

/// Renders a forest as `a(b,c),d`.
pub fn outline(forest: &[CompositeEntity]) -> String {
    forest
        .iter()
        .map(|entity| {
            if entity.children.is_empty() {
                entity.id().to_string()
            } else {
                format!("{}({})", entity.id(), outline(&entity.children))
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
