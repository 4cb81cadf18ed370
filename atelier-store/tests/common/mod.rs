//! Shared fixtures for store tests.

#![allow(dead_code)]

use atelier_model::{Collection, CollectionType, Element, Instance, VariableMode};
use atelier_types::Ownership;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn element(id: &str, ownership: Ownership) -> Element {
    Element::new(id, "div", ownership)
}

pub fn instance(id: &str, component_id: &str, ownership: Ownership) -> Instance {
    Instance::new(id, component_id, ownership)
}

pub fn mode(id: &str, is_default: bool) -> VariableMode {
    VariableMode {
        id: id.into(),
        name: id.to_uppercase(),
        is_default,
        group_id: None,
    }
}

pub fn collection(id: &str, mode_ids: &[&str]) -> Collection {
    Collection {
        id: id.into(),
        name: id.to_uppercase(),
        collection_type: CollectionType::Tokens,
        mode_ids: mode_ids.iter().map(|m| (*m).into()).collect(),
    }
}
