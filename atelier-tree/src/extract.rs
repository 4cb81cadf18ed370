//! Flattening helpers over assembled forests.

use atelier_model::{Element, Instance};

use crate::node::{CompositeEntity, UiNode};

/// Elements of the forest in pre-order, without entering instances.
#[must_use]
pub fn extract_all_elements_from_tree(forest: &[CompositeEntity]) -> Vec<&Element> {
    let mut out = Vec::new();
    walk(forest, false, &mut |node| {
        if let UiNode::Element(element) = node {
            out.push(element);
        }
    });
    out
}

/// Instances of the forest in pre-order, without entering instances.
///
/// Instances nested inside another instance's component are not listed.
#[must_use]
pub fn extract_all_instances_from_tree(forest: &[CompositeEntity]) -> Vec<&Instance> {
    let mut out = Vec::new();
    walk(forest, false, &mut |node| {
        if let UiNode::Instance(instance) = node {
            out.push(instance);
        }
    });
    out
}

/// Every element in pre-order, including those spliced in from the
/// components of nested instances.
#[must_use]
pub fn extract_nested_elements(forest: &[CompositeEntity]) -> Vec<&Element> {
    let mut out = Vec::new();
    walk(forest, true, &mut |node| {
        if let UiNode::Element(element) = node {
            out.push(element);
        }
    });
    out
}

fn walk<'a>(
    forest: &'a [CompositeEntity],
    enter_instances: bool,
    visit: &mut impl FnMut(&'a UiNode),
) {
    for entity in forest {
        visit(&entity.node);
        if enter_instances || matches!(entity.node, UiNode::Element(_)) {
            walk(&entity.children, enter_instances, visit);
        }
    }
}
