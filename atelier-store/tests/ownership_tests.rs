//! The ownership index must always equal the index derived from scratch.

mod common;

use atelier_model::Element;
use atelier_store::{EntityCollection, OwnershipIndex};
use atelier_types::{EntityKind, Ownership};
use common::element;
use proptest::prelude::*;

#[test]
fn entities_without_ownership_are_not_indexed() {
    let mut index = OwnershipIndex::new();
    let token = atelier_model::Token {
        id: "t1".into(),
        name: "primary".into(),
        collection_id: "col".into(),
    };
    index.add_ownership(&token);
    assert_eq!(index.owner_count(), 0);
}

#[test]
fn add_is_idempotent() {
    let mut index = OwnershipIndex::new();
    let e = element("e1", Ownership::screen("s1"));
    index.add_ownership(&e);
    index.add_ownership(&e);
    assert_eq!(index.get(EntityKind::Screen, "s1").len(), 1);
}

#[test]
fn remove_prunes_empty_owners() {
    let mut index = OwnershipIndex::new();
    let e = element("e1", Ownership::screen("s1"));
    index.add_ownership(&e);
    index.remove_ownership(&e);
    assert_eq!(index.owner_count(), 0);
    assert!(index.get(EntityKind::Screen, "s1").is_empty());
}

#[test]
fn ordered_add_follows_collection_position() {
    let order = ["a", "b", "c", "d"];
    let position = |id: &atelier_types::EntityId| order.iter().position(|o| *o == id.as_str());
    let mut index = OwnershipIndex::new();
    index.add_ownership(&element("a", Ownership::screen("s1")));
    index.add_ownership(&element("d", Ownership::screen("s1")));
    index.add_ownership_ordered(&element("c", Ownership::screen("s1")), position);
    index.add_ownership_ordered(&element("b", Ownership::screen("s1")), position);

    let ids: Vec<&str> = index
        .get(EntityKind::Screen, "s1")
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[test]
fn same_entries_compares_order() {
    let ab = OwnershipIndex::derive(&[
        element("a", Ownership::screen("s1")),
        element("b", Ownership::screen("s1")),
    ]);
    let ba = OwnershipIndex::derive(&[
        element("b", Ownership::screen("s1")),
        element("a", Ownership::screen("s1")),
    ]);
    assert!(ab.same_entries(&ab.clone()));
    assert!(!ab.same_entries(&ba));
}

#[test]
fn clear_ownerships_empties_index() {
    let mut index = OwnershipIndex::derive(&[
        element("a", Ownership::screen("s1")),
        element("b", Ownership::element("a")),
    ]);
    assert_eq!(index.owner_count(), 2);
    index.clear_ownerships();
    assert_eq!(index.owner_count(), 0);
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Reparent(u8, u8),
    Remove(u8),
    Reset(Vec<(u8, u8)>),
}

fn owner(n: u8) -> Ownership {
    match n % 4 {
        0 => Ownership::screen(format!("s{}", n % 3)),
        1 => Ownership::component(format!("c{}", n % 3)),
        2 => Ownership::element(format!("e{}", n % 8)),
        _ => Ownership::instance(format!("i{}", n % 3)),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..8, any::<u8>()).prop_map(|(id, o)| Op::Insert(id, o)),
        3 => (0u8..8, any::<u8>()).prop_map(|(id, o)| Op::Reparent(id, o)),
        2 => (0u8..8).prop_map(Op::Remove),
        1 => prop::collection::vec((0u8..8, any::<u8>()), 0..6).prop_map(Op::Reset),
    ]
}

proptest! {
    #[test]
    fn maintained_index_matches_derived(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut c: EntityCollection<Element> = EntityCollection::new();
        for op in ops {
            match op {
                Op::Insert(id, o) => {
                    c.insert(element(&format!("e{id}"), owner(o)));
                }
                Op::Reparent(id, o) => {
                    let _ = c.update(&format!("e{id}"), |e| e.ownership = owner(o));
                }
                Op::Remove(id) => {
                    c.remove(&format!("e{id}"));
                }
                Op::Reset(items) => {
                    c.set_all(items.into_iter().map(|(id, o)| element(&format!("e{id}"), owner(o))));
                }
            }
            let derived = OwnershipIndex::derive(c.iter());
            prop_assert!(c.ownership_index().same_entries(&derived));
        }
    }
}
