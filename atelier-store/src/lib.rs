//! Normalized entity store for the Atelier design-state engine.
//!
//! Every entity kind lives in its own [`EntityCollection`]: an ordered id
//! list, an id → entity map, and an [`OwnershipIndex`] answering
//! "which entities does this screen/component/element/instance own" in
//! constant time. The index is a cache over the entities' `ownership`
//! fields and is only ever touched by the collection itself, so it can
//! never drift from the data it describes.
//!
//! [`Store`] bundles the collections with the external data-record store,
//! exposes the read accessors the resolver and tree builder consume, and
//! validates the cross-entity invariants (one default mode per collection)
//! at mutation time.

mod collection;
mod config;
mod error;
mod memo;
mod ownership;
mod records;
mod snapshot;
mod store;

pub use collection::EntityCollection;
pub use config::{EngineConfig, StyleConfig, TreeConfig};
pub use error::{StoreError, StoreResult};
pub use memo::{Memo, MemoStats};
pub use ownership::OwnershipIndex;
pub use records::RecordStore;
pub use snapshot::StoreSnapshot;
pub use store::{Store, Stored};
