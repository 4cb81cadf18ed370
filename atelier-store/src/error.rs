//! Error types for the store.

use atelier_types::{EntityId, EntityKind};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when mutating or loading the store.
///
/// Reads never fail: a missing entity is an absence, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entity a mutation targets does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    /// An update closure changed the entity's id.
    #[error("{kind} {id} cannot change its id to {new_id}")]
    IdChanged {
        kind: EntityKind,
        id: EntityId,
        new_id: EntityId,
    },

    /// A collection would not have exactly one default mode.
    #[error("collection {collection_id} must have exactly one default mode, found {count}")]
    DefaultModeViolation { collection_id: EntityId, count: usize },

    /// A mode was made default for a collection that does not list it.
    #[error("mode {mode_id} is not part of collection {collection_id}")]
    ModeNotInCollection {
        collection_id: EntityId,
        mode_id: EntityId,
    },

    /// A preset was applied where a different preset type is required.
    #[error("preset {0} is not a typography preset")]
    NotTypographyPreset(EntityId),

    /// A node was given an owner of a kind that cannot own it.
    #[error("invalid ownership: {0}")]
    InvalidOwnership(#[from] atelier_types::TypesError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
