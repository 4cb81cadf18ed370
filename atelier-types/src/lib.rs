//! Core type definitions for the Atelier design-state engine.
//!
//! This crate defines the fundamental types every other crate speaks:
//! - Entity identifiers ([`EntityId`])
//! - The closed set of entity kinds ([`EntityKind`])
//! - Weak parent references between entities ([`Ownership`])
//!
//! Live data records are JSON objects ([`Record`]).

mod ids;
mod kind;
mod ownership;

pub use ids::EntityId;
pub use kind::EntityKind;
pub use ownership::Ownership;

/// A single row of a data model, keyed by field name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("entity kind {0} cannot own other entities")]
    InvalidOwnerKind(EntityKind),

    #[error("unknown entity kind: {0}")]
    UnknownKind(String),
}
