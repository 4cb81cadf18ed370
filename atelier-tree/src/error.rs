use atelier_types::EntityKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Trees can only be built under screens, components, elements and
    /// instances.
    #[error("{0} cannot own canvas nodes")]
    InvalidOwnerKind(EntityKind),
}

pub type TreeResult<T> = Result<T, TreeError>;
