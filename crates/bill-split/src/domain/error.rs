use thiserror::Error;

use super::entity::EntityKind;

/// Common result type for bill operations
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors raised by bill validation and mutation.
///
/// Every failure is immediate: the bill an operation was given is never
/// partially modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("Invalid amount for {field}: {value} (must be a non-negative finite number no larger than 1e12)")]
    InvalidAmount { field: String, value: f64 },

    #[error("Unknown {kind}: {id}")]
    UnknownReference { kind: EntityKind, id: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("{kind} name must not be empty")]
    EmptyName { kind: EntityKind },

    #[error("Invalid split policy: {0}")]
    InvalidConfig(String),
}

impl SplitError {
    pub(crate) fn unknown(kind: EntityKind, id: &str) -> Self {
        SplitError::UnknownReference {
            kind,
            id: id.to_string(),
        }
    }
}
