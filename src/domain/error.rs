//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the IDS data model.
/// These are independent of I/O and pipeline concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown operator: '{0}'")]
    UnknownOperator(char),

    #[error("operator '{operator}' requires {expected} operands, got {actual}")]
    ArityMismatch {
        operator: char,
        expected: usize,
        actual: usize,
    },

    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("malformed annotation at position {position}: {reason}")]
    MalformedAnnotation { position: usize, reason: String },

    #[error("invalid row '{character}': {reason}")]
    InvalidRow { character: String, reason: String },

    #[error("substitution for '{origin}' cycles through shape '{shape}'")]
    SubstitutionCycle { origin: String, shape: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
