// Error types for the voter boundary and draft queries.

use thiserror::Error;

use crate::land::LandId;

/// A voter record rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("voter name must not be blank")]
    BlankName,

    #[error("voter `{voter}`: `{field}` must be between 1 and 32, got {value}")]
    ChoiceOutOfRange {
        voter: String,
        field: &'static str,
        value: LandId,
    },

    #[error("voter `{voter}`: `{field}` repeats land {value}; choices must be distinct")]
    DuplicateChoice {
        voter: String,
        field: &'static str,
        value: LandId,
    },

    #[error("voter `{name}` is already registered")]
    DuplicateVoter { name: String },
}

impl ValidationError {
    /// The input field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::BlankName | ValidationError::DuplicateVoter { .. } => "name",
            ValidationError::ChoiceOutOfRange { field, .. }
            | ValidationError::DuplicateChoice { field, .. } => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("invalid voter: {0}")]
    Validation(#[from] ValidationError),

    #[error("insufficient voters: need at least {required}, have {actual}")]
    InsufficientVoters { required: usize, actual: usize },

    #[error("invalid round number {0}; must be between 1 and 4")]
    InvalidRound(u8),
}
