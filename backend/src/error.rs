//! Error types for ledger operations
//!
//! Every error here is recoverable: a failed operation rejects the attempted
//! transition and leaves the ledger snapshot exactly as it was.

use crate::ids::PersonId;
use thiserror::Error;

/// Input that cannot form a valid transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Avatar must not be empty")]
    EmptyAvatar,

    #[error("Bill value is required")]
    MissingBill,

    #[error("Bill value must be greater than zero")]
    ZeroBill,

    #[error("Your expense is required")]
    MissingContribution,

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("Your expense {contribution} exceeds the bill value {total_bill}")]
    ContributionExceedsBill { contribution: i64, total_bill: i64 },

    #[error("No person with id {0} in the roster")]
    UnknownPerson(PersonId),

    #[error("No person is selected")]
    NoSelection,

    #[error("Balance of {id} would overflow")]
    BalanceOverflow { id: PersonId },
}

/// Errors surfaced by the ledger engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Person not found: {0}")]
    NotFound(PersonId),

    #[error("Id generator produced only previously issued ids after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("State validation error: {0}")]
    StateValidation(String),
}

impl LedgerError {
    /// True when the error came from rejected input rather than a missing record
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
