//! Engine-level error type.
//!
//! All variants are local, synchronous validation failures: a round
//! submission either commits wholly or not at all, nothing here is
//! retried automatically, and calculation-only code never fails softly
//! (a constant-table miss is a bug, not a runtime condition).

use thiserror::Error;

use crate::domain::state::RoundPointer;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Structurally impossible rank/fu/dora (or grade) combination.
    #[error("invalid hand: {0}")]
    InvalidHand(String),
    /// Wrong winner/loser/liability seat count or identity for the declared kind.
    #[error("invalid role assignment: {0}")]
    InvalidRoleAssignment(String),
    /// Mixed beneficiary families in one round, or multiple losers where
    /// one shared loser is required.
    #[error("inconsistent transaction batch: {0}")]
    InconsistentTransactionBatch(String),
    /// Submission targets a pointer that no longer matches the match's
    /// derived current pointer.
    #[error("stale submission: expected {expected}, got {submitted}")]
    StaleSubmission {
        expected: RoundPointer,
        submitted: RoundPointer,
    },
    /// Other input validation failure (season ordering, unfinished match, ...).
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_hand(detail: impl Into<String>) -> Self {
        Self::InvalidHand(detail.into())
    }

    pub fn invalid_role(detail: impl Into<String>) -> Self {
        Self::InvalidRoleAssignment(detail.into())
    }

    pub fn inconsistent_batch(detail: impl Into<String>) -> Self {
        Self::InconsistentTransactionBatch(detail.into())
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    /// Stable machine-readable code for each variant.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidHand(_) => "INVALID_HAND",
            DomainError::InvalidRoleAssignment(_) => "INVALID_ROLE_ASSIGNMENT",
            DomainError::InconsistentTransactionBatch(_) => "INCONSISTENT_TRANSACTION_BATCH",
            DomainError::StaleSubmission { .. } => "STALE_SUBMISSION",
            DomainError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}
