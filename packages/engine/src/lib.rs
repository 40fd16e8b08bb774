#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Round-scoring and rating engine for four-player tile-game league matches.
//!
//! The engine validates and settles round submissions, advances a match
//! through turn order by folding over the committed round log, and
//! maintains longitudinal skill ratings. Two rule variants (Japanese and
//! Hong Kong) share one progression contract behind the [`Ruleset`]
//! trait and differ only in scoring arithmetic.
//!
//! Everything here is pure and synchronous: callers own persistence,
//! transport, authentication and notification, serialize concurrent
//! submissions per match, and must durably persist results before
//! treating them as committed.

pub mod domain;
pub mod error;
pub mod rating;

// Re-exports for public API
pub use domain::hand::HandScore;
pub use domain::settlement::{RoundSubmission, TransactionInput};
pub use domain::state::{Match, MatchStatus, PlayerId, Round, RoundPointer, Seat, Wind};
pub use domain::transaction::{Transaction, TransactionKind};
pub use domain::variant::{RuleVariant, Ruleset};
pub use error::DomainError;
pub use rating::elo::{compute_match_rating_deltas, PreMatchRating, RatingDelta};
pub use rating::season::{recalculate_season, RatingRecord, SeasonReplay, SeasonStandings};

/// Validate and settle one round submission against the match's derived
/// current pointer. The returned [`Round`] is not appended; the caller
/// persists it and re-derives the pointer.
pub fn settle_round(m: &Match, submission: &RoundSubmission) -> Result<Round, DomainError> {
    m.variant.ruleset().settle_round(m, submission)
}

/// Derive the pointer of the next round by replaying the committed log.
pub fn compute_next_round_pointer(m: &Match) -> RoundPointer {
    m.variant.ruleset().next_round_pointer(m)
}

/// Whether the committed log terminates the match under its variant's rules.
pub fn is_match_finished(m: &Match) -> bool {
    m.variant.ruleset().is_finished(m)
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
