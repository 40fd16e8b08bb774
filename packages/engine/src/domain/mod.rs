//! Domain layer: pure settlement and progression logic.

pub mod hand;
pub mod hand_value;
pub mod progression;
pub mod rules;
pub mod settlement;
pub mod state;
pub mod transaction;
pub mod variant;

#[cfg(test)]
mod tests_progression;
#[cfg(test)]
mod tests_props_settlement;

// Re-exports for ergonomics
pub use hand::HandScore;
pub use settlement::{RoundSubmission, TransactionInput};
pub use state::{forward_distance, Match, MatchStatus, Round, RoundPointer, Seat, Wind};
pub use variant::{RuleVariant, Ruleset};
