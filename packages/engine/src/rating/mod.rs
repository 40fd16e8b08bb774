//! Longitudinal skill ratings: per-match deltas and season replay.

pub mod elo;
pub mod season;


// Re-exports for ergonomics
pub use elo::{compute_match_rating_deltas, PreMatchRating, RatingDelta};
pub use season::{recalculate_season, RatingRecord, SeasonReplay, SeasonStandings};
