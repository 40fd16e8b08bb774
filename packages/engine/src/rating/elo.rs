//! Placement-adjusted, mean-reverting rating deltas for one settled match.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{EloParameters, SEATS};
use crate::domain::state::{Match, MatchStatus, PlayerId, Seat};
use crate::error::DomainError;

/// Pre-match rating snapshot for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreMatchRating {
    pub player_id: PlayerId,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub player_id: PlayerId,
    pub delta: f64,
}

/// Rating deltas for a finished match. `ratings[seat]` is the pre-match
/// rating of the player holding that seat.
pub fn compute_match_rating_deltas(
    m: &Match,
    ratings: &[PreMatchRating; SEATS],
) -> Result<[RatingDelta; SEATS], DomainError> {
    if m.status != MatchStatus::Finished {
        return Err(DomainError::validation(
            "rating deltas require a finished match",
        ));
    }
    for (seat, rating) in ratings.iter().enumerate() {
        if rating.player_id != m.players[seat] {
            return Err(DomainError::validation(format!(
                "rating snapshot for seat {seat} does not match the seat assignment"
            )));
        }
    }
    let params = m.variant.ruleset().elo_parameters();
    Ok(compute_deltas(params, &m.cumulative_totals(), ratings))
}

/// Core formula, independent of match bookkeeping.
///
/// Seats are ranked by final score descending, ties broken by seat
/// ordinal (dealer priority). Each seat's score takes the rank-indexed
/// placement adjustment, then
/// `delta = magnitude * (adjusted / divisor + sensitivity * (avg - r))`.
/// Deltas are never clamped and deliberately do not sum to zero.
pub fn compute_deltas(
    params: &EloParameters,
    scores: &[i32; SEATS],
    ratings: &[PreMatchRating; SEATS],
) -> [RatingDelta; SEATS] {
    let mut order: [Seat; SEATS] = [0, 1, 2, 3];
    order.sort_by_key(|&seat| (-(scores[seat as usize] as i64), seat));

    let average = ratings.iter().map(|r| r.rating).sum::<f64>() / SEATS as f64;

    let mut deltas = [RatingDelta {
        player_id: 0,
        delta: 0.0,
    }; SEATS];
    for (rank, &seat) in order.iter().enumerate() {
        let snapshot = ratings[seat as usize];
        let adjusted = (scores[seat as usize] + params.placement_adjust[rank]) as f64;
        let delta = params.magnitude
            * (adjusted / params.divisor + params.sensitivity * (average - snapshot.rating));
        deltas[seat as usize] = RatingDelta {
            player_id: snapshot.player_id,
            delta,
        };
    }
    deltas
}
