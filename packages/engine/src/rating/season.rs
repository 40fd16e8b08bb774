//! Season replay: authoritative standings rebuilt from the match log.
//!
//! Ratings are cumulative-additive and never recomputed in place; after
//! a manual correction the season is replayed from scratch, which makes
//! the full replay the single fallback that defines correctness.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::rules::{BASE_RATING, SEATS};
use crate::domain::state::{Match, MatchStatus, PlayerId};
use crate::error::DomainError;
use crate::rating::elo::{self, PreMatchRating, RatingDelta};

/// Longitudinal rating record, seeded at the base rating and mutated
/// only by additive deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub player_id: PlayerId,
    pub rating: f64,
    pub games_played: u32,
}

/// Authoritative season standings plus the delta trail that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStandings {
    /// Sorted by rating descending, player id ascending on ties.
    pub final_ratings: Vec<RatingRecord>,
    /// Per-seat deltas of each replayed match, in replay order.
    pub per_match_deltas: Vec<[RatingDelta; SEATS]>,
}

/// Incremental season replay: one `apply_match` call per finished match,
/// in completion order.
///
/// Each match's pre-match ratings are the base rating plus the deltas
/// accumulated strictly from earlier matches, never a live stored
/// rating, so replay order alone determines the result. A batch over
/// thousands of matches can stop between calls and resume later with
/// the same value; there is no valid checkpoint inside a match.
#[derive(Debug, Clone, Default)]
pub struct SeasonReplay {
    ratings: BTreeMap<PlayerId, RatingRecord>,
    per_match_deltas: Vec<[RatingDelta; SEATS]>,
    last_completed_at: Option<OffsetDateTime>,
}

impl SeasonReplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches_applied(&self) -> usize {
        self.per_match_deltas.len()
    }

    pub fn apply_match(&mut self, m: &Match) -> Result<[RatingDelta; SEATS], DomainError> {
        if m.status != MatchStatus::Finished {
            return Err(DomainError::validation(
                "season replay accepts finished matches only",
            ));
        }
        let completed_at = m.completed_at.ok_or_else(|| {
            DomainError::validation("finished match is missing its completion time")
        })?;
        if let Some(previous) = self.last_completed_at {
            if completed_at < previous {
                return Err(DomainError::validation(
                    "matches must be replayed in completion order",
                ));
            }
        }

        let mut pre = [PreMatchRating {
            player_id: 0,
            rating: BASE_RATING,
        }; SEATS];
        for (seat, &player_id) in m.players.iter().enumerate() {
            pre[seat] = PreMatchRating {
                player_id,
                rating: self
                    .ratings
                    .get(&player_id)
                    .map_or(BASE_RATING, |record| record.rating),
            };
        }

        let deltas = elo::compute_match_rating_deltas(m, &pre)?;
        for delta in &deltas {
            let record = self
                .ratings
                .entry(delta.player_id)
                .or_insert(RatingRecord {
                    player_id: delta.player_id,
                    rating: BASE_RATING,
                    games_played: 0,
                });
            record.rating += delta.delta;
            record.games_played += 1;
        }
        self.last_completed_at = Some(completed_at);
        self.per_match_deltas.push(deltas);
        debug!(applied = self.matches_applied(), "match replayed");
        Ok(deltas)
    }

    pub fn finish(self) -> SeasonStandings {
        let mut final_ratings: Vec<RatingRecord> = self.ratings.into_values().collect();
        final_ratings.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then(a.player_id.cmp(&b.player_id))
        });
        SeasonStandings {
            final_ratings,
            per_match_deltas: self.per_match_deltas,
        }
    }
}

/// Run-to-completion replay of a season's ranked, finished matches,
/// ordered by completion time. Unranked matches are skipped.
pub fn recalculate_season(matches: &[Match]) -> Result<SeasonStandings, DomainError> {
    let mut replay = SeasonReplay::new();
    for m in matches {
        if !m.ranked {
            continue;
        }
        replay.apply_match(m)?;
    }
    info!(matches = replay.matches_applied(), "season recalculated");
    Ok(replay.finish())
}
