//! Core state types: seats, winds, round pointers, rounds and matches.
//!
//! A match's "current round" is never stored; it is derived by a pure
//! fold over the immutable round log (see `progression`), which keeps a
//! single source of truth.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::rules::SEATS;
use crate::domain::transaction::Transaction;
use crate::domain::variant::RuleVariant;

pub type Seat = u8; // 0..=3
pub type PlayerId = i64;

/// Forward (clockwise) seating distance from `from` to `to`, in 0..=3.
#[inline]
pub fn forward_distance(from: Seat, to: Seat) -> u8 {
    ((to as i16 - from as i16).rem_euclid(SEATS as i16)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

impl Wind {
    pub const ORDER: [Wind; SEATS] = [Wind::East, Wind::South, Wind::West, Wind::North];

    /// Next wind in rotation. North saturates: Japanese matches end
    /// unconditionally when the pointer reaches North, so nothing ever
    /// advances past it.
    pub fn next(self) -> Wind {
        match self {
            Wind::East => Wind::South,
            Wind::South => Wind::West,
            Wind::West => Wind::North,
            Wind::North => Wind::North,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Wind::East => "E",
            Wind::South => "S",
            Wind::West => "W",
            Wind::North => "N",
        }
    }
}

/// Position of a match within its schedule: wind, 1-based hand number,
/// bonus counter and the carried stake count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPointer {
    pub wind: Wind,
    /// Hand number 1..=4; seat `hand - 1` is the dealer.
    pub hand: u8,
    pub bonus: u32,
    /// Stakes carried into this round from earlier draws.
    pub stakes: u32,
}

impl RoundPointer {
    pub fn initial() -> Self {
        Self {
            wind: Wind::East,
            hand: 1,
            bonus: 0,
            stakes: 0,
        }
    }

    #[inline]
    pub fn dealer(&self) -> Seat {
        self.hand - 1
    }

    /// Cardinal wind of `seat` for this hand (the dealer holds East).
    pub fn seat_wind(&self, seat: Seat) -> Wind {
        Wind::ORDER[forward_distance(self.dealer(), seat) as usize]
    }
}

impl Display for RoundPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}+{}", self.wind.label(), self.hand, self.bonus)
    }
}

/// One settled round. Immutable once committed; an amendment is a
/// delete-and-recreate performed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub wind: Wind,
    pub hand: u8,
    pub bonus: u32,
    pub starting_stakes: u32,
    pub ending_stakes: u32,
    /// Seats that committed a stake this round (Japanese only).
    pub declared_stake_seats: Vec<Seat>,
    /// Seats declared ready on a no-win settlement.
    pub declared_ready_seats: Vec<Seat>,
    pub transactions: Vec<Transaction>,
    /// Net per-seat movement including stake debits and the pot credit.
    /// Conservation: this sums to `-stake_unit * (ending - starting)`,
    /// i.e. exactly zero whenever the pot does not change hands.
    pub score_deltas: [i32; SEATS],
}

impl Round {
    pub fn pointer(&self) -> RoundPointer {
        RoundPointer {
            wind: self.wind,
            hand: self.hand,
            bonus: self.bonus,
            stakes: self.starting_stakes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Finished,
}

/// A four-player match: fixed seat assignments plus the chronological
/// round log. The settlement engine produces rounds for the caller to
/// append; the progression fold flips nothing here by itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub variant: RuleVariant,
    /// Player in each seat, indexed by seat ordinal.
    pub players: [PlayerId; SEATS],
    pub rounds: Vec<Round>,
    pub status: MatchStatus,
    /// Whether the match counts toward season ratings.
    pub ranked: bool,
    pub completed_at: Option<OffsetDateTime>,
}

impl Match {
    pub fn new(variant: RuleVariant, players: [PlayerId; SEATS]) -> Self {
        Self {
            variant,
            players,
            rounds: Vec::new(),
            status: MatchStatus::InProgress,
            ranked: true,
            completed_at: None,
        }
    }

    /// Per-seat totals: starting points plus every committed delta.
    pub fn cumulative_totals(&self) -> [i32; SEATS] {
        let mut totals = [self.variant.config().start_points; SEATS];
        for round in &self.rounds {
            for (seat, delta) in round.score_deltas.iter().enumerate() {
                totals[seat] += delta;
            }
        }
        totals
    }
}
