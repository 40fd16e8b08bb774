//! Transaction builders: per-kind signed score-delta vectors.
//!
//! Role multipliers come from seat-vs-dealer comparison. The bonus
//! counter is passed per call: the settlement engine hands the live
//! counter to the one honba-bearing transaction of the round and 0 to
//! every other.

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandScore;
use crate::domain::hand_value;
use crate::domain::rules::{VariantConfig, DEALER_DEAL_IN_MULTIPLIER, SEATS};
use crate::domain::state::{forward_distance, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    DealIn,
    SelfDraw,
    DealInLiability,
    SelfDrawLiability,
    NoWinSettlement,
    AbortiveRedraw,
}

impl TransactionKind {
    pub fn is_deal_in(self) -> bool {
        matches!(self, TransactionKind::DealIn | TransactionKind::DealInLiability)
    }

    pub fn is_self_draw(self) -> bool {
        matches!(self, TransactionKind::SelfDraw | TransactionKind::SelfDrawLiability)
    }

    pub fn has_liability(self) -> bool {
        matches!(
            self,
            TransactionKind::DealInLiability | TransactionKind::SelfDrawLiability
        )
    }
}

/// One settled transfer inside a round. Deltas always sum to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub hand: Option<HandScore>,
    pub winner: Option<Seat>,
    pub loser: Option<Seat>,
    pub liability_seat: Option<Seat>,
    pub score_deltas: [i32; SEATS],
}

/// Deal-in: the discarder pays the whole amount. Winner multiplier is 6
/// for the dealer, the variant's non-dealer multiplier otherwise. A
/// liability kind moves the payment to the liable seat when the
/// discarder is not the dealer; a dealer's payment always stays put.
#[allow(clippy::too_many_arguments)]
pub fn build_deal_in(
    config: &VariantConfig,
    kind: TransactionKind,
    hand: &HandScore,
    winner: Seat,
    loser: Seat,
    liability_seat: Option<Seat>,
    dealer: Seat,
    bonus: u32,
) -> Transaction {
    let multiplier = if winner == dealer {
        DEALER_DEAL_IN_MULTIPLIER
    } else {
        config.deal_in_multiplier
    };
    let amount =
        hand_value::payment(config, hand, multiplier) + config.bonus_deal_in_unit * bonus as i32;

    let payer = match (kind, liability_seat) {
        (TransactionKind::DealInLiability, Some(liable)) if loser != dealer => liable,
        _ => loser,
    };

    let mut deltas = [0i32; SEATS];
    deltas[payer as usize] -= amount;
    deltas[winner as usize] += amount;

    Transaction {
        kind,
        hand: Some(*hand),
        winner: Some(winner),
        loser: Some(loser),
        liability_seat,
        score_deltas: deltas,
    }
}

/// Self-draw: a dealer winner collects a doubled share from every seat;
/// a non-dealer winner collects the doubled share from the dealer and a
/// single share from each other seat. A liability kind moves every
/// non-dealer payment onto the liable seat.
pub fn build_self_draw(
    config: &VariantConfig,
    kind: TransactionKind,
    hand: &HandScore,
    winner: Seat,
    liability_seat: Option<Seat>,
    dealer: Seat,
    bonus: u32,
) -> Transaction {
    let mut deltas = [0i32; SEATS];
    for seat in 0..SEATS as Seat {
        if seat == winner {
            continue;
        }
        let multiplier = if winner == dealer || seat == dealer { 2 } else { 1 };
        let share = hand_value::payment(config, hand, multiplier)
            + config.bonus_self_draw_unit * bonus as i32;
        let payer = match (kind, liability_seat) {
            (TransactionKind::SelfDrawLiability, Some(liable)) if seat != dealer => liable,
            _ => seat,
        };
        deltas[payer as usize] -= share;
        deltas[winner as usize] += share;
    }

    Transaction {
        kind,
        hand: Some(*hand),
        winner: Some(winner),
        loser: None,
        liability_seat,
        score_deltas: deltas,
    }
}

/// No-win settlement: the fixed pot moves from not-ready to ready seats
/// equally. 0 or 4 ready seats means no transfer.
pub fn build_no_win(config: &VariantConfig, ready_seats: &[Seat]) -> Transaction {
    let ready = ready_seats.len();
    let mut deltas = [0i32; SEATS];
    if ready > 0 && ready < SEATS && config.no_win_pot > 0 {
        let gain = config.no_win_pot / ready as i32;
        let cost = config.no_win_pot / (SEATS - ready) as i32;
        for (seat, delta) in deltas.iter_mut().enumerate() {
            *delta = if ready_seats.contains(&(seat as Seat)) {
                gain
            } else {
                -cost
            };
        }
    }

    Transaction {
        kind: TransactionKind::NoWinSettlement,
        hand: None,
        winner: None,
        loser: None,
        liability_seat: None,
        score_deltas: deltas,
    }
}

pub fn build_abortive_redraw() -> Transaction {
    Transaction {
        kind: TransactionKind::AbortiveRedraw,
        hand: None,
        winner: None,
        loser: None,
        liability_seat: None,
        score_deltas: [0; SEATS],
    }
}

/// Winning seat with minimal forward seating distance from the loser.
/// Callers guarantee a single loser; multi-loser batches are rejected
/// upstream before this runs.
pub fn head_bump_winner(loser: Seat, winners: &[Seat]) -> Option<Seat> {
    winners
        .iter()
        .copied()
        .min_by_key(|&winner| forward_distance(loser, winner))
}
