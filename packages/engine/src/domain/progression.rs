//! Round progression: a pure fold over the committed round log.
//!
//! No mutable "current round" exists anywhere; replaying the log always
//! reproduces the pointer, so persistence and engine can never disagree.

use crate::domain::rules::SEATS;
use crate::domain::state::{Round, RoundPointer};
use crate::domain::transaction::TransactionKind;

/// Whether the dealer keeps the deal after this round: the dealer is a
/// net-positive winner, the round aborted, or the dealer was declared
/// ready on a no-win settlement.
pub fn dealer_retains(round: &Round) -> bool {
    let dealer = round.pointer().dealer();
    if round
        .transactions
        .iter()
        .any(|t| t.kind == TransactionKind::AbortiveRedraw)
    {
        return true;
    }
    if round
        .transactions
        .iter()
        .any(|t| t.kind == TransactionKind::NoWinSettlement)
    {
        return round.declared_ready_seats.contains(&dealer);
    }
    round.transactions.iter().any(|t| t.winner == Some(dealer))
        && round.score_deltas[dealer as usize] > 0
}

/// Pointer of the round that follows `round`. Pure: the same settled
/// round always yields the same next pointer.
pub fn advance(round: &Round) -> RoundPointer {
    let pointer = round.pointer();
    if dealer_retains(round) {
        return RoundPointer {
            bonus: pointer.bonus + 1,
            stakes: round.ending_stakes,
            ..pointer
        };
    }
    let (wind, hand) = if pointer.hand == SEATS as u8 {
        (pointer.wind.next(), 1)
    } else {
        (pointer.wind, pointer.hand + 1)
    };
    RoundPointer {
        wind,
        hand,
        bonus: 0,
        stakes: round.ending_stakes,
    }
}

/// Derive the current pointer from the committed log. Every committed
/// round embeds the pointer it was settled against, so the fold reduces
/// to advancing past the latest round.
pub fn derive_pointer(rounds: &[Round]) -> RoundPointer {
    rounds.last().map(advance).unwrap_or_else(RoundPointer::initial)
}

/// Any seat's cumulative total below zero ends the match in both variants.
pub fn any_seat_busted(totals: &[i32; SEATS]) -> bool {
    totals.iter().any(|total| *total < 0)
}
