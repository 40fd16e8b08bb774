//! Round settlement: validates a candidate submission against the
//! match's derived pointer, classifies its beneficiary family, and
//! folds transactions, stake debits and the pot credit into one
//! committed [`Round`]. A submission commits wholly or not at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::hand::HandScore;
use crate::domain::progression;
use crate::domain::rules::{VariantConfig, SEATS};
use crate::domain::state::{Match, MatchStatus, Round, RoundPointer, Seat};
use crate::domain::transaction::{self, Transaction, TransactionKind};
use crate::error::DomainError;

/// One transaction of a candidate round submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub hand: Option<HandScore>,
    pub winner: Option<Seat>,
    pub loser: Option<Seat>,
    pub liability_seat: Option<Seat>,
}

/// A candidate round, as supplied by an already-authenticated caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSubmission {
    /// Pointer the submission believes it is settling.
    pub pointer: RoundPointer,
    pub transactions: Vec<TransactionInput>,
    /// Seats committing a stake this round (Japanese only).
    pub declared_stake_seats: Vec<Seat>,
    /// Seats declared ready; meaningful on no-win settlements only.
    pub declared_ready_seats: Vec<Seat>,
}

struct DealInWin {
    kind: TransactionKind,
    hand: HandScore,
    winner: Seat,
    liability_seat: Option<Seat>,
}

enum Plan {
    DealIn { loser: Seat, wins: Vec<DealInWin> },
    SelfDraw(DealInWin),
    NoWin,
    Abortive,
}

/// Validate and settle one submission. The returned round is not
/// appended to the match; the caller persists it.
pub fn settle_round(
    config: &VariantConfig,
    m: &Match,
    submission: &RoundSubmission,
) -> Result<Round, DomainError> {
    if m.status != MatchStatus::InProgress {
        return Err(DomainError::validation("match is not in progress"));
    }

    let current = progression::derive_pointer(&m.rounds);
    if submission.pointer != current {
        return Err(DomainError::StaleSubmission {
            expected: current,
            submitted: submission.pointer,
        });
    }

    validate_seat_lists(config, submission)?;
    let plan = classify(submission)?;

    let dealer = current.dealer();
    let bonus = current.bonus;
    let mut transactions: Vec<Transaction> = Vec::with_capacity(submission.transactions.len());

    // Seat the pot (and the bonus surcharge) goes to, when someone won.
    let pot_winner = match &plan {
        Plan::DealIn { loser, wins } => {
            let winners: Vec<Seat> = wins.iter().map(|w| w.winner).collect();
            let bearer = transaction::head_bump_winner(*loser, &winners);
            for win in wins {
                let win_bonus = if bearer == Some(win.winner) { bonus } else { 0 };
                transactions.push(transaction::build_deal_in(
                    config,
                    win.kind,
                    &win.hand,
                    win.winner,
                    *loser,
                    win.liability_seat,
                    dealer,
                    win_bonus,
                ));
            }
            bearer
        }
        Plan::SelfDraw(win) => {
            transactions.push(transaction::build_self_draw(
                config,
                win.kind,
                &win.hand,
                win.winner,
                win.liability_seat,
                dealer,
                bonus,
            ));
            Some(win.winner)
        }
        Plan::NoWin => {
            transactions.push(transaction::build_no_win(
                config,
                &submission.declared_ready_seats,
            ));
            None
        }
        Plan::Abortive => {
            transactions.push(transaction::build_abortive_redraw());
            None
        }
    };

    let mut deltas = [0i32; SEATS];
    for txn in &transactions {
        debug_assert_eq!(txn.score_deltas.iter().sum::<i32>(), 0);
        for (seat, delta) in txn.score_deltas.iter().enumerate() {
            deltas[seat] += delta;
        }
    }
    for &seat in &submission.declared_stake_seats {
        deltas[seat as usize] -= config.stake_unit;
    }

    let declared = submission.declared_stake_seats.len() as u32;
    let ending_stakes = match pot_winner {
        Some(winner) => {
            let pot = (current.stakes + declared) as i32 * config.stake_unit;
            deltas[winner as usize] += pot;
            0
        }
        None => current.stakes + declared,
    };

    debug_assert_eq!(
        deltas.iter().sum::<i32>(),
        -config.stake_unit * (ending_stakes as i32 - current.stakes as i32)
    );

    debug!(pointer = %current, ending_stakes, "round settled");

    Ok(Round {
        wind: current.wind,
        hand: current.hand,
        bonus: current.bonus,
        starting_stakes: current.stakes,
        ending_stakes,
        declared_stake_seats: submission.declared_stake_seats.clone(),
        declared_ready_seats: submission.declared_ready_seats.clone(),
        transactions,
        score_deltas: deltas,
    })
}

fn validate_seat_lists(
    config: &VariantConfig,
    submission: &RoundSubmission,
) -> Result<(), DomainError> {
    for list in [
        &submission.declared_stake_seats,
        &submission.declared_ready_seats,
    ] {
        for &seat in list.iter() {
            if seat as usize >= SEATS {
                return Err(DomainError::validation(format!("seat {seat} out of range")));
            }
        }
        for (i, &seat) in list.iter().enumerate() {
            if list[..i].contains(&seat) {
                return Err(DomainError::validation(format!("seat {seat} declared twice")));
            }
        }
    }
    if config.stake_unit == 0 && !submission.declared_stake_seats.is_empty() {
        return Err(DomainError::invalid_role(
            "stake declarations are not part of this variant",
        ));
    }
    for txn in &submission.transactions {
        for seat in [txn.winner, txn.loser, txn.liability_seat].into_iter().flatten() {
            if seat as usize >= SEATS {
                return Err(DomainError::validation(format!("seat {seat} out of range")));
            }
        }
    }
    Ok(())
}

/// Enforce exactly one beneficiary family per round and return the
/// settlement plan for it.
fn classify(submission: &RoundSubmission) -> Result<Plan, DomainError> {
    let txns = &submission.transactions;
    if txns.is_empty() {
        return Err(DomainError::inconsistent_batch("empty transaction list"));
    }

    let deal_ins = txns.iter().filter(|t| t.kind.is_deal_in()).count();
    let self_draws = txns.iter().filter(|t| t.kind.is_self_draw()).count();
    let no_wins = txns
        .iter()
        .filter(|t| t.kind == TransactionKind::NoWinSettlement)
        .count();
    let abortives = txns
        .iter()
        .filter(|t| t.kind == TransactionKind::AbortiveRedraw)
        .count();

    if deal_ins == txns.len() {
        return plan_deal_in(submission);
    }
    if self_draws == 1 && txns.len() == 1 {
        return plan_self_draw(submission, txns[0]);
    }
    if no_wins == 1 && txns.len() == 1 {
        return plan_no_win(submission, txns[0]);
    }
    if abortives == 1 && txns.len() == 1 {
        return plan_abortive(submission, txns[0]);
    }
    if self_draws > 1 || no_wins > 1 || abortives > 1 {
        return Err(DomainError::inconsistent_batch(
            "self-draw and no-win families permit a single transaction",
        ));
    }
    Err(DomainError::inconsistent_batch(
        "mixed beneficiary families in one round",
    ))
}

fn plan_deal_in(submission: &RoundSubmission) -> Result<Plan, DomainError> {
    if !submission.declared_ready_seats.is_empty() {
        return Err(DomainError::invalid_role(
            "ready declarations apply to no-win settlements only",
        ));
    }

    let mut shared_loser: Option<Seat> = None;
    let mut wins: Vec<DealInWin> = Vec::with_capacity(submission.transactions.len());
    for txn in &submission.transactions {
        let (winner, loser) = match (txn.winner, txn.loser) {
            (Some(winner), Some(loser)) => {
                if winner == loser {
                    return Err(DomainError::invalid_role("winner and loser are the same seat"));
                }
                (winner, loser)
            }
            _ => return Err(DomainError::invalid_role("deal-in requires a winner and a loser")),
        };
        match shared_loser {
            None => shared_loser = Some(loser),
            Some(existing) if existing != loser => {
                return Err(DomainError::inconsistent_batch(
                    "multiple losers where one shared loser is required",
                ))
            }
            Some(_) => {}
        }
        if wins.iter().any(|w| w.winner == winner) {
            return Err(DomainError::invalid_role(format!(
                "seat {winner} wins twice in one round"
            )));
        }
        let hand = require_hand(txn, false)?;
        let liability_seat = require_liability(txn, winner)?;
        wins.push(DealInWin {
            kind: txn.kind,
            hand,
            winner,
            liability_seat,
        });
    }

    // shared_loser is Some here: classify rejects empty batches.
    match shared_loser {
        Some(loser) => Ok(Plan::DealIn { loser, wins }),
        None => Err(DomainError::inconsistent_batch("empty transaction list")),
    }
}

fn plan_self_draw(submission: &RoundSubmission, txn: TransactionInput) -> Result<Plan, DomainError> {
    if !submission.declared_ready_seats.is_empty() {
        return Err(DomainError::invalid_role(
            "ready declarations apply to no-win settlements only",
        ));
    }
    let winner = txn
        .winner
        .ok_or_else(|| DomainError::invalid_role("self-draw requires a winner"))?;
    if txn.loser.is_some() {
        return Err(DomainError::invalid_role("self-draw has no single loser"));
    }
    let hand = require_hand(&txn, true)?;
    let liability_seat = require_liability(&txn, winner)?;
    Ok(Plan::SelfDraw(DealInWin {
        kind: txn.kind,
        hand,
        winner,
        liability_seat,
    }))
}

fn plan_no_win(submission: &RoundSubmission, txn: TransactionInput) -> Result<Plan, DomainError> {
    if txn.winner.is_some() || txn.loser.is_some() || txn.liability_seat.is_some() {
        return Err(DomainError::invalid_role("no-win settlement names no seats"));
    }
    if txn.hand.is_some() {
        return Err(DomainError::invalid_role("no-win settlement carries no hand"));
    }
    for &seat in &submission.declared_stake_seats {
        if !submission.declared_ready_seats.contains(&seat) {
            return Err(DomainError::invalid_role(format!(
                "seat {seat} declared a stake without being declared ready"
            )));
        }
    }
    Ok(Plan::NoWin)
}

fn plan_abortive(submission: &RoundSubmission, txn: TransactionInput) -> Result<Plan, DomainError> {
    if txn.winner.is_some() || txn.loser.is_some() || txn.liability_seat.is_some() {
        return Err(DomainError::invalid_role("abortive redraw names no seats"));
    }
    if txn.hand.is_some() {
        return Err(DomainError::invalid_role("abortive redraw carries no hand"));
    }
    if !submission.declared_ready_seats.is_empty() {
        return Err(DomainError::invalid_role(
            "ready declarations apply to no-win settlements only",
        ));
    }
    Ok(Plan::Abortive)
}

fn require_hand(txn: &TransactionInput, self_draw: bool) -> Result<HandScore, DomainError> {
    let hand = txn
        .hand
        .ok_or_else(|| DomainError::invalid_hand("scoring transaction is missing its hand"))?;
    hand.validate(self_draw)?;
    Ok(hand)
}

fn require_liability(txn: &TransactionInput, winner: Seat) -> Result<Option<Seat>, DomainError> {
    if txn.kind.has_liability() {
        match txn.liability_seat {
            Some(liable) if liable == winner => Err(DomainError::invalid_role(
                "liability seat cannot be the winner",
            )),
            Some(liable) => Ok(Some(liable)),
            None => Err(DomainError::invalid_role(
                "liability kind requires a liable seat",
            )),
        }
    } else if txn.liability_seat.is_some() {
        Err(DomainError::invalid_role(
            "liability seat on a non-liability kind",
        ))
    } else {
        Ok(None)
    }
}
