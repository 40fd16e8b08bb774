//! Property tests for the settlement invariants: per-transaction zero
//! sums, round-level point conservation against the stake escrow, and
//! determinism of the whole pipeline.

use proptest::prelude::*;

use crate::domain::hand::HandScore;
use crate::domain::state::{RoundPointer, Seat};
use crate::domain::test_helpers::{deal_in, no_win, riichi_match, self_draw, submission};
use crate::settle_round;

fn riichi_hand() -> impl Strategy<Value = HandScore> {
    (1u8..=13, prop::sample::select(vec![30u8, 40, 50, 60, 70]))
        .prop_map(|(han, fu)| HandScore::Riichi { han, fu, dora: 0 })
}

proptest! {
    #[test]
    fn deal_in_settlement_conserves_points(
        loser in 0u8..4,
        offset in 1u8..4,
        hand in riichi_hand(),
        stake_seats in prop::sample::subsequence(vec![0u8, 1, 2, 3], 0..=3),
    ) {
        let winner = (loser + offset) % 4;
        let mut sub = submission(RoundPointer::initial(), vec![deal_in(winner, loser, hand)]);
        sub.declared_stake_seats = stake_seats;

        let round = settle_round(&riichi_match(), &sub).expect("deal-in should settle");

        // A win claims the pot in the same round.
        prop_assert_eq!(round.ending_stakes, 0);
        prop_assert_eq!(round.score_deltas.iter().sum::<i32>(), 0);
        for txn in &round.transactions {
            prop_assert_eq!(txn.score_deltas.iter().sum::<i32>(), 0);
        }
        prop_assert!(round.score_deltas[winner as usize] > 0);
    }

    #[test]
    fn double_win_settlement_conserves_points(
        loser in 0u8..4,
        offsets in prop::sample::select(vec![(1u8, 2u8), (1, 3), (2, 3)]),
        first in riichi_hand(),
        second in riichi_hand(),
        stake_seats in prop::sample::subsequence(vec![0u8, 1, 2, 3], 0..=3),
    ) {
        let winners = [(loser + offsets.0) % 4, (loser + offsets.1) % 4];
        let mut sub = submission(
            RoundPointer::initial(),
            vec![deal_in(winners[0], loser, first), deal_in(winners[1], loser, second)],
        );
        sub.declared_stake_seats = stake_seats;

        let round = settle_round(&riichi_match(), &sub).expect("double win should settle");

        prop_assert_eq!(round.ending_stakes, 0);
        prop_assert_eq!(round.score_deltas.iter().sum::<i32>(), 0);
        for txn in &round.transactions {
            prop_assert_eq!(txn.score_deltas.iter().sum::<i32>(), 0);
        }
    }

    #[test]
    fn self_draw_settlement_conserves_points(
        winner in 0u8..4,
        hand in riichi_hand(),
        stake_seats in prop::sample::subsequence(vec![0u8, 1, 2, 3], 0..=3),
    ) {
        let mut sub = submission(RoundPointer::initial(), vec![self_draw(winner, hand)]);
        sub.declared_stake_seats = stake_seats;

        let round = settle_round(&riichi_match(), &sub).expect("self-draw should settle");

        prop_assert_eq!(round.ending_stakes, 0);
        prop_assert_eq!(round.score_deltas.iter().sum::<i32>(), 0);
    }

    #[test]
    fn no_win_settlement_escrows_declared_stakes(
        ready in prop::sample::subsequence(vec![0u8, 1, 2, 3], 0..=4),
    ) {
        // Every other ready seat also stakes, which keeps the stake list
        // a subset of the ready list.
        let stakes: Vec<Seat> = ready.iter().copied().step_by(2).collect();
        let mut sub = submission(RoundPointer::initial(), vec![no_win()]);
        sub.declared_ready_seats = ready;
        sub.declared_stake_seats = stakes.clone();

        let round = settle_round(&riichi_match(), &sub).expect("no-win should settle");

        prop_assert_eq!(round.ending_stakes as usize, stakes.len());
        prop_assert_eq!(
            round.score_deltas.iter().sum::<i32>(),
            -1_000 * stakes.len() as i32
        );
    }

    #[test]
    fn settlement_is_deterministic(
        loser in 0u8..4,
        offset in 1u8..4,
        hand in riichi_hand(),
    ) {
        let winner = (loser + offset) % 4;
        let sub = submission(RoundPointer::initial(), vec![deal_in(winner, loser, hand)]);
        let m = riichi_match();

        let first = settle_round(&m, &sub).expect("deal-in should settle");
        let second = settle_round(&m, &sub).expect("deal-in should settle");
        prop_assert_eq!(&first, &second);

        // The committed round embeds the pointer it was settled against.
        prop_assert_eq!(first.pointer(), RoundPointer::initial());
    }
}
