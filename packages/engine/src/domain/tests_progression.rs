use crate::domain::progression::{advance, dealer_retains, derive_pointer};
use crate::domain::rules::RIICHI;
use crate::domain::state::{forward_distance, RoundPointer, Wind};
use crate::domain::test_helpers::{
    fabricated_deal_in_txn, fabricated_round, hong_kong_match, riichi_match,
};
use crate::domain::transaction::{build_abortive_redraw, build_no_win};
use crate::is_match_finished;

#[test]
fn winds_rotate_and_saturate_at_north() {
    assert_eq!(Wind::East.next(), Wind::South);
    assert_eq!(Wind::South.next(), Wind::West);
    assert_eq!(Wind::West.next(), Wind::North);
    assert_eq!(Wind::North.next(), Wind::North);
}

#[test]
fn pointer_dealer_and_display() {
    let pointer = RoundPointer { wind: Wind::South, hand: 3, bonus: 2, stakes: 1 };
    assert_eq!(pointer.dealer(), 2);
    assert_eq!(pointer.to_string(), "S3+2");
    assert_eq!(RoundPointer::initial().to_string(), "E1+0");
}

#[test]
fn seat_winds_follow_the_dealer() {
    let pointer = RoundPointer { wind: Wind::East, hand: 2, bonus: 0, stakes: 0 };
    assert_eq!(pointer.seat_wind(1), Wind::East);
    assert_eq!(pointer.seat_wind(2), Wind::South);
    assert_eq!(pointer.seat_wind(3), Wind::West);
    assert_eq!(pointer.seat_wind(0), Wind::North);
}

#[test]
fn forward_distance_wraps() {
    assert_eq!(forward_distance(0, 0), 0);
    assert_eq!(forward_distance(0, 3), 3);
    assert_eq!(forward_distance(3, 0), 1);
    assert_eq!(forward_distance(2, 1), 3);
}

#[test]
fn non_dealer_win_advances_the_hand_and_clears_the_bonus() {
    // Dealer of E2 is seat 1; seat 0 wins.
    let round = fabricated_round(
        Wind::East,
        2,
        3,
        vec![fabricated_deal_in_txn(0, 1, [1_000, -1_000, 0, 0])],
        [1_000, -1_000, 0, 0],
    );
    assert!(!dealer_retains(&round));
    let next = advance(&round);
    assert_eq!((next.wind, next.hand, next.bonus), (Wind::East, 3, 0));
}

#[test]
fn fourth_hand_wraps_to_the_next_wind() {
    let round = fabricated_round(
        Wind::East,
        4,
        0,
        vec![fabricated_deal_in_txn(0, 3, [1_000, 0, 0, -1_000])],
        [1_000, 0, 0, -1_000],
    );
    let next = advance(&round);
    assert_eq!((next.wind, next.hand), (Wind::South, 1));
}

#[test]
fn net_positive_dealer_win_retains_the_deal() {
    let round = fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(0, 2, [1_500, 0, -1_500, 0])],
        [1_500, 0, -1_500, 0],
    );
    assert!(dealer_retains(&round));
    let next = advance(&round);
    assert_eq!((next.wind, next.hand, next.bonus), (Wind::East, 1, 1));
}

#[test]
fn dealer_win_erased_by_a_stake_does_not_retain() {
    // The dealer won 1000 but staked 1000 in the same round: net zero.
    let round = fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(0, 2, [1_000, 0, -1_000, 0])],
        [0, 0, -1_000, 0],
    );
    assert!(!dealer_retains(&round));
    assert_eq!(advance(&round).hand, 2);
}

#[test]
fn abortive_redraw_always_retains() {
    let round = fabricated_round(Wind::South, 2, 1, vec![build_abortive_redraw()], [0; 4]);
    assert!(dealer_retains(&round));
    assert_eq!(advance(&round).bonus, 2);
}

#[test]
fn no_win_retains_only_when_the_dealer_was_ready() {
    // Dealer of E3 is seat 2.
    let ready = vec![2, 3];
    let mut round = fabricated_round(
        Wind::East,
        3,
        0,
        vec![build_no_win(&RIICHI, &ready)],
        [-1_500, -1_500, 1_500, 1_500],
    );
    round.declared_ready_seats = ready;
    assert!(dealer_retains(&round));

    round.declared_ready_seats = vec![0, 3];
    round.transactions = vec![build_no_win(&RIICHI, &[0, 3])];
    assert!(!dealer_retains(&round));
    assert_eq!(advance(&round).hand, 4);
}

#[test]
fn carried_stakes_survive_both_advance_paths() {
    let mut round = fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(1, 2, [0, 1_000, -1_000, 0])],
        [0, 1_000, -1_000, 0],
    );
    round.starting_stakes = 2;
    round.ending_stakes = 2;
    assert_eq!(advance(&round).stakes, 2);

    round.transactions = vec![fabricated_deal_in_txn(0, 2, [1_500, 0, -1_500, 0])];
    round.score_deltas = [1_500, 0, -1_500, 0];
    assert_eq!(advance(&round).stakes, 2);
}

#[test]
fn derived_pointer_replays_the_log() {
    assert_eq!(derive_pointer(&[]), RoundPointer::initial());

    let round = fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(2, 0, [-1_000, 0, 1_000, 0])],
        [-1_000, 0, 1_000, 0],
    );
    let log = vec![round.clone()];
    assert_eq!(derive_pointer(&log), advance(&round));
    // Advancing is pure; replaying again yields the same pointer.
    assert_eq!(derive_pointer(&log), derive_pointer(&log));
}

#[test]
fn fresh_matches_are_not_finished() {
    assert!(!is_match_finished(&riichi_match()));
    assert!(!is_match_finished(&hong_kong_match()));
}

#[test]
fn japanese_match_ends_when_a_seat_goes_below_zero() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(0, 2, [26_000, 0, -26_000, 0])],
        [26_000, 0, -26_000, 0],
    ));
    assert!(is_match_finished(&m));
}

#[test]
fn japanese_match_ends_when_the_pointer_reaches_north() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::West,
        4,
        0,
        vec![fabricated_deal_in_txn(0, 3, [1_000, 0, 0, -1_000])],
        [1_000, 0, 0, -1_000],
    ));
    assert!(is_match_finished(&m));
}

#[test]
fn japanese_target_ends_the_match_at_the_final_ranked_hand() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::South,
        4,
        0,
        vec![fabricated_deal_in_txn(0, 1, [6_000, -2_000, -2_000, -2_000])],
        [6_000, -2_000, -2_000, -2_000],
    ));
    assert!(is_match_finished(&m));
}

#[test]
fn japanese_target_is_ignored_before_the_final_ranked_hand() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::East,
        4,
        0,
        vec![fabricated_deal_in_txn(0, 1, [6_000, -2_000, -2_000, -2_000])],
        [6_000, -2_000, -2_000, -2_000],
    ));
    assert!(!is_match_finished(&m));
}

#[test]
fn japanese_target_also_ends_extension_hands() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::West,
        2,
        0,
        vec![fabricated_deal_in_txn(0, 1, [6_000, -2_000, -2_000, -2_000])],
        [6_000, -2_000, -2_000, -2_000],
    ));
    assert!(is_match_finished(&m));
}

#[test]
fn japanese_dealer_repeat_extends_past_the_target() {
    // Dealer of S4 is seat 3; a retained deal keeps the match alive.
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::South,
        4,
        0,
        vec![fabricated_deal_in_txn(3, 1, [-2_000, -2_000, -2_000, 6_000])],
        [-2_000, -2_000, -2_000, 6_000],
    ));
    assert!(!is_match_finished(&m));
}

#[test]
fn japanese_extension_continues_below_the_target() {
    let mut m = riichi_match();
    m.rounds.push(fabricated_round(
        Wind::West,
        1,
        0,
        vec![fabricated_deal_in_txn(1, 0, [-1_000, 1_000, 0, 0])],
        [-1_000, 1_000, 0, 0],
    ));
    assert!(!is_match_finished(&m));
}

#[test]
fn hong_kong_match_runs_a_single_east_cycle() {
    let mut m = hong_kong_match();
    m.rounds.push(fabricated_round(
        Wind::East,
        2,
        0,
        vec![fabricated_deal_in_txn(0, 2, [48, 0, -48, 0])],
        [48, 0, -48, 0],
    ));
    assert!(!is_match_finished(&m));

    m.rounds.push(fabricated_round(
        Wind::East,
        4,
        0,
        vec![fabricated_deal_in_txn(0, 2, [48, 0, -48, 0])],
        [48, 0, -48, 0],
    ));
    assert!(is_match_finished(&m));
}

#[test]
fn hong_kong_dealer_repeat_extends_the_last_hand() {
    let mut m = hong_kong_match();
    m.rounds.push(fabricated_round(
        Wind::East,
        4,
        0,
        vec![fabricated_deal_in_txn(3, 1, [0, -96, 0, 96])],
        [0, -96, 0, 96],
    ));
    assert!(!is_match_finished(&m));
}

#[test]
fn hong_kong_match_ends_when_a_seat_goes_below_zero() {
    let mut m = hong_kong_match();
    m.rounds.push(fabricated_round(
        Wind::East,
        1,
        0,
        vec![fabricated_deal_in_txn(0, 2, [600, 0, -600, 0])],
        [600, 0, -600, 0],
    ));
    assert!(is_match_finished(&m));
}
