//! Constant tables for the two rule variants.
//!
//! Every number the settlement and rating paths depend on lives here so
//! the arithmetic modules stay table-driven. A miss against these
//! tables is a configuration bug, never a recoverable runtime error.

pub const SEATS: usize = 4;

/// Deal-in multiplier for a dealer winner, both variants.
pub const DEALER_DEAL_IN_MULTIPLIER: i32 = 6;

/// Rating every player is seeded with.
pub const BASE_RATING: f64 = 1500.0;

/// Scoring and progression constants for one rule variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantConfig {
    /// Points each seat holds at match start.
    pub start_points: i32,
    /// Score a seat must reach for an early finish (Japanese only).
    pub target_points: Option<i32>,
    /// Value of one declared stake. 0 disables stake declarations.
    pub stake_unit: i32,
    /// Total pot exchanged between ready and non-ready seats on a
    /// no-win settlement.
    pub no_win_pot: i32,
    /// Bonus-counter surcharge added to the deal-in payment, per counter.
    pub bonus_deal_in_unit: i32,
    /// Bonus-counter surcharge added to each self-draw payment, per counter.
    pub bonus_self_draw_unit: i32,
    /// Payments round up to a multiple of this.
    pub payment_step: i32,
    /// Deal-in multiplier for a non-dealer winner.
    pub deal_in_multiplier: i32,
}

pub const RIICHI: VariantConfig = VariantConfig {
    start_points: 25_000,
    target_points: Some(30_000),
    stake_unit: 1_000,
    no_win_pot: 3_000,
    bonus_deal_in_unit: 300,
    bonus_self_draw_unit: 100,
    payment_step: 100,
    deal_in_multiplier: 4,
};

pub const HONG_KONG: VariantConfig = VariantConfig {
    start_points: 500,
    target_points: None,
    stake_unit: 0,
    no_win_pot: 0,
    // The counter is tracked for progression but carries no surcharge.
    bonus_deal_in_unit: 0,
    bonus_self_draw_unit: 0,
    payment_step: 1,
    deal_in_multiplier: 3,
};

/// Constants of the placement-adjusted, mean-reverting rating formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloParameters {
    pub magnitude: f64,
    pub divisor: f64,
    pub sensitivity: f64,
    /// Added to the final score by placement rank (best first). Applied
    /// to raw final scores, which sum to the table total rather than
    /// zero, so per-match rating deltas are deliberately non-conserving.
    pub placement_adjust: [i32; SEATS],
}

pub const RIICHI_ELO: EloParameters = EloParameters {
    magnitude: 0.05,
    divisor: 1_000.0,
    sensitivity: 0.5,
    placement_adjust: [15_000, 5_000, -5_000, -15_000],
};

pub const HONG_KONG_ELO: EloParameters = EloParameters {
    magnitude: 0.05,
    divisor: 10.0,
    sensitivity: 0.5,
    placement_adjust: [150, 50, -50, -150],
};
