//! Hand grade to payment amount, under the role-multiplier scheme.
//!
//! Hands reaching this module have passed `HandScore::validate`.

use crate::domain::hand::HandScore;
use crate::domain::rules::VariantConfig;

/// Flat base points for Japanese rank 5 and above. Plateaus at 5, 6-7,
/// 8-10, 11-12, then multiples of 8000 stepping at 13, 26, 39, 52, 65.
fn riichi_flat_base(han: u8) -> i32 {
    match han {
        5 => 2_000,
        6 | 7 => 3_000,
        8..=10 => 4_000,
        11 | 12 => 6_000,
        _ => 8_000 * (han as i32 / 13),
    }
}

/// Japanese base points before the role multiplier. Below rank 5 the
/// fu-derived value caps at the rank-5 flat value.
fn riichi_base_points(han: u8, fu: u8) -> i32 {
    if han >= 5 {
        riichi_flat_base(han)
    } else {
        let raw = fu as i32 * (1 << (2 + han as u32));
        raw.min(2_000)
    }
}

/// Hong Kong points per multiplier unit: doubles every two grades; odd
/// grades take the grade below scaled by 3/2.
fn hong_kong_points(faan: u8) -> i32 {
    if faan % 2 == 0 {
        1 << (faan as u32 / 2 + 2)
    } else {
        hong_kong_points(faan - 1) * 3 / 2
    }
}

fn ceil_to(amount: i32, step: i32) -> i32 {
    (amount + step - 1) / step * step
}

/// Payment for one role multiplier (1, 2, 3, 4 or 6), rounded up to the
/// variant's payment step.
pub fn payment(config: &VariantConfig, hand: &HandScore, multiplier: i32) -> i32 {
    let base = match *hand {
        HandScore::Riichi { han, fu, .. } => riichi_base_points(han, fu),
        HandScore::HongKong { faan } => hong_kong_points(faan),
    };
    ceil_to(base * multiplier, config.payment_step)
}
