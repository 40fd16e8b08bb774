//! Hand grades and their structural validation.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Graded value of a winning hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandScore {
    /// Japanese grading: rank (han), fu, and the dora counted inside
    /// the rank. A rank of 0 models the submitting UI's "unset".
    Riichi { han: u8, fu: u8, dora: u8 },
    /// Hong Kong grading: a single point grade.
    HongKong { faan: u8 },
}

const VALID_FU: [u8; 11] = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

/// Largest Hong Kong grade: the limit hand. Also keeps the doubling in
/// `hand_value` inside i32 range.
const MAX_FAAN: u8 = 13;

impl HandScore {
    /// Reject structurally impossible grade combinations.
    ///
    /// `self_draw` matters only for the 25-fu minimum: a 25-fu hand
    /// needs two ranks above its dora on a deal-in and three on a
    /// self-draw.
    pub fn validate(&self, self_draw: bool) -> Result<(), DomainError> {
        match *self {
            HandScore::Riichi { han, fu, dora } => {
                if han == 0 {
                    return Err(DomainError::invalid_hand("rank is unset"));
                }
                if !VALID_FU.contains(&fu) {
                    return Err(DomainError::invalid_hand(format!("{fu} fu is not a legal fu count")));
                }
                if dora >= han {
                    return Err(DomainError::invalid_hand(format!(
                        "dora ({dora}) must be counted below the rank ({han})"
                    )));
                }
                if fu == 20 && han == 1 {
                    return Err(DomainError::invalid_hand("20 fu is impossible at rank 1"));
                }
                if fu == 25 {
                    let min = dora + if self_draw { 3 } else { 2 };
                    if han < min {
                        return Err(DomainError::invalid_hand(format!(
                            "25 fu requires rank >= {min} here, got {han}"
                        )));
                    }
                }
                Ok(())
            }
            HandScore::HongKong { faan } => {
                if faan < 3 {
                    return Err(DomainError::invalid_hand(format!(
                        "grade must be at least 3, got {faan}"
                    )));
                }
                if faan > MAX_FAAN {
                    return Err(DomainError::invalid_hand(format!(
                        "grade must be at most {MAX_FAAN}, got {faan}"
                    )));
                }
                Ok(())
            }
        }
    }
}
