//! Variant dispatch: one behavioral interface, two sibling rule
//! implementations selected by a tag on the match. Scoring arithmetic
//! and termination differ; the settlement and progression contracts are
//! shared.

use serde::{Deserialize, Serialize};

use crate::domain::progression;
use crate::domain::rules::{self, EloParameters, VariantConfig};
use crate::domain::settlement::{self, RoundSubmission};
use crate::domain::state::{Match, Round, RoundPointer, Wind};
use crate::error::DomainError;

/// Behavior shared by both rule variants.
pub trait Ruleset {
    fn config(&self) -> &'static VariantConfig;

    fn elo_parameters(&self) -> &'static EloParameters;

    fn settle_round(&self, m: &Match, submission: &RoundSubmission) -> Result<Round, DomainError> {
        settlement::settle_round(self.config(), m, submission)
    }

    fn next_round_pointer(&self, m: &Match) -> RoundPointer {
        progression::derive_pointer(&m.rounds)
    }

    fn is_finished(&self, m: &Match) -> bool;
}

/// Japanese rules: East and South are the ranked winds, West is the
/// extension, and reaching North always ends the match.
pub struct RiichiRuleset;

impl Ruleset for RiichiRuleset {
    fn config(&self) -> &'static VariantConfig {
        &rules::RIICHI
    }

    fn elo_parameters(&self) -> &'static EloParameters {
        &rules::RIICHI_ELO
    }

    fn is_finished(&self, m: &Match) -> bool {
        let Some(last) = m.rounds.last() else {
            return false;
        };
        let totals = m.cumulative_totals();
        if progression::any_seat_busted(&totals) {
            return true;
        }
        if progression::advance(last).wind == Wind::North {
            return true;
        }
        // Early finish on the target threshold, at/after the final
        // ranked hand. A dealer repeat extends play either way.
        if let Some(target) = self.config().target_points {
            let past_final_ranked =
                (last.wind == Wind::South && last.hand == 4) || last.wind == Wind::West;
            if past_final_ranked
                && !progression::dealer_retains(last)
                && totals.iter().any(|total| *total >= target)
            {
                return true;
            }
        }
        false
    }
}

/// Hong Kong rules: a single East cycle, extended only by dealer repeats.
pub struct HongKongRuleset;

impl Ruleset for HongKongRuleset {
    fn config(&self) -> &'static VariantConfig {
        &rules::HONG_KONG
    }

    fn elo_parameters(&self) -> &'static EloParameters {
        &rules::HONG_KONG_ELO
    }

    fn is_finished(&self, m: &Match) -> bool {
        let Some(last) = m.rounds.last() else {
            return false;
        };
        if progression::any_seat_busted(&m.cumulative_totals()) {
            return true;
        }
        progression::advance(last).wind != Wind::East
    }
}

/// Persisted tag selecting the rule variant of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleVariant {
    Riichi,
    HongKong,
}

impl RuleVariant {
    pub fn ruleset(self) -> &'static dyn Ruleset {
        match self {
            RuleVariant::Riichi => &RiichiRuleset,
            RuleVariant::HongKong => &HongKongRuleset,
        }
    }

    pub fn config(self) -> &'static VariantConfig {
        self.ruleset().config()
    }
}
