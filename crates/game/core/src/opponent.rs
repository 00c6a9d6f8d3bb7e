//! Opponent generation seam.
//!
//! The resolver does not decide who it fights. A generator collaborator turns
//! the fight context into an opponent roster plus a difficulty multiplier,
//! and is asked again on every battle start so rematches get a fresh roster.

use crate::state::Roster;

/// Progression inputs that parameterise opponent generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightContext {
    /// 1-based fight number within the current loop.
    pub fight_number: u32,
    /// Completed game-plus loops.
    pub game_plus: u32,
    pub harder_rematch: bool,
}

impl FightContext {
    pub const fn new(fight_number: u32, game_plus: u32) -> Self {
        Self {
            fight_number,
            game_plus,
            harder_rematch: false,
        }
    }

    #[must_use]
    pub const fn harder(mut self, harder_rematch: bool) -> Self {
        self.harder_rematch = harder_rematch;
        self
    }
}

impl Default for FightContext {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Roster and difficulty scalar for the opponent side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentSetup {
    pub roster: Roster,
    pub difficulty: f64,
}

impl OpponentSetup {
    pub fn new(roster: Roster, difficulty: f64) -> Self {
        Self { roster, difficulty }
    }

    /// An opponent with no items.
    pub fn empty() -> Self {
        Self::new(Roster::default(), 1.0)
    }

    /// Difficulty must be a positive, finite scalar.
    pub fn has_valid_difficulty(&self) -> bool {
        self.difficulty.is_finite() && self.difficulty > 0.0
    }
}

/// Produces the opponent for a fight.
pub trait OpponentGenerator: Send + Sync {
    fn generate(&self, fight: &FightContext) -> OpponentSetup;
}

/// Difficulty curve shared by generators.
///
/// ```text
/// multiplier = base + per_fight × (fight_number − 1) + per_loop × game_plus
///              × harder_rematch_factor   (harder rematches only)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DifficultyCurve {
    pub base: f64,
    pub per_fight: f64,
    pub per_loop: f64,
    pub harder_rematch_factor: f64,
}

impl DifficultyCurve {
    pub fn multiplier(&self, fight: &FightContext) -> f64 {
        let fights = f64::from(fight.fight_number.saturating_sub(1));
        let loops = f64::from(fight.game_plus);
        let scaled = self.base + self.per_fight * fights + self.per_loop * loops;
        if fight.harder_rematch {
            scaled * self.harder_rematch_factor
        } else {
            scaled
        }
    }
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base: 1.0,
            per_fight: 0.1,
            per_loop: 0.5,
            harder_rematch_factor: 1.25,
        }
    }
}

/// Always returns the same opponent. Difficulty follows the setup verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedOpponent {
    setup: OpponentSetup,
}

impl FixedOpponent {
    pub fn new(setup: OpponentSetup) -> Self {
        Self { setup }
    }

    pub fn empty() -> Self {
        Self::new(OpponentSetup::empty())
    }
}

impl OpponentGenerator for FixedOpponent {
    fn generate(&self, _fight: &FightContext) -> OpponentSetup {
        self.setup.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn curve_scales_with_fight_and_loop() {
        let curve = DifficultyCurve::default();
        assert!(approx(curve.multiplier(&FightContext::new(1, 0)), 1.0));
        assert!(approx(curve.multiplier(&FightContext::new(4, 0)), 1.3));
        assert!(approx(curve.multiplier(&FightContext::new(1, 2)), 2.0));
        assert!(approx(
            curve.multiplier(&FightContext::new(1, 0).harder(true)),
            1.25
        ));
    }

    #[test]
    fn fight_zero_is_treated_as_first_fight() {
        let curve = DifficultyCurve::default();
        assert!(approx(curve.multiplier(&FightContext::new(0, 0)), 1.0));
    }

    #[test]
    fn difficulty_validation() {
        assert!(OpponentSetup::empty().has_valid_difficulty());
        assert!(!OpponentSetup::new(Roster::default(), 0.0).has_valid_difficulty());
        assert!(!OpponentSetup::new(Roster::default(), f64::INFINITY).has_valid_difficulty());
    }
}
