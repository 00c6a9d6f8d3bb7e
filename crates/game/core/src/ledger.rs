//! Bounded score ledger and terminal detection.

use crate::config::BattleConfig;
use crate::scheduler::ScoreDelta;
use crate::state::{Side, Tick};

/// Why a battle ended.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResolutionReason {
    /// The winner's score reached the maximum.
    ReachedMax,
    /// The loser's score reached the minimum.
    OpponentReachedMin,
}

/// Winner and reason detected by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terminal {
    pub winner: Side,
    pub reason: ResolutionReason,
}

/// Final outcome of a battle. Produced once, never mutated.
///
/// Reward amounts are not part of the result: the progression layer derives
/// them from the winner, its own streak counters, and `is_harder_rematch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub winner: Side,
    pub reason: ResolutionReason,
    pub is_harder_rematch: bool,
    pub resolved_at: Tick,
}

impl BattleResult {
    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}

/// Score movement of one side produced by a ledger update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreChange {
    pub side: Side,
    pub before: f64,
    pub after: f64,
}

/// Two scores clamped to `[SCORE_MIN, SCORE_MAX]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreLedger {
    player: f64,
    opponent: f64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self {
            player: BattleConfig::STARTING_SCORE,
            opponent: BattleConfig::STARTING_SCORE,
        }
    }

    /// Starts from explicit scores, clamped into range.
    pub fn with_scores(player: f64, opponent: f64) -> Self {
        Self {
            player: clamp_score(player),
            opponent: clamp_score(opponent),
        }
    }

    pub fn player(&self) -> f64 {
        self.player
    }

    pub fn opponent(&self) -> f64 {
        self.opponent
    }

    pub fn score(&self, side: Side) -> f64 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Applies one poll's batched delta, then clamps.
    ///
    /// Overflow is discarded rather than carried over. Returns one change per
    /// side whose score actually moved, player first.
    pub fn apply(&mut self, delta: &ScoreDelta) -> Vec<ScoreChange> {
        let mut changes = Vec::with_capacity(2);
        for side in Side::ALL {
            let before = self.score(side);
            let after = clamp_score(before + delta.get(side));
            if after != before {
                match side {
                    Side::Player => self.player = after,
                    Side::Opponent => self.opponent = after,
                }
                changes.push(ScoreChange {
                    side,
                    before,
                    after,
                });
            }
        }
        changes
    }

    /// Checks terminal conditions in fixed precedence:
    ///
    /// 1. player at max → player wins by reaching max
    /// 2. opponent at max → opponent wins by reaching max
    /// 3. player at min → opponent wins because player reached min
    /// 4. opponent at min → player wins because opponent reached min
    pub fn terminal(&self) -> Option<Terminal> {
        if self.player >= BattleConfig::SCORE_MAX {
            Some(Terminal {
                winner: Side::Player,
                reason: ResolutionReason::ReachedMax,
            })
        } else if self.opponent >= BattleConfig::SCORE_MAX {
            Some(Terminal {
                winner: Side::Opponent,
                reason: ResolutionReason::ReachedMax,
            })
        } else if self.player <= BattleConfig::SCORE_MIN {
            Some(Terminal {
                winner: Side::Opponent,
                reason: ResolutionReason::OpponentReachedMin,
            })
        } else if self.opponent <= BattleConfig::SCORE_MIN {
            Some(Terminal {
                winner: Side::Player,
                reason: ResolutionReason::OpponentReachedMin,
            })
        } else {
            None
        }
    }
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return BattleConfig::SCORE_MIN;
    }
    value.clamp(BattleConfig::SCORE_MIN, BattleConfig::SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(player: f64, opponent: f64) -> ScoreDelta {
        ScoreDelta { player, opponent }
    }

    #[test]
    fn starts_at_fifty_fifty() {
        let ledger = ScoreLedger::new();
        assert_eq!(ledger.player(), 50.0);
        assert_eq!(ledger.opponent(), 50.0);
        assert!(ledger.terminal().is_none());
    }

    #[test]
    fn overflow_clamps_without_carry() {
        let mut ledger = ScoreLedger::new();
        ledger.apply(&delta(80.0, -75.0));
        assert_eq!(ledger.player(), 100.0);
        assert_eq!(ledger.opponent(), 0.0);

        ledger.apply(&delta(-10.0, 10.0));
        assert_eq!(ledger.player(), 90.0);
        assert_eq!(ledger.opponent(), 10.0);
    }

    #[test]
    fn reports_only_sides_that_moved() {
        let mut ledger = ScoreLedger::with_scores(100.0, 40.0);
        let changes = ledger.apply(&delta(5.0, -2.5));
        assert_eq!(
            changes,
            vec![ScoreChange {
                side: Side::Opponent,
                before: 40.0,
                after: 37.5,
            }]
        );
    }

    #[test]
    fn simultaneous_thresholds_follow_precedence() {
        let ledger = ScoreLedger::with_scores(100.0, 0.0);
        assert_eq!(
            ledger.terminal(),
            Some(Terminal {
                winner: Side::Player,
                reason: ResolutionReason::ReachedMax,
            })
        );

        let ledger = ScoreLedger::with_scores(0.0, 100.0);
        assert_eq!(
            ledger.terminal(),
            Some(Terminal {
                winner: Side::Opponent,
                reason: ResolutionReason::ReachedMax,
            })
        );

        let ledger = ScoreLedger::with_scores(0.0, 0.0);
        assert_eq!(
            ledger.terminal(),
            Some(Terminal {
                winner: Side::Opponent,
                reason: ResolutionReason::OpponentReachedMin,
            })
        );

        let ledger = ScoreLedger::with_scores(30.0, 0.0);
        assert_eq!(
            ledger.terminal(),
            Some(Terminal {
                winner: Side::Player,
                reason: ResolutionReason::OpponentReachedMin,
            })
        );
    }

    #[test]
    fn construction_clamps_out_of_range_scores() {
        let ledger = ScoreLedger::with_scores(250.0, -4.0);
        assert_eq!(ledger.player(), 100.0);
        assert_eq!(ledger.opponent(), 0.0);
    }
}
