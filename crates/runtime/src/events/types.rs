//! Event types for different topics.

use battle_core::{BattleLogEntry, BattleResult, BattleSpeed, Epoch, FightContext, Tick};
use serde::{Deserialize, Serialize};

/// Live battle progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// A battle entered `Running`.
    Started {
        epoch: Epoch,
        speed: BattleSpeed,
        fight: FightContext,
        player_instances: usize,
        opponent_instances: usize,
    },

    /// Log entries appended since the previous event, in log order.
    Advanced {
        epoch: Epoch,
        now: Tick,
        player_score: f64,
        opponent_score: f64,
        entries: Vec<BattleLogEntry>,
    },
}

/// Lifecycle transitions out of `Running` and back to `Idle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    /// The battle reached a terminal score.
    Resolved { epoch: Epoch, result: BattleResult },

    /// The battle was stopped before resolving.
    Stopped { epoch: Epoch },

    /// A resolved battle was discarded.
    Reset,

    /// A resolved battle was discarded and the next start is a rematch.
    RematchQueued { harder: bool },
}
