//! Append-only battle log.
//!
//! Every start, activation, score change and resolution is recorded in the
//! order it happened. The log is frozen when the battle resolves and can be
//! hashed into a digest to compare runs.

use sha2::{Digest, Sha256};

use crate::config::BattleSpeed;
use crate::ledger::{ResolutionReason, ScoreChange};
use crate::scheduler::Activation;
use crate::state::{ItemId, Side, Tick};

/// Discriminant of a log entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    Start,
    Activation,
    ScoreChange,
    End,
}

/// Kind-specific data of a log entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogPayload {
    Start {
        speed: BattleSpeed,
        player_instances: usize,
        opponent_instances: usize,
        is_harder_rematch: bool,
    },
    Activation {
        owner: Side,
        slot_index: usize,
        item_id: ItemId,
        magnitude: f64,
        target: Side,
        /// Tick the activation was due at; earlier than the entry's
        /// timestamp when the instance caught up within a poll.
        scheduled_at: Tick,
    },
    ScoreChange {
        side: Side,
        before: f64,
        after: f64,
    },
    End {
        winner: Side,
        reason: ResolutionReason,
        player_score: f64,
        opponent_score: f64,
    },
}

impl LogPayload {
    pub fn kind(&self) -> LogKind {
        match self {
            LogPayload::Start { .. } => LogKind::Start,
            LogPayload::Activation { .. } => LogKind::Activation,
            LogPayload::ScoreChange { .. } => LogKind::ScoreChange,
            LogPayload::End { .. } => LogKind::End,
        }
    }
}

impl From<&Activation> for LogPayload {
    fn from(activation: &Activation) -> Self {
        LogPayload::Activation {
            owner: activation.owner,
            slot_index: activation.slot_index,
            item_id: activation.item_id.clone(),
            magnitude: activation.magnitude,
            target: activation.target,
            scheduled_at: activation.scheduled_at,
        }
    }
}

impl From<&ScoreChange> for LogPayload {
    fn from(change: &ScoreChange) -> Self {
        LogPayload::ScoreChange {
            side: change.side,
            before: change.before,
            after: change.after,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLogEntry {
    pub timestamp: Tick,
    pub payload: LogPayload,
}

impl BattleLogEntry {
    pub fn new(timestamp: Tick, payload: LogPayload) -> Self {
        Self { timestamp, payload }
    }

    pub fn kind(&self) -> LogKind {
        self.payload.kind()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    #[error("battle log is frozen; no entries can be appended")]
    Frozen,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<BattleLogEntry>,
    frozen: bool,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp: Tick, payload: LogPayload) -> Result<(), LogError> {
        if self.frozen {
            return Err(LogError::Frozen);
        }
        self.entries.push(BattleLogEntry::new(timestamp, payload));
        Ok(())
    }

    /// Stops accepting entries. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn entries(&self) -> &[BattleLogEntry] {
        &self.entries
    }

    /// Entries appended after the first `offset`.
    pub fn since(&self, offset: usize) -> &[BattleLogEntry] {
        self.entries.get(offset..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }

    /// SHA-256 over a canonical encoding of every entry.
    ///
    /// Floats are hashed by bit pattern, so two logs share a digest only if
    /// they are bit-for-bit identical.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.timestamp.0.to_le_bytes());
            hasher.update(entry.kind().as_ref().as_bytes());
            match &entry.payload {
                LogPayload::Start {
                    speed,
                    player_instances,
                    opponent_instances,
                    is_harder_rematch,
                } => {
                    hasher.update(speed.as_ref().as_bytes());
                    hasher.update((*player_instances as u64).to_le_bytes());
                    hasher.update((*opponent_instances as u64).to_le_bytes());
                    hasher.update([u8::from(*is_harder_rematch)]);
                }
                LogPayload::Activation {
                    owner,
                    slot_index,
                    item_id,
                    magnitude,
                    target,
                    scheduled_at,
                } => {
                    hasher.update(owner.as_ref().as_bytes());
                    hasher.update((*slot_index as u64).to_le_bytes());
                    hasher.update(item_id.as_str().as_bytes());
                    hasher.update(magnitude.to_bits().to_le_bytes());
                    hasher.update(target.as_ref().as_bytes());
                    hasher.update(scheduled_at.0.to_le_bytes());
                }
                LogPayload::ScoreChange {
                    side,
                    before,
                    after,
                } => {
                    hasher.update(side.as_ref().as_bytes());
                    hasher.update(before.to_bits().to_le_bytes());
                    hasher.update(after.to_bits().to_le_bytes());
                }
                LogPayload::End {
                    winner,
                    reason,
                    player_score,
                    opponent_score,
                } => {
                    hasher.update(winner.as_ref().as_bytes());
                    hasher.update(reason.as_ref().as_bytes());
                    hasher.update(player_score.to_bits().to_le_bytes());
                    hasher.update(opponent_score.to_bits().to_le_bytes());
                }
            }
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> LogPayload {
        LogPayload::Start {
            speed: BattleSpeed::Normal,
            player_instances: 1,
            opponent_instances: 0,
            is_harder_rematch: false,
        }
    }

    #[test]
    fn frozen_log_rejects_entries() {
        let mut log = BattleLog::new();
        log.push(Tick::ZERO, start()).unwrap();
        log.freeze();

        assert_eq!(log.push(Tick(100), start()), Err(LogError::Frozen));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn since_returns_tail() {
        let mut log = BattleLog::new();
        log.push(Tick::ZERO, start()).unwrap();
        log.push(
            Tick(100),
            LogPayload::ScoreChange {
                side: Side::Player,
                before: 50.0,
                after: 55.0,
            },
        )
        .unwrap();

        assert_eq!(log.since(1).len(), 1);
        assert_eq!(log.since(1)[0].kind(), LogKind::ScoreChange);
        assert!(log.since(5).is_empty());
    }

    #[test]
    fn digest_distinguishes_payloads() {
        let mut a = BattleLog::new();
        a.push(Tick::ZERO, start()).unwrap();
        let mut b = a.clone();
        assert_eq!(hex::encode(a.digest()), hex::encode(b.digest()));

        b.push(
            Tick(100),
            LogPayload::ScoreChange {
                side: Side::Player,
                before: 50.0,
                after: 55.0,
            },
        )
        .unwrap();
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn kind_names_are_upper_snake_case() {
        assert_eq!(LogKind::ScoreChange.to_string(), "SCORE_CHANGE");
        assert_eq!(LogKind::Start.as_ref(), "START");
    }
}
