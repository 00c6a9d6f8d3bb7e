//! One battle attempt: scheduler, ledger and log behind a single owner.
//!
//! A [`BattleSession`] replaces any notion of a global "current battle". The
//! controller owns it and hands out read access; nothing else mutates it.

use crate::config::BattleSpeed;
use crate::ledger::{BattleResult, ScoreLedger};
use crate::log::{BattleLog, LogPayload};
use crate::scheduler::{EffectInstance, Scheduler};
use crate::state::{Side, Tick};

/// What a single session poll did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPoll {
    /// The battle continues.
    Continue { activations: usize },
    /// This poll produced the battle's result.
    Resolved(BattleResult),
    /// The battle had already resolved; nothing changed.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattleSession {
    scheduler: Scheduler,
    ledger: ScoreLedger,
    log: BattleLog,
    now: Tick,
    speed: BattleSpeed,
    is_harder_rematch: bool,
    result: Option<BattleResult>,
}

impl BattleSession {
    /// Creates a session at `start` and records the start entry.
    pub fn new(
        instances: Vec<EffectInstance>,
        speed: BattleSpeed,
        is_harder_rematch: bool,
        start: Tick,
    ) -> Self {
        let scheduler = Scheduler::new(instances);
        let mut log = BattleLog::new();
        // a fresh log is never frozen
        let _ = log.push(
            start,
            LogPayload::Start {
                speed,
                player_instances: scheduler.count_for(Side::Player),
                opponent_instances: scheduler.count_for(Side::Opponent),
                is_harder_rematch,
            },
        );

        Self {
            scheduler,
            ledger: ScoreLedger::new(),
            log,
            now: start,
            speed,
            is_harder_rematch,
            result: None,
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn speed(&self) -> BattleSpeed {
        self.speed
    }

    pub fn is_harder_rematch(&self) -> bool {
        self.is_harder_rematch
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Runs one poll at battle time `now`.
    ///
    /// Time never moves backwards: an earlier `now` is treated as the current
    /// time. After resolution every poll is a no-op.
    pub fn poll(&mut self, now: Tick) -> SessionPoll {
        if self.result.is_some() {
            return SessionPoll::Finished;
        }

        let now = now.max(self.now);
        self.now = now;

        let report = self.scheduler.poll(now);
        for activation in &report.activations {
            self.record(now, LogPayload::from(activation));
        }

        for change in self.ledger.apply(&report.delta) {
            self.record(now, LogPayload::from(&change));
        }

        let Some(terminal) = self.ledger.terminal() else {
            return SessionPoll::Continue {
                activations: report.activations.len(),
            };
        };

        let result = BattleResult {
            winner: terminal.winner,
            reason: terminal.reason,
            is_harder_rematch: self.is_harder_rematch,
            resolved_at: now,
        };
        self.record(
            now,
            LogPayload::End {
                winner: result.winner,
                reason: result.reason,
                player_score: self.ledger.player(),
                opponent_score: self.ledger.opponent(),
            },
        );
        self.log.freeze();
        self.result = Some(result);

        SessionPoll::Resolved(result)
    }

    /// Advances the clock by `step` milliseconds and polls.
    pub fn advance(&mut self, step: u64) -> SessionPoll {
        self.poll(self.now + step)
    }

    fn record(&mut self, now: Tick, payload: LogPayload) {
        // the log only freezes together with `result` being set, which is
        // checked on entry to `poll`
        debug_assert!(!self.log.is_frozen());
        let _ = self.log.push(now, payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ResolutionReason;
    use crate::log::LogKind;
    use crate::state::ItemId;

    fn instance(owner: Side, magnitude: f64, interval: u64) -> EffectInstance {
        EffectInstance {
            owner,
            slot_index: 0,
            item_id: ItemId::from("test"),
            effective_magnitude: magnitude,
            tick_interval_ms: interval,
            next_fire_at: Tick(interval),
            expires_at: None,
            activations: 0,
        }
    }

    #[test]
    fn logs_start_on_creation() {
        let session = BattleSession::new(Vec::new(), BattleSpeed::Normal, false, Tick::ZERO);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().entries()[0].kind(), LogKind::Start);
    }

    #[test]
    fn resolves_and_freezes() {
        let mut session = BattleSession::new(
            vec![instance(Side::Player, 25.0, 100)],
            BattleSpeed::Normal,
            true,
            Tick::ZERO,
        );

        assert_eq!(session.advance(100), SessionPoll::Continue { activations: 1 });
        assert_eq!(
            session.advance(100),
            SessionPoll::Resolved(BattleResult {
                winner: Side::Player,
                reason: ResolutionReason::ReachedMax,
                is_harder_rematch: true,
                resolved_at: Tick(200),
            })
        );
        assert!(session.log().is_frozen());
        assert_eq!(session.log().count(LogKind::End), 1);

        let len = session.log().len();
        assert_eq!(session.advance(100), SessionPoll::Finished);
        assert_eq!(session.log().len(), len);
        assert_eq!(session.ledger().player(), 100.0);
    }

    #[test]
    fn time_never_moves_backwards() {
        let mut session = BattleSession::new(Vec::new(), BattleSpeed::Normal, false, Tick::ZERO);
        session.poll(Tick(500));
        session.poll(Tick(200));
        assert_eq!(session.now(), Tick(500));
    }
}
