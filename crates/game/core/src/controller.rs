//! Battle state machine.
//!
//! ```text
//!            start                 terminal score
//!   Idle ───────────────▶ Running ────────────────▶ Resolved
//!    ▲                      │                          │
//!    └──────── stop ────────┘                          │
//!    └──────────────────── reset / rematch ────────────┘
//! ```
//!
//! Every exit from `Running` bumps the [`Epoch`]. Drivers tag each poll with
//! the epoch returned by [`BattleController::start`]; polls carrying any
//! other epoch are ignored, so a timer that fires after a stop cannot touch
//! the next battle.

use crate::compiler::{CompileOptions, compile_battle};
use crate::config::{BattleConfig, BattleSpeed};
use crate::env::BattleEnv;
use crate::error::{BattleError, ErrorSeverity};
use crate::ledger::BattleResult;
use crate::log::BattleLogEntry;
use crate::opponent::FightContext;
use crate::session::{BattleSession, SessionPoll};
use crate::state::{Epoch, Roster, Tick};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattlePhase {
    #[default]
    Idle,
    Running,
    Resolved,
}

/// Requests that move the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ControllerAction {
    Start,
    Stop,
    Reset,
    Rematch,
    ConfigureFight,
    ChangeSpeed,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerError {
    #[error("cannot {action} while the battle is {phase}")]
    InvalidTransition {
        action: ControllerAction,
        phase: BattlePhase,
    },

    #[error("opponent difficulty multiplier must be positive and finite, got {value}")]
    InvalidDifficulty { value: f64 },
}

impl ControllerError {
    fn invalid(action: ControllerAction, phase: BattlePhase) -> Self {
        Self::InvalidTransition { action, phase }
    }
}

impl BattleError for ControllerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTransition { .. } => ErrorSeverity::Recoverable,
            Self::InvalidDifficulty { .. } => ErrorSeverity::Validation,
        }
    }
}

/// What a poll did from the driver's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The poll's epoch is not the live one, or no battle is running.
    Stale,
    Continue { now: Tick, activations: usize },
    Resolved(BattleResult),
}

/// Owned snapshot of a battle for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleProgress {
    pub phase: BattlePhase,
    pub epoch: Epoch,
    pub speed: BattleSpeed,
    pub fight: FightContext,
    pub now: Tick,
    pub player_score: f64,
    pub opponent_score: f64,
    pub log: Vec<BattleLogEntry>,
    pub result: Option<BattleResult>,
}

#[derive(Clone, Debug)]
pub struct BattleController {
    config: BattleConfig,
    phase: BattlePhase,
    epoch: Epoch,
    speed: BattleSpeed,
    fight: FightContext,
    session: Option<BattleSession>,
}

impl BattleController {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            speed: config.default_speed,
            config,
            phase: BattlePhase::Idle,
            epoch: Epoch::INITIAL,
            fight: FightContext::default(),
            session: None,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The live epoch. Only polls tagged with it have any effect.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn speed(&self) -> BattleSpeed {
        self.speed
    }

    pub fn fight(&self) -> FightContext {
        self.fight
    }

    /// Session of the running or just-resolved battle.
    pub fn session(&self) -> Option<&BattleSession> {
        self.session.as_ref()
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.session.as_ref().and_then(BattleSession::result)
    }

    /// Changes playback speed. Only allowed while idle.
    pub fn set_speed(&mut self, speed: BattleSpeed) -> Result<(), ControllerError> {
        self.require(BattlePhase::Idle, ControllerAction::ChangeSpeed)?;
        self.speed = speed;
        Ok(())
    }

    /// Sets fight number and game-plus loop for the next start.
    pub fn set_fight(&mut self, fight: FightContext) -> Result<(), ControllerError> {
        self.require(BattlePhase::Idle, ControllerAction::ConfigureFight)?;
        self.fight = fight;
        Ok(())
    }

    /// `Idle → Running`.
    ///
    /// Generates the opponent, compiles both rosters once, and opens a new
    /// session at battle time zero. Returns the epoch polls must carry.
    pub fn start(&mut self, env: &BattleEnv<'_>, player: &Roster) -> Result<Epoch, ControllerError> {
        self.require(BattlePhase::Idle, ControllerAction::Start)?;

        let opponent = env.opponents().generate(&self.fight);
        if !opponent.has_valid_difficulty() {
            return Err(ControllerError::InvalidDifficulty {
                value: opponent.difficulty,
            });
        }

        let options = CompileOptions {
            speed: self.speed,
            battle_start: Tick::ZERO,
        };
        let instances = compile_battle(player, &opponent, env, options);

        self.session = Some(BattleSession::new(
            instances,
            self.speed,
            self.fight.harder_rematch,
            options.battle_start,
        ));
        self.phase = BattlePhase::Running;
        Ok(self.epoch)
    }

    /// Advances the battle by one poll interval.
    pub fn poll(&mut self, epoch: Epoch) -> PollOutcome {
        let Some(now) = self.session.as_ref().map(|s| s.now() + self.config.poll_interval_ms) else {
            return PollOutcome::Stale;
        };
        self.poll_at(epoch, now)
    }

    /// Polls at an explicit battle time.
    pub fn poll_at(&mut self, epoch: Epoch, now: Tick) -> PollOutcome {
        if epoch != self.epoch || self.phase != BattlePhase::Running {
            return PollOutcome::Stale;
        }
        let Some(session) = self.session.as_mut() else {
            return PollOutcome::Stale;
        };

        match session.poll(now) {
            SessionPoll::Continue { activations } => PollOutcome::Continue {
                now: session.now(),
                activations,
            },
            SessionPoll::Resolved(result) => {
                self.leave_running(BattlePhase::Resolved);
                PollOutcome::Resolved(result)
            }
            SessionPoll::Finished => PollOutcome::Stale,
        }
    }

    /// `Running → Idle` with no result.
    pub fn stop(&mut self) -> Result<(), ControllerError> {
        self.require(BattlePhase::Running, ControllerAction::Stop)?;
        self.session = None;
        self.leave_running(BattlePhase::Idle);
        Ok(())
    }

    /// `Resolved → Idle`, discarding the result. The next fight is a normal one.
    pub fn reset(&mut self) -> Result<(), ControllerError> {
        self.require(BattlePhase::Resolved, ControllerAction::Reset)?;
        self.session = None;
        self.fight.harder_rematch = false;
        self.phase = BattlePhase::Idle;
        Ok(())
    }

    /// `Resolved → Idle`, discarding the result.
    ///
    /// The next [`start`](Self::start) asks the generator for a fresh
    /// opponent with the harder-rematch flag set to `harder`.
    pub fn rematch(&mut self, harder: bool) -> Result<(), ControllerError> {
        self.require(BattlePhase::Resolved, ControllerAction::Rematch)?;
        self.session = None;
        self.fight.harder_rematch = harder;
        self.phase = BattlePhase::Idle;
        Ok(())
    }

    /// Owned snapshot of scores and log for display.
    pub fn progress(&self) -> BattleProgress {
        let session = self.session.as_ref();
        BattleProgress {
            phase: self.phase,
            epoch: self.epoch,
            speed: self.speed,
            fight: self.fight,
            now: session.map(BattleSession::now).unwrap_or_default(),
            player_score: session.map_or(BattleConfig::STARTING_SCORE, |s| s.ledger().player()),
            opponent_score: session
                .map_or(BattleConfig::STARTING_SCORE, |s| s.ledger().opponent()),
            log: session
                .map(|s| s.log().entries().to_vec())
                .unwrap_or_default(),
            result: self.result().copied(),
        }
    }

    fn require(&self, phase: BattlePhase, action: ControllerAction) -> Result<(), ControllerError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ControllerError::invalid(action, self.phase))
        }
    }

    fn leave_running(&mut self, next: BattlePhase) {
        debug_assert_eq!(self.phase, BattlePhase::Running);
        self.epoch = self.epoch.next();
        self.phase = next;
    }
}

impl Default for BattleController {
    fn default() -> Self {
        Self::new(BattleConfig::default())
    }
}
