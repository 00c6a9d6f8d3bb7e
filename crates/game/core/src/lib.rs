//! Deterministic arena battle resolver.
//!
//! `battle-core` turns two item rosters into a timed score race. Each item
//! contributes an independently scheduled effect whose magnitude is scaled by
//! upgrade level, roster synergy and opponent difficulty; the first side to
//! hit a score bound wins.
//!
//! The crate performs no I/O and owns no timers. Drivers call
//! [`BattleController::poll`] on a fixed cadence, and all battle state lives
//! in the [`BattleSession`] the controller owns.
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod controller;
pub mod env;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod log;
pub mod opponent;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod synergy;

pub use catalog::{CatalogError, CatalogTable, EffectCatalog, ItemCategory, ItemEffectDescriptor};
pub use compiler::{
    CompileOptions, compile_battle, compile_side, difficulty_multiplier, upgrade_multiplier,
};
pub use config::{BattleConfig, BattleSpeed};
pub use controller::{
    BattleController, BattlePhase, BattleProgress, ControllerAction, ControllerError, PollOutcome,
};
pub use env::BattleEnv;
pub use error::{BattleError, ErrorSeverity};
pub use grid::{Cell, Grid};
pub use ledger::{BattleResult, ResolutionReason, ScoreChange, ScoreLedger, Terminal};
pub use log::{BattleLog, BattleLogEntry, LogError, LogKind, LogPayload};
pub use opponent::{DifficultyCurve, FightContext, FixedOpponent, OpponentGenerator, OpponentSetup};
pub use scheduler::{Activation, EffectInstance, PollReport, ScoreDelta, Scheduler};
pub use session::{BattleSession, SessionPoll};
pub use state::{Epoch, ItemId, Roster, RosterError, RosterSlot, Side, Tick};
pub use synergy::{HubItem, PairBonus, SupportBonus, SynergyResolver, SynergyRules};
