//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the controller and executes commands; a ticker
//! task per running battle feeds it polls on a fixed cadence.

mod battle;
mod ticker;

pub use battle::{BattleWorker, Command};
