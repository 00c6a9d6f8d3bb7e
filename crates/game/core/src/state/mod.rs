//! Value types shared by every stage of the resolver.
//!
//! Nothing in here mutates on its own: rosters are frozen snapshots, ticks and
//! epochs are plain counters. The controller and session own everything that
//! changes during a battle.
mod common;
mod roster;

pub use common::{Epoch, ItemId, Side, Tick};
pub use roster::{Roster, RosterError, RosterSlot};
