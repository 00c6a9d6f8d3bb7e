//! Data-driven battle content and loaders.
//!
//! This crate houses the builtin pantry and provides loaders for RON/TOML data files:
//! - Item effect catalogs (RON)
//! - Synergy rule tables (RON)
//! - Opponent roster pools and difficulty curves (RON)
//! - Battle configuration (TOML)
//!
//! Content is consumed by the resolver through its oracle traits and never
//! appears in battle state.

pub mod bundle;
pub mod opponents;
pub mod pantry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bundle::{BattleContent, ContentError};
pub use opponents::{
    FightPool, OpponentTable, OpponentTableError, RosterTemplate, SlotSpec, TableOpponentGenerator,
};
pub use pantry::{builtin_catalog, builtin_descriptors, builtin_opponents, builtin_synergy};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, CatalogSpec, ConfigLoader, ContentFactory, LoadResult, OpponentLoader,
    SynergyLoader,
};
