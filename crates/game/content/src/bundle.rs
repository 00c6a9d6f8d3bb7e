//! A complete, validated set of battle content.

use battle_core::{BattleConfig, BattleEnv, CatalogError, CatalogTable, SynergyRules};

use crate::opponents::{OpponentTableError, TableOpponentGenerator};
use crate::pantry;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Opponents(#[from] OpponentTableError),
}

/// Everything a battle driver needs besides the player's roster.
#[derive(Debug)]
pub struct BattleContent {
    pub config: BattleConfig,
    pub catalog: CatalogTable,
    pub synergy: SynergyRules,
    pub opponents: TableOpponentGenerator,
}

impl BattleContent {
    /// Content compiled into the crate.
    pub fn builtin() -> Result<Self, ContentError> {
        Ok(Self {
            config: BattleConfig::default(),
            catalog: pantry::builtin_catalog()?,
            synergy: pantry::builtin_synergy(),
            opponents: TableOpponentGenerator::new(&pantry::builtin_opponents())?,
        })
    }

    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(&self.catalog, &self.synergy, &self.opponents)
    }
}
