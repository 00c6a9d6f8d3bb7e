//! Shared handles to static battle content.
//!
//! The data is immutable at runtime. [`BattleOracles`] keeps it behind `Arc`s
//! so the worker can build a [`BattleEnv`] on every battle start.

use std::sync::Arc;

use battle_content::BattleContent;
use battle_core::{BattleEnv, EffectCatalog, OpponentGenerator, SynergyRules};

#[derive(Clone)]
pub struct BattleOracles {
    pub(crate) catalog: Arc<dyn EffectCatalog>,
    pub(crate) synergy: Arc<SynergyRules>,
    pub(crate) opponents: Arc<dyn OpponentGenerator>,
}

impl BattleOracles {
    pub fn new(
        catalog: Arc<dyn EffectCatalog>,
        synergy: Arc<SynergyRules>,
        opponents: Arc<dyn OpponentGenerator>,
    ) -> Self {
        Self {
            catalog,
            synergy,
            opponents,
        }
    }

    /// Converts the oracles into the environment the controller reads.
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        BattleEnv::new(
            self.catalog.as_ref(),
            self.synergy.as_ref(),
            self.opponents.as_ref(),
        )
    }
}

impl From<BattleContent> for BattleOracles {
    fn from(content: BattleContent) -> Self {
        Self::new(
            Arc::new(content.catalog),
            Arc::new(content.synergy),
            Arc::new(content.opponents),
        )
    }
}

impl std::fmt::Debug for BattleOracles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleOracles")
            .field("synergy", &self.synergy)
            .finish_non_exhaustive()
    }
}
