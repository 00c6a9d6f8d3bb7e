//! Read-only collaborators a battle needs.
//!
//! [`BattleEnv`] bundles the catalog, synergy rules and opponent generator so
//! the controller can reach them without owning concrete implementations.

use crate::catalog::EffectCatalog;
use crate::opponent::OpponentGenerator;
use crate::synergy::SynergyRules;

#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    catalog: &'a dyn EffectCatalog,
    synergy: &'a SynergyRules,
    opponents: &'a dyn OpponentGenerator,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        catalog: &'a dyn EffectCatalog,
        synergy: &'a SynergyRules,
        opponents: &'a dyn OpponentGenerator,
    ) -> Self {
        Self {
            catalog,
            synergy,
            opponents,
        }
    }

    pub fn catalog(&self) -> &'a dyn EffectCatalog {
        self.catalog
    }

    pub fn synergy(&self) -> &'a SynergyRules {
        self.synergy
    }

    pub fn opponents(&self) -> &'a dyn OpponentGenerator {
        self.opponents
    }
}

impl std::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("synergy", self.synergy)
            .finish_non_exhaustive()
    }
}
