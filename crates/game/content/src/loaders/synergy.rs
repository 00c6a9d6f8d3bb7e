//! Synergy rule table loader.

use std::path::Path;

use battle_core::SynergyRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`SynergyRules`] from RON files.
///
/// Missing fields fall back to the default rule set.
pub struct SynergyLoader;

impl SynergyLoader {
    pub fn load(path: &Path) -> LoadResult<SynergyRules> {
        let content = read_file(path)?;
        let rules = Self::parse(&content)?;

        tracing::debug!(
            target: "content::loaders",
            path = %path.display(),
            hubs = rules.hubs.len(),
            pairs = rules.pairs.len(),
            supports = rules.supports.len(),
            "loaded synergy rules"
        );
        Ok(rules)
    }

    pub fn parse(content: &str) -> LoadResult<SynergyRules> {
        let rules: SynergyRules = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse synergy RON: {}", e))?;

        let bonuses = [rules.hub_bonus_per_member, rules.adjacent_member_bonus]
            .into_iter()
            .chain(rules.pairs.iter().map(|pair| pair.bonus))
            .chain(rules.supports.iter().map(|support| support.bonus_per_neighbor));
        for bonus in bonuses {
            if !bonus.is_finite() || bonus < 0.0 {
                anyhow::bail!("Synergy bonuses must be finite and non-negative, got {}", bonus);
            }
        }

        Ok(rules)
    }
}
