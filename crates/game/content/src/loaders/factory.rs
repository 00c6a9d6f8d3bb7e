//! Content factory for building battle content from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, CatalogTable, SynergyRules};

use crate::bundle::BattleContent;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, OpponentLoader, SynergyLoader};
use crate::opponents::TableOpponentGenerator;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── pantry.ron
/// ├── synergy.ron
/// └── opponents.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("battle.toml"))
    }

    /// Load the effect catalog from `pantry.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogTable> {
        CatalogLoader::load(&self.data_dir.join("pantry.ron"))
    }

    /// Load synergy rules from `synergy.ron`.
    pub fn load_synergy(&self) -> LoadResult<SynergyRules> {
        SynergyLoader::load(&self.data_dir.join("synergy.ron"))
    }

    /// Load the opponent generator from `opponents.ron`.
    pub fn load_opponents(&self) -> LoadResult<TableOpponentGenerator> {
        OpponentLoader::load(&self.data_dir.join("opponents.ron"))
    }

    /// Load every file in the directory.
    pub fn load_all(&self) -> LoadResult<BattleContent> {
        let content = BattleContent {
            config: self.load_config()?,
            catalog: self.load_catalog()?,
            synergy: self.load_synergy()?,
            opponents: self.load_opponents()?,
        };

        tracing::info!(
            target: "content::loaders",
            data_dir = %self.data_dir.display(),
            items = content.catalog.len(),
            "loaded battle content"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_fails_on_first_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(err.to_string().contains("battle.toml"));
    }
}
