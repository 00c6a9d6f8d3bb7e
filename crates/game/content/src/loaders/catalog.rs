//! Item effect catalog loader.

use std::path::Path;

use battle_core::{CatalogTable, ItemEffectDescriptor};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub items: Vec<ItemEffectDescriptor>,
}

/// Loader for the effect catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate an effect catalog.
    ///
    /// Duplicate ids, zero intervals or durations and non-finite magnitudes
    /// are rejected.
    pub fn load(path: &Path) -> LoadResult<CatalogTable> {
        let content = read_file(path)?;
        let table = Self::parse(&content)?;

        tracing::debug!(
            target: "content::loaders",
            path = %path.display(),
            items = table.len(),
            "loaded effect catalog"
        );
        Ok(table)
    }

    pub fn parse(content: &str) -> LoadResult<CatalogTable> {
        let spec: CatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        CatalogTable::from_descriptors(spec.items)
            .map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))
    }
}
