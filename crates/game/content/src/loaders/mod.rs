//! Content loaders for reading battle data from files.
//!
//! RON for catalogs, synergy rules and opponent tables; TOML for the battle
//! config. [`ContentFactory`] loads a whole data directory at once.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod opponents;
pub mod synergy;

pub use catalog::{CatalogLoader, CatalogSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use opponents::OpponentLoader;
pub use synergy::SynergyLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
