//! Opponent table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::opponents::{OpponentTable, TableOpponentGenerator};

/// Loader for opponent tables from RON files.
pub struct OpponentLoader;

impl OpponentLoader {
    /// Load the raw table without building rosters.
    pub fn load_table(path: &Path) -> LoadResult<OpponentTable> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse opponent table RON: {}", e))
    }

    /// Load a table and build a generator from it.
    pub fn load(path: &Path) -> LoadResult<TableOpponentGenerator> {
        let table = Self::load_table(path)?;
        let generator = TableOpponentGenerator::new(&table)
            .map_err(|e| anyhow::anyhow!("Invalid opponent table {}: {}", path.display(), e))?;

        tracing::debug!(
            target: "content::loaders",
            path = %path.display(),
            pools = table.fights.len(),
            "loaded opponent table"
        );
        Ok(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_table_with_default_curve() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                fights: [
                    (fight: 1, variants: [
                        (name: "starter", slots: [(item: Some("apple")), (item: None), (item: Some("pepper"), level: 2)]),
                    ]),
                ],
            )"#
        )
        .unwrap();

        let table = OpponentLoader::load_table(file.path()).unwrap();
        assert_eq!(table.curve, battle_core::DifficultyCurve::default());
        assert_eq!(table.fights[0].variants[0].slots[2].level, 2);
        assert!(OpponentLoader::load(file.path()).is_ok());
    }

    #[test]
    fn rejects_empty_pool() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(fights: [(fight: 1, variants: [])])").unwrap();

        let err = OpponentLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("no roster variants"));
    }
}
