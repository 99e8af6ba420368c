//! Serializable view of an engine at one generation

use super::Grid;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A grid together with the generation it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub rows: usize,
    pub columns: usize,
    pub living_cells: usize,
    pub grid: Grid,
}

impl Snapshot {
    pub fn new(generation: u64, grid: Grid) -> Self {
        Self {
            generation,
            rows: grid.rows,
            columns: grid.columns,
            living_cells: grid.living_count(),
            grid,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json().context("Failed to serialize snapshot")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot: {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_metadata() {
        let grid = Grid::from_cells(vec![vec![true, true], vec![false, true]]).unwrap();
        let snapshot = Snapshot::new(7, grid);
        assert_eq!(snapshot.generation, 7);
        assert_eq!((snapshot.rows, snapshot.columns), (2, 2));
        assert_eq!(snapshot.living_cells, 3);
    }

    #[test]
    fn test_snapshot_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("gen.json");

        let snapshot = Snapshot::new(3, Grid::new(4, 5));
        snapshot.save_to_file(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"generation\": 3"));
        assert_eq!(Snapshot::load_from_file(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_mismatched_cells_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(
            &path,
            r#"{"generation":1,"rows":2,"columns":2,"living_cells":1,"grid":{"rows":2,"columns":2,"cells":[true]}}"#,
        )
        .unwrap();

        assert!(Snapshot::load_from_file(&path).is_err());
    }
}
