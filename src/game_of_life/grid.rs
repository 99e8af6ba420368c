//! Grid representation and utilities for Game of Life

use anyhow::Result;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative offsets of the Moore neighborhood as `(row, col)` deltas
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size, row-major Game of Life grid.
///
/// The board has hard edges: positions outside `[0, rows) x [0, columns)`
/// are permanently dead and never wrap to the opposite side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<bool>,
}

/// Unchecked serialized form of [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        match Grid::cell_count(raw.rows, raw.columns) {
            Some(count) if count == raw.cells.len() => Ok(Self {
                rows: raw.rows,
                columns: raw.columns,
                cells: raw.cells,
            }),
            _ => Err(format!(
                "{}x{} grid cannot hold {} cells",
                raw.rows,
                raw.columns,
                raw.cells.len()
            )),
        }
    }
}

impl Grid {
    /// Number of cells in a `rows x columns` board, or `None` if either side
    /// is zero or the board is too large to address
    pub fn cell_count(rows: usize, columns: usize) -> Option<usize> {
        rows.checked_mul(columns)
            .filter(|&count| count > 0 && count <= isize::MAX as usize)
    }

    /// Create a new empty grid. Callers validate the size with [`Grid::cell_count`].
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let rows = cells.len();
        let columns = cells[0].len();

        if columns == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != columns {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), columns);
            }
        }

        Ok(Self {
            rows,
            columns,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    /// Whether `(row, col)` lies on the board
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Get cell value at coordinates; off-board positions read as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        if self.contains(row, col) {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    /// Count living neighbors of a cell, skipping offsets that leave the board
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.is_neighbor_alive(row as isize + dr, col as isize + dc))
            .count() as u8
    }

    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.columns
            && self.cells[self.index(row as usize, col as usize)]
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.columns)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of living cells, in `[0, 1]`
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.living_count() as f64 / self.cells.len() as f64
        }
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterate over rows as slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.columns.max(1))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 4);
        assert_eq!(grid.cells.len(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_from_cells() {
        let cells = vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let cells = vec![vec![true, false], vec![true]];
        assert!(Grid::from_cells(cells).is_err());
        assert!(Grid::from_cells(vec![]).is_err());
        assert!(Grid::from_cells(vec![vec![]]).is_err());
    }

    #[test]
    fn test_neighbor_counting() {
        let cells = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();

        assert_eq!(grid.count_neighbors(1, 1), 8);
        // Corner: only three in-bounds positions, one of which is the dead center
        assert_eq!(grid.count_neighbors(0, 0), 2);
        // Edge: five in-bounds positions
        assert_eq!(grid.count_neighbors(0, 1), 4);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let cells = vec![
            vec![true, false, true],
            vec![false, false, false],
            vec![true, false, true],
        ];
        let grid = Grid::from_cells(cells).unwrap();

        // On a torus every corner would see the other three
        assert_eq!(grid.count_neighbors(0, 0), 0);
        assert_eq!(grid.count_neighbors(2, 2), 0);
        assert_eq!(grid.count_neighbors(1, 1), 4);
    }

    #[test]
    fn test_off_board_reads_dead() {
        let grid = Grid::from_cells(vec![vec![true, true], vec![true, true]]).unwrap();
        assert!(!grid.get(2, 0));
        assert!(!grid.get(0, 2));
        assert!(!grid.get(5, 5));
    }

    #[test]
    fn test_cell_count_limits() {
        assert_eq!(Grid::cell_count(30, 50), Some(1500));
        assert_eq!(Grid::cell_count(0, 50), None);
        assert_eq!(Grid::cell_count(1 << 33, 1 << 33), None);
        assert_eq!(Grid::cell_count(usize::MAX, 2), None);
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let grid: Grid = serde_json::from_str(r#"{"rows":1,"columns":2,"cells":[true,false]}"#).unwrap();
        assert_eq!(grid.living_cells(), vec![(0, 0)]);

        assert!(serde_json::from_str::<Grid>(r#"{"rows":2,"columns":2,"cells":[true]}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"rows":0,"columns":3,"cells":[]}"#).is_err());
    }

    #[test]
    fn test_density_and_clear() {
        let mut grid = Grid::from_cells(vec![vec![true, false], vec![true, true]]).unwrap();
        assert!((grid.density() - 0.75).abs() < f64::EPSILON);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.cells.len(), 4);
    }
}
