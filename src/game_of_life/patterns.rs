//! Built-in starting patterns

use super::Grid;
use serde::{Deserialize, Serialize};

/// Well-known patterns that can be stamped onto a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Block,
    Blinker,
    Glider,
    Beacon,
    Toad,
    RPentomino,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Block,
        Pattern::Blinker,
        Pattern::Glider,
        Pattern::Beacon,
        Pattern::Toad,
        Pattern::RPentomino,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Glider => "glider",
            Pattern::Beacon => "beacon",
            Pattern::Toad => "toad",
            Pattern::RPentomino => "r_pentomino",
        }
    }

    /// Live cells relative to the pattern's top-left corner
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            Pattern::Beacon => &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
            Pattern::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Pattern::RPentomino => &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// Bounding box as `(rows, columns)`
    pub fn extent(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }

    /// The pattern on its own, padded by one dead cell on each side
    pub fn to_grid(self) -> Grid {
        let (rows, columns) = self.extent();
        let mut grid = Grid::new(rows + 2, columns + 2);
        for &(r, c) in self.cells() {
            let idx = grid.index(r + 1, c + 1);
            grid.cells[idx] = true;
        }
        grid
    }
}
