//! Game of Life rules implementation (B3/S23 on a bounded board)

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current` into `next`.
    ///
    /// `next` is overwritten entirely and must have the same dimensions as
    /// `current`. Only `current` is read, so no cell ever sees a
    /// partially-updated neighbor.
    pub fn evolve_into(current: &Grid, next: &mut Grid) {
        debug_assert_eq!((current.rows, current.columns), (next.rows, next.columns));

        let columns = current.columns.max(1);
        next.cells
            .par_chunks_mut(columns)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    *cell = Self::next_state(current.get(row, col), current.count_neighbors(row, col));
                }
            });
    }

    /// State of a cell in the next generation given its current state and neighbor count
    pub fn next_state(alive: bool, neighbors: u8) -> bool {
        if !(2..=3).contains(&neighbors) {
            false
        } else if !alive && neighbors == 3 {
            true
        } else {
            alive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evolve(current: &Grid) -> Grid {
        let mut next = Grid::new(current.rows, current.columns);
        GameOfLifeRules::evolve_into(current, &mut next);
        next
    }

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_cells(
            rows.iter()
                .map(|r| r.chars().map(|c| c == '1').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_still_life_block() {
        let block = grid(&["0000", "0110", "0110", "0000"]);
        assert_eq!(evolve(&block), block);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid(&["00000", "00000", "01110", "00000", "00000"]);
        let vertical = grid(&["00000", "00100", "00100", "00100", "00000"]);

        let once = evolve(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(evolve(&once), horizontal);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let empty = Grid::new(6, 9);
        assert!(evolve(&empty).is_empty());
    }

    #[test]
    fn test_rule_table() {
        for neighbors in 0..=8u8 {
            let survives = neighbors == 2 || neighbors == 3;
            let born = neighbors == 3;
            assert_eq!(GameOfLifeRules::next_state(true, neighbors), survives, "alive with {}", neighbors);
            assert_eq!(GameOfLifeRules::next_state(false, neighbors), born, "dead with {}", neighbors);
        }
    }

    #[test]
    fn test_every_neighbor_count_in_place() {
        // Center cell of a 3x3 board, with the first `n` neighbors set
        for n in 0..=8usize {
            for center in [false, true] {
                let mut board = Grid::new(3, 3);
                for &(dr, dc) in crate::game_of_life::NEIGHBOR_OFFSETS.iter().take(n) {
                    let idx = board.index((1 + dr) as usize, (1 + dc) as usize);
                    board.cells[idx] = true;
                }
                let center_idx = board.index(1, 1);
                board.cells[center_idx] = center;
                assert_eq!(board.count_neighbors(1, 1) as usize, n);

                let next = evolve(&board);
                let expected = n == 3 || (center && n == 2);
                assert_eq!(next.get(1, 1), expected, "n={} center={}", n, center);
            }
        }
    }

    #[test]
    fn test_corner_survives_without_wraparound() {
        // (0,0) alive with (0,1) and (1,0); opposite corner cells would
        // count if the board wrapped
        let board = grid(&["1101", "1000", "0000", "1001"]);
        let next = evolve(&board);
        assert!(next.get(0, 0));
        assert!(!next.get(3, 3));
    }
}
