//! Grid state plus generation counter, with the operations a front end drives

use super::EngineError;
use crate::game_of_life::{GameOfLifeRules, Grid, Pattern};
use log::{debug, info};
use rand::Rng;

/// Default board size
pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLUMNS: usize = 50;

/// Chance of a cell starting alive when seeding randomly
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.4;

/// Board coordinates and sizes as reported in errors; saturates at `i64::MAX`
fn signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Owns a fixed-size board and the number of generations applied since the last clear.
///
/// Steps are double-buffered: the next generation is computed into a
/// scratch grid from the current one and the two are swapped, so the grid
/// returned by [`LifeEngine::grid`] is always a complete generation.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    current: Grid,
    scratch: Grid,
    generation: u64,
}

impl LifeEngine {
    /// Create an engine with an all-dead `rows x columns` board.
    ///
    /// Both sides must be positive and the board must be small enough to
    /// allocate; anything else is `InvalidDimension`.
    pub fn new(rows: usize, columns: usize) -> Result<Self, EngineError> {
        if Grid::cell_count(rows, columns).is_none() {
            return Err(EngineError::InvalidDimension {
                rows: signed(rows),
                columns: signed(columns),
            });
        }

        debug!("Creating {}x{} engine", rows, columns);
        Ok(Self::from_grid_unchecked(Grid::new(rows, columns)))
    }

    /// Create an engine from signed dimensions, as they arrive from untyped input
    pub fn from_signed(rows: i64, columns: i64) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidDimension { rows, columns };
        let rows = usize::try_from(rows).map_err(|_| invalid())?;
        let cols = usize::try_from(columns).map_err(|_| invalid())?;
        Self::new(rows, cols)
    }

    /// Adopt an existing grid as generation 0
    pub fn with_grid(grid: Grid) -> Result<Self, EngineError> {
        if Grid::cell_count(grid.rows, grid.columns) != Some(grid.cells.len()) {
            return Err(EngineError::InvalidDimension {
                rows: signed(grid.rows),
                columns: signed(grid.columns),
            });
        }
        Ok(Self::from_grid_unchecked(grid))
    }

    fn from_grid_unchecked(grid: Grid) -> Self {
        Self {
            scratch: Grid::new(grid.rows, grid.columns),
            current: grid,
            generation: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.current.rows
    }

    pub fn columns(&self) -> usize {
        self.current.columns
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view of the current generation
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Owned copy of the current generation
    pub fn snapshot(&self) -> Grid {
        self.current.clone()
    }

    pub fn living_count(&self) -> usize {
        self.current.living_count()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.check_bounds(row, col)?;
        Ok(self.current.get(row, col))
    }

    /// Validate signed coordinates (e.g. a pointer position) against the board
    pub fn position(&self, row: i64, col: i64) -> Result<(usize, usize), EngineError> {
        let out_of_bounds = || EngineError::OutOfBounds {
            row,
            col,
            rows: self.rows(),
            columns: self.columns(),
        };
        let r = usize::try_from(row).map_err(|_| out_of_bounds())?;
        let c = usize::try_from(col).map_err(|_| out_of_bounds())?;
        if self.current.contains(r, c) {
            Ok((r, c))
        } else {
            Err(out_of_bounds())
        }
    }

    /// Advance one generation
    pub fn step(&mut self) {
        GameOfLifeRules::evolve_into(&self.current, &mut self.scratch);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;
    }

    /// Advance `generations` generations
    pub fn step_n(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Replace the board with a random one; the generation counter is kept
    pub fn seed_random(&mut self, alive_probability: f64) -> Result<(), EngineError> {
        self.seed_random_with(alive_probability, &mut rand::rng())
    }

    /// Like [`LifeEngine::seed_random`], drawing from the given generator
    pub fn seed_random_with<R: Rng>(
        &mut self,
        alive_probability: f64,
        rng: &mut R,
    ) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(EngineError::InvalidArgument(format!(
                "alive probability {} is outside [0, 1]",
                alive_probability
            )));
        }

        for cell in self.scratch.cells.iter_mut() {
            *cell = rng.random_bool(alive_probability);
        }
        std::mem::swap(&mut self.current, &mut self.scratch);

        info!(
            "Seeded {}x{} board with p={:.2}: {} living cells",
            self.rows(),
            self.columns(),
            alive_probability,
            self.living_count()
        );
        Ok(())
    }

    /// Kill every cell and reset the generation counter
    pub fn clear(&mut self) {
        self.current.clear();
        self.generation = 0;
        info!("Cleared board");
    }

    /// Flip a single cell
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        self.check_bounds(row, col)?;
        let idx = self.current.index(row, col);
        self.current.cells[idx] = !self.current.cells[idx];
        Ok(())
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        self.check_bounds(row, col)?;
        let idx = self.current.index(row, col);
        self.current.cells[idx] = alive;
        Ok(())
    }

    /// Stamp a pattern's live cells with its top-left corner at `(row, col)`.
    /// Nothing is written unless the whole pattern fits.
    pub fn place_pattern(&mut self, pattern: Pattern, row: usize, col: usize) -> Result<(), EngineError> {
        let (height, width) = pattern.extent();
        self.check_bounds(row.saturating_add(height - 1), col.saturating_add(width - 1))?;

        for &(dr, dc) in pattern.cells() {
            let idx = self.current.index(row + dr, col + dc);
            self.current.cells[idx] = true;
        }
        debug!("Placed {} at ({}, {})", pattern.name(), row, col);
        Ok(())
    }

    /// Stamp a pattern as close to the middle of the board as it fits
    pub fn place_pattern_centered(&mut self, pattern: Pattern) -> Result<(), EngineError> {
        let (height, width) = pattern.extent();
        let row = self.rows().saturating_sub(height) / 2;
        let col = self.columns().saturating_sub(width) / 2;
        self.place_pattern(pattern, row, col)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), EngineError> {
        if self.current.contains(row, col) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row: signed(row),
                col: signed(col),
                rows: self.rows(),
                columns: self.columns(),
            })
        }
    }
}

impl Default for LifeEngine {
    fn default() -> Self {
        Self::from_grid_unchecked(Grid::new(DEFAULT_ROWS, DEFAULT_COLUMNS))
    }
}
