//! Conway's Game of Life
//!
//! A fixed-size, non-wrapping Game of Life engine with random seeding,
//! cell toggling and a background run loop with adjustable speed.

pub mod config;
pub mod engine;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use engine::{EngineError, LifeEngine, RunLoop, Speed};
pub use game_of_life::{Grid, Pattern};

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build an engine populated according to `settings.seeding`
pub fn build_engine(settings: &Settings) -> Result<LifeEngine> {
    let seeding = &settings.seeding;

    if let Some(ref path) = seeding.pattern_file {
        let grid = game_of_life::load_grid_from_file(path)?;
        info!("Loaded {}x{} pattern from {}", grid.rows, grid.columns, path.display());
        return LifeEngine::with_grid(grid).context("Pattern file has no cells");
    }

    let mut engine = LifeEngine::from_signed(settings.grid.rows, settings.grid.columns)?;

    if let Some(pattern) = seeding.pattern {
        engine
            .place_pattern_centered(pattern)
            .with_context(|| format!("Pattern {} does not fit the grid", pattern.name()))?;
    } else if let Some(seed) = seeding.rng_seed {
        engine.seed_random_with(seeding.alive_probability, &mut StdRng::seed_from_u64(seed))?;
    } else {
        engine.seed_random(seeding.alive_probability)?;
    }

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_engine_with_seed_is_reproducible() {
        let mut settings = Settings::default();
        settings.seeding.rng_seed = Some(7);

        let a = build_engine(&settings).unwrap();
        let b = build_engine(&settings).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!((a.rows(), a.columns()), (30, 50));
    }

    #[test]
    fn test_build_engine_from_pattern() {
        let mut settings = Settings::default();
        settings.grid.rows = 6;
        settings.grid.columns = 6;
        settings.seeding.pattern = Some(Pattern::Block);

        let engine = build_engine(&settings).unwrap();
        assert_eq!(engine.grid().living_cells(), vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_build_engine_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        std::fs::write(&path, "00000\n01110\n00000\n").unwrap();

        let mut settings = Settings::default();
        settings.seeding.pattern_file = Some(path);

        let engine = build_engine(&settings).unwrap();
        assert_eq!((engine.rows(), engine.columns()), (3, 5));
        assert_eq!(engine.living_count(), 3);
    }

    #[test]
    fn test_build_engine_rejects_negative_size() {
        let mut settings = Settings::default();
        settings.grid.rows = -3;
        let err = build_engine(&settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidDimension { rows: -3, .. })
        ));
    }
}
