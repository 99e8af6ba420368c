//! Game of Life core functionality

pub mod grid;
pub mod io;
pub mod patterns;
pub mod rules;
pub mod snapshot;

pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use io::{create_example_grids, grid_to_string, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use patterns::Pattern;
pub use rules::GameOfLifeRules;
pub use snapshot::Snapshot;
