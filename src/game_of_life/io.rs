//! File I/O operations for Game of Life grids

use super::{Grid, Pattern};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from a string representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx, line.len(), width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| -> Result<bool> {
                match ch {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => anyhow::bail!(
                        "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                        ch, row_idx, col_idx
                    ),
                }
            })
            .collect::<Result<Vec<bool>>>()?;
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows * (grid.columns + 1));

    for row in grid.row_slices() {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Write one text file per built-in pattern into `output_dir`
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for pattern in Pattern::ALL {
        let path = dir.join(format!("{}.txt", pattern.name()));
        save_grid_to_file(&pattern.to_grid(), &path)?;
    }

    Ok(())
}
