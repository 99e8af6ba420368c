//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::engine::Speed;
use crate::game_of_life::{grid_to_string, Grid, Snapshot};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// Text renderings of a board for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        grid.row_slices()
            .map(|row| row.iter().map(|&cell| if cell { '█' } else { '·' }).collect::<String>())
            .map(|line| line + "\n")
            .collect()
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::from("   ");
        output.push_str(&(0..grid.columns).map(|x| format!("{:2}", x % 10)).join(""));
        output.push('\n');

        for (y, row) in grid.row_slices().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary shown under the board
    pub fn format_status(generation: u64, grid: &Grid, speed: Option<Speed>) -> String {
        let mut status = format!(
            "Generation: {} | Living: {} | Density: {:.1}%",
            generation,
            grid.living_count(),
            grid.density() * 100.0
        );
        if let Some(speed) = speed {
            status.push_str(&format!(" | Speed: {}", speed));
        }
        status
    }

    /// Multi-line statistics block for a loaded pattern
    pub fn format_statistics(grid: &Grid) -> String {
        let living = grid.living_cells();
        let mut output = format!(
            "Grid Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            grid.rows,
            grid.columns,
            living.len(),
            grid.density() * 100.0
        );

        if let (Some((min_r, max_r)), Some((min_c, max_c))) = (
            living.iter().map(|&(r, _)| r).minmax().into_option(),
            living.iter().map(|&(_, c)| c).minmax().into_option(),
        ) {
            output.push_str(&format!(
                "  Bounding box: rows {}..={}, columns {}..={}\n",
                min_r, max_r, min_c, max_c
            ));
        }

        output
    }

    /// Path a generation is written to inside `output_dir`
    pub fn generation_path(output_dir: &Path, generation: u64, format: OutputFormat) -> PathBuf {
        let extension = match format {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        };
        output_dir.join(format!("generation_{:05}.{}", generation, extension))
    }

    /// Save one generation in the configured format
    pub fn save_generation(
        snapshot: &Snapshot,
        output_dir: &Path,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = Self::generation_path(output_dir, snapshot.generation, format);
        match format {
            OutputFormat::Text => std::fs::write(&path, grid_to_string(&snapshot.grid))
                .with_context(|| format!("Failed to write {}", path.display()))?,
            OutputFormat::Json => snapshot.save_to_file(&path)?,
        }
        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    pub fn highlight(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::parse_grid_from_string;
    use tempfile::tempdir;

    #[test]
    fn test_grid_formatting() {
        let grid = parse_grid_from_string("101\n010\n101\n").unwrap();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_status_line() {
        let grid = parse_grid_from_string("11\n00\n").unwrap();
        let status = GridFormatter::format_status(4, &grid, Some(Speed::DEFAULT));
        assert_eq!(status, "Generation: 4 | Living: 2 | Density: 50.0% | Speed: 100ms/gen");
    }

    #[test]
    fn test_statistics_bounding_box() {
        let grid = parse_grid_from_string("0000\n0100\n0011\n").unwrap();
        let stats = GridFormatter::format_statistics(&grid);
        assert!(stats.contains("Living cells: 3"));
        assert!(stats.contains("rows 1..=2, columns 1..=3"));

        let empty = GridFormatter::format_statistics(&Grid::new(2, 2));
        assert!(!empty.contains("Bounding box"));
    }

    #[test]
    fn test_save_generation() {
        let temp_dir = tempdir().unwrap();
        let snapshot = Snapshot::new(12, parse_grid_from_string("01\n10\n").unwrap());

        let text = GridFormatter::save_generation(&snapshot, temp_dir.path(), OutputFormat::Text).unwrap();
        assert!(text.ends_with("generation_00012.txt"));
        assert_eq!(std::fs::read_to_string(&text).unwrap(), "01\n10\n");

        let json = GridFormatter::save_generation(&snapshot, temp_dir.path(), OutputFormat::Json).unwrap();
        assert_eq!(Snapshot::load_from_file(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
