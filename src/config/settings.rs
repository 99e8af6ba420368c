//! Configuration settings for the Game of Life simulator

use crate::engine::{Speed, DEFAULT_ALIVE_PROBABILITY, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::game_of_life::{Grid, Pattern};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub seeding: SeedingConfig,
    pub playback: PlaybackConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: i64,
    pub columns: i64,
}

/// How the board is populated before the first generation.
/// A pattern file wins over a built-in pattern, which wins over random seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    pub alive_probability: f64,
    pub rng_seed: Option<u64>,
    pub pattern: Option<Pattern>,
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub speed_ms: u64,
    pub generations: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_intermediate: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                rows: DEFAULT_ROWS as i64,
                columns: DEFAULT_COLUMNS as i64,
            },
            seeding: SeedingConfig {
                alive_probability: DEFAULT_ALIVE_PROBABILITY,
                rng_seed: None,
                pattern: None,
                pattern_file: None,
            },
            playback: PlaybackConfig {
                speed_ms: Speed::DEFAULT.as_millis(),
                generations: 100,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_intermediate: false,
                output_directory: PathBuf::from("output/generations"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows <= 0 || self.grid.columns <= 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.rows, self.grid.columns
            );
        }

        let rows = usize::try_from(self.grid.rows).ok();
        let columns = usize::try_from(self.grid.columns).ok();
        if rows.zip(columns).and_then(|(r, c)| Grid::cell_count(r, c)).is_none() {
            anyhow::bail!(
                "Grid of {}x{} cells is too large",
                self.grid.rows, self.grid.columns
            );
        }

        if !(0.0..=1.0).contains(&self.seeding.alive_probability) {
            anyhow::bail!(
                "Alive probability must be within [0, 1], got {}",
                self.seeding.alive_probability
            );
        }

        Speed::new(self.playback.speed_ms).context("Invalid playback speed")?;

        if let Some(ref pattern_file) = self.seeding.pattern_file {
            if !pattern_file.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern_file.display());
            }
        }

        Ok(())
    }

    pub fn speed(&self) -> Speed {
        Speed::clamped(self.playback.speed_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(columns) = cli_overrides.columns {
            self.grid.columns = columns;
        }
        if let Some(probability) = cli_overrides.alive_probability {
            self.seeding.alive_probability = probability;
        }
        if let Some(seed) = cli_overrides.rng_seed {
            self.seeding.rng_seed = Some(seed);
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.seeding.pattern = Some(pattern);
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.seeding.pattern_file = Some(pattern_file.clone());
        }
        if let Some(speed_ms) = cli_overrides.speed_ms {
            self.playback.speed_ms = speed_ms;
        }
        if let Some(generations) = cli_overrides.generations {
            self.playback.generations = generations;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub alive_probability: Option<f64>,
    pub rng_seed: Option<u64>,
    pub pattern: Option<Pattern>,
    pub pattern_file: Option<PathBuf>,
    pub speed_ms: Option<u64>,
    pub generations: Option<u64>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}
