//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, GridConfig, OutputConfig, OutputFormat, PlaybackConfig, SeedingConfig, Settings,
};
