//! Command-line front end for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life::{
    build_engine,
    config::{CliOverrides, OutputFormat, Settings},
    engine::{LifeEngine, RunLoop},
    game_of_life::{create_example_grids, load_grid_from_file, save_grid_to_file, Pattern, Snapshot},
    utils::{ColorOutput, GridFormatter},
};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life")]
#[command(about = "Conway's Game of Life on a bounded board")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation in the background loop, printing each generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of rows (overrides config)
        #[arg(long, allow_negative_numbers = true)]
        rows: Option<i64>,

        /// Number of columns (overrides config)
        #[arg(long, allow_negative_numbers = true)]
        columns: Option<i64>,

        /// Probability of a cell starting alive (overrides config)
        #[arg(short = 'p', long)]
        alive_probability: Option<f64>,

        /// Seed for reproducible random boards
        #[arg(long)]
        seed: Option<u64>,

        /// Start from a built-in pattern instead of a random board
        #[arg(long, value_enum)]
        pattern: Option<Pattern>,

        /// Start from a pattern file instead of a random board
        #[arg(long)]
        pattern_file: Option<PathBuf>,

        /// Milliseconds per generation (overrides config)
        #[arg(short, long)]
        speed: Option<u64>,

        /// Number of generations to run (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Output format for saved generations
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save every generation, not just the last one
        #[arg(long)]
        save_intermediate: bool,

        /// Only print the final generation
        #[arg(short, long)]
        quiet: bool,
    },

    /// Advance a pattern file a fixed number of generations
    Step {
        /// Pattern file to start from
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,

        /// Where to write the resulting grid
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every intermediate generation
        #[arg(long)]
        show_each: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a pattern file with coordinates and statistics
    Show {
        /// Pattern file to display
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ColorOutput::error(&format!("❌ {:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config, rows, columns, alive_probability, seed, pattern, pattern_file,
            speed, generations, format, output, save_intermediate, quiet,
        } => {
            let overrides = CliOverrides {
                rows,
                columns,
                alive_probability,
                rng_seed: seed,
                pattern,
                pattern_file,
                speed_ms: speed,
                generations,
                format,
                output_dir: output,
            };
            run_command(config, overrides, save_intermediate, quiet)
        }
        Commands::Step { input, count, output, show_each } => {
            step_command(input, count, output, show_each)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { input } => show_command(input),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    save_intermediate: bool,
    quiet: bool,
) -> Result<()> {
    let mut settings = Settings::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(&overrides);
    settings.output.save_intermediate |= save_intermediate;
    settings.validate().context("Configuration validation failed")?;

    let engine = build_engine(&settings).context("Failed to create engine")?;
    let target = settings.playback.generations;
    let output_dir = settings.output.output_directory.clone();
    let format = settings.output.format;

    println!("{}", ColorOutput::info(&format!(
        "▶ Running {}x{} board for {} generations at {}",
        engine.rows(), engine.columns(), target, settings.speed()
    )));
    if !quiet {
        print_generation(0, engine.grid(), &settings);
    }
    if settings.output.save_intermediate {
        GridFormatter::save_generation(&Snapshot::new(0, engine.snapshot()), &output_dir, format)?;
    }

    let started = Instant::now();
    let engine = if target == 0 {
        engine
    } else {
        let (tx, rx) = mpsc::channel();
        let mut run_loop = RunLoop::new(engine, settings.speed());
        run_loop.start_with(Box::new(move |generation, grid| {
            if tx.send(Snapshot::new(generation, grid.clone())).is_err() || generation >= target {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }))?;

        // Ends once the observer has been dropped with the worker
        for snapshot in rx {
            if !quiet {
                print_generation(snapshot.generation, &snapshot.grid, &settings);
            }
            if settings.output.save_intermediate {
                GridFormatter::save_generation(&snapshot, &output_dir, format)?;
            }
        }

        run_loop.wait();
        run_loop.into_engine()
    };

    let last = Snapshot::new(engine.generation(), engine.snapshot());
    if quiet {
        print_generation(last.generation, &last.grid, &settings);
    }
    let path = GridFormatter::save_generation(&last, &output_dir, format)?;
    warn_if_extinct(&last.grid, last.generation);

    println!("{}", ColorOutput::success(&format!(
        "✅ Reached generation {} in {:.3}s, saved to {}",
        last.generation,
        started.elapsed().as_secs_f64(),
        path.display()
    )));
    Ok(())
}

fn print_generation(generation: u64, grid: &game_of_life::Grid, settings: &Settings) {
    println!("{}", GridFormatter::format_grid_compact(grid));
    println!("{}", ColorOutput::highlight(&GridFormatter::format_status(
        generation,
        grid,
        Some(settings.speed()),
    )));
}

fn warn_if_extinct(grid: &game_of_life::Grid, generation: u64) {
    if grid.is_empty() {
        println!("{}", ColorOutput::warning(&format!(
            "⚠️  No living cells left at generation {}",
            generation
        )));
    }
}

fn step_command(
    input: PathBuf,
    count: u64,
    output: Option<PathBuf>,
    show_each: bool,
) -> Result<()> {
    let grid = load_grid_from_file(&input)
        .with_context(|| format!("Failed to load pattern from {}", input.display()))?;
    let mut engine = LifeEngine::with_grid(grid)?;

    for _ in 0..count {
        engine.step();
        if show_each {
            println!("Generation {}:", engine.generation());
            println!("{}", GridFormatter::format_grid_compact(engine.grid()));
        }
    }

    if !show_each {
        println!("{}", GridFormatter::format_grid_compact(engine.grid()));
    }
    println!("{}", GridFormatter::format_status(engine.generation(), engine.grid(), None));
    warn_if_extinct(engine.grid(), engine.generation());

    if let Some(output) = output {
        save_grid_to_file(engine.grid(), &output)?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", output.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("input/patterns");
    let output_dir = directory.join("output/generations");

    for dir in [&config_dir, &patterns_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Skipped: {} (already exists, use --force to overwrite)",
            config_path.display()
        )));
    }

    create_example_grids(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");

    let mut glider = Settings::default();
    glider.seeding.pattern = Some(Pattern::Glider);
    glider.playback.generations = 40;
    glider.to_file(examples_dir.join("glider.yaml"))?;

    let mut seeded = Settings::default();
    seeded.seeding.rng_seed = Some(2024);
    seeded.playback.speed_ms = 50;
    seeded.output.format = OutputFormat::Json;
    seeded.output.save_intermediate = true;
    seeded.to_file(examples_dir.join("seeded.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn show_command(input: PathBuf) -> Result<()> {
    let grid = load_grid_from_file(&input)
        .with_context(|| format!("Failed to load pattern from {}", input.display()))?;

    println!("Pattern {} ({}x{}):", input.display(), grid.rows, grid.columns);
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    print!("{}", GridFormatter::format_statistics(&grid));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life", "run", "--config", "test.yaml", "--generations", "5",
            "--pattern", "glider", "--format", "json",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life", "-v", "step", "--input", "a.txt", "-n", "3"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Step { count: 3, .. }));
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("input/patterns/glider.txt").exists());

        let glider = Settings::from_file(temp_dir.path().join("config/examples/glider.yaml")).unwrap();
        assert_eq!(glider.seeding.pattern, Some(Pattern::Glider));
    }

    #[test]
    fn test_step_command() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out.txt");
        std::fs::write(&input, "000\n111\n000\n").unwrap();

        step_command(input, 1, Some(output.clone()), false).unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "010\n010\n010\n");
    }

    #[test]
    fn test_run_command_saves_final_generation() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("gens");
        let overrides = CliOverrides {
            rows: Some(6),
            columns: Some(6),
            pattern: Some(Pattern::Block),
            speed_ms: Some(10),
            generations: Some(3),
            output_dir: Some(output.clone()),
            ..Default::default()
        };

        run_command(temp_dir.path().join("missing.yaml"), overrides, true, true).unwrap();
        assert!(output.join("generation_00000.txt").exists());
        assert_eq!(
            std::fs::read_to_string(output.join("generation_00003.txt")).unwrap(),
            "000000\n000000\n001100\n001100\n000000\n000000\n"
        );
    }

    #[test]
    fn test_oversized_board_is_reported() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("missing.yaml");
        let output = temp_dir.path().join("gens");
        let cli = Cli::try_parse_from([
            "game_of_life", "run",
            "--config", config.to_str().unwrap(),
            "--output", output.to_str().unwrap(),
            "--rows", "8589934592", "--columns", "8589934592",
            "--quiet",
        ])
        .unwrap();

        let err = dispatch(cli.command).unwrap_err();
        assert!(format!("{:#}", err).contains("too large"));
        assert!(!output.exists());
    }

    #[test]
    fn test_step_command_to_extinction() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("lonely.txt");
        let output = temp_dir.path().join("out.txt");
        std::fs::write(&input, "000
010
000
").unwrap();

        step_command(input, 2, Some(output.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "000
000
000
");
    }
}
