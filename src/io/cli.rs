//! Command-line interface: load a tile directory, anneal a grid, write a PNG

use crate::algorithm::annealer::{AnnealConfig, Annealer};
use crate::algorithm::repair::repair;
use crate::io::configuration::{
    DEFAULT_BALANCE_WEIGHT, DEFAULT_EDGE_THRESHOLD, DEFAULT_HEIGHT, DEFAULT_MAX_TEMPERATURE,
    DEFAULT_MIN_TEMPERATURE, DEFAULT_OUTPUT_NAME, DEFAULT_REPAIR_PASSES, DEFAULT_SEED,
    DEFAULT_STEPS, DEFAULT_WIDTH,
};
use crate::io::error::Result;
use crate::io::image::export_grid_as_png;
use crate::io::progress::AnnealProgress;
use crate::io::tileset::{TileSet, default_output_path};
use crate::spatial::GridState;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "annealtile")]
#[command(
    author,
    version,
    about = "Generate edge-matching tile grids by simulated annealing"
)]
/// Command-line arguments for the tiling tool
pub struct Cli {
    /// Directory of equally sized PNG tiles
    #[arg(value_name = "TILE_DIR")]
    pub tiles: PathBuf,

    /// Output PNG path (defaults to output.png next to the tile directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Annealing step budget
    #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Starting temperature
    #[arg(long, default_value_t = DEFAULT_MAX_TEMPERATURE)]
    pub max_temp: f64,

    /// Final temperature
    #[arg(long, default_value_t = DEFAULT_MIN_TEMPERATURE)]
    pub min_temp: f64,

    /// Weight of the tile usage imbalance in the energy
    #[arg(short, long, default_value_t = DEFAULT_BALANCE_WEIGHT)]
    pub balance_weight: f64,

    /// Edge distance below which two tile borders match
    #[arg(short, long, default_value_t = DEFAULT_EDGE_THRESHOLD)]
    pub threshold: f64,

    /// Match tiles by NESW connector digits in their file names instead of pixels
    #[arg(short, long)]
    pub connectors: bool,

    /// Min-conflict repair passes applied to the annealed grid
    #[arg(short, long, default_value_t = DEFAULT_REPAIR_PASSES)]
    pub repair_passes: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Annealing schedule from the arguments
    pub const fn anneal_config(&self) -> AnnealConfig {
        AnnealConfig {
            max_temperature: self.max_temp,
            min_temperature: self.min_temp,
            steps: self.steps,
        }
    }

    /// Where the rendered grid is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.tiles, DEFAULT_OUTPUT_NAME))
    }
}

/// Outcome of one tool invocation
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Energy of the written grid
    pub energy: f64,
    /// Violations left in the written grid
    pub violations: usize,
    /// Annealing steps executed
    pub steps_run: usize,
    /// Annealing moves kept
    pub accepted_moves: usize,
    /// Repair passes executed after annealing
    pub repair_passes: usize,
    /// Path of the written PNG
    pub output: PathBuf,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

/// Runs the load, anneal, repair and export pipeline for parsed arguments
pub struct TileRunner {
    cli: Cli,
}

impl TileRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile directory cannot be loaded or holds no usable tiles
    /// - Connector mode is on and a tile name lacks a connector code
    /// - Grid dimensions or annealing parameters are invalid
    /// - The output image cannot be written
    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let cli = &self.cli;

        let tile_set = TileSet::load_dir(&cli.tiles)?;
        let adjacency = if cli.connectors {
            tile_set.connector_adjacency()?
        } else {
            tile_set.edge_adjacency(cli.threshold)?
        };
        let annealer = Annealer::new(cli.anneal_config())?;

        let mut rng = StdRng::seed_from_u64(cli.seed);
        let initial = GridState::new(
            &adjacency,
            tile_set.source()?,
            cli.width,
            cli.height,
            &mut rng,
        )?
        .with_balance_weight(cli.balance_weight)?;

        let progress = if cli.should_show_progress() {
            AnnealProgress::new(cli.steps)
        } else {
            AnnealProgress::hidden(cli.steps)
        };
        let outcome =
            annealer.run_with_observer(initial, &mut rng, |report| progress.observe(report));
        progress.finish(outcome.best_energy);

        let mut best = outcome.best;
        let repair_passes = repair(&mut best, &mut rng, cli.repair_passes)?;

        let output = cli.output_path();
        export_grid_as_png(&best, &tile_set, &output)?;

        let summary = RunSummary {
            energy: best.energy(),
            violations: best.total_violations(),
            steps_run: outcome.steps_run,
            accepted_moves: outcome.accepted_moves,
            repair_passes,
            output,
            elapsed: start_time.elapsed(),
        };
        self.report(&summary);
        Ok(summary)
    }

    // Allow print for user feedback on the finished run
    #[allow(clippy::print_stderr)]
    fn report(&self, summary: &RunSummary) {
        if self.cli.quiet {
            return;
        }
        eprintln!(
            "Wrote {} (energy {:.2}, {} violations, {} steps, {} accepted, {} repair passes, {:.1?})",
            summary.output.display(),
            summary.energy,
            summary.violations,
            summary.steps_run,
            summary.accepted_moves,
            summary.repair_passes,
            summary.elapsed
        );
        if summary.violations > 0 {
            eprintln!("Grid still has violations; try more steps or another seed");
        }
    }
}
