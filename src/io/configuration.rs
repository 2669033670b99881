//! Tunable defaults for annealing and tile tooling

// Grid shape used when the caller gives none
/// Default grid width in tiles
pub const DEFAULT_WIDTH: usize = 32;
/// Default grid height in tiles
pub const DEFAULT_HEIGHT: usize = 18;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Starting temperature of the exponential schedule
pub const DEFAULT_MAX_TEMPERATURE: f64 = 2.0;
/// Temperature the schedule approaches on the final step
pub const DEFAULT_MIN_TEMPERATURE: f64 = 0.01;
/// Annealing step budget
pub const DEFAULT_STEPS: usize = 1_000_000;

// Only matters once violations are comparably small
/// Weight of the usage-imbalance term in the grid energy
pub const DEFAULT_BALANCE_WEIGHT: f64 = 10.0;

/// Mean RGBA distance below which two tile edges are considered matching
pub const DEFAULT_EDGE_THRESHOLD: f64 = 8.0;

/// Number of leading connector digits in a tile file name (N, E, S, W)
pub const CONNECTOR_CODE_LENGTH: usize = 4;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Repair sweeps applied to the annealed grid unless overridden
pub const DEFAULT_REPAIR_PASSES: usize = 0;

// Progress bar display settings
/// Steps between progress bar refreshes
pub const PROGRESS_UPDATE_INTERVAL: usize = 1_000;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// File name used when no output path is given
pub const DEFAULT_OUTPUT_NAME: &str = "output.png";
