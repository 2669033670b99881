//! Input/output: CLI, tile loading, rendering, progress and errors

/// Command-line parsing and the end-to-end pipeline
pub mod cli;
/// Tunable defaults
pub mod configuration;
/// Error types
pub mod error;
/// Grid compositing and PNG export
pub mod image;
/// Annealing progress display
pub mod progress;
/// Tile directory loading and adjacency construction
pub mod tileset;
