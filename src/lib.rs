//! Edge-matching tile grids generated by simulated annealing
//!
//! A grid of tiles is scored by how many neighboring pairs violate a
//! precomputed adjacency relation, plus a penalty for uneven tile usage.
//! The annealer perturbs one violated cell at a time, rescoring only the
//! cell and its neighbors, and keeps the best grid it sees.

#![forbid(unsafe_code)]

/// Annealing driver, tile bitsets and repair sweeps
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Energy and schedule math
pub mod math;
/// Grid state, adjacency relation and tile source
pub mod spatial;

pub use algorithm::annealer::{AnnealConfig, AnnealOutcome, AnnealState, Annealer};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{AdjacencyIndex, Direction, GridState, TileSource};
