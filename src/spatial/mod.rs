//! Spatial data structures for the tile grid
//!
//! This module contains:
//! - Directions and the tile adjacency relation
//! - The uniform tile source
//! - Grid state with incremental violation scoring

/// Directional tile compatibility index
pub mod adjacency;
/// Grid state management and incremental scoring
pub mod grid;
/// Random tile supply
pub mod tiles;

pub use adjacency::{AdjacencyIndex, Direction};
pub use grid::{GridState, MoveUndo};
pub use tiles::TileSource;
