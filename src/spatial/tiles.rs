//! Uniform random supply of tile indices

use crate::io::error::{AlgorithmError, Result};
use rand::Rng;

/// Draws tiles uniformly from `0..tile_count`
///
/// Holds no generator of its own; callers pass the run's seeded `Rng` so a
/// whole annealing run is reproducible from one seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSource {
    tile_count: usize,
}

impl TileSource {
    /// Create a source over `tile_count` distinct tiles
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if `tile_count` is zero
    pub fn uniform(tile_count: usize) -> Result<Self> {
        if tile_count == 0 {
            return Err(AlgorithmError::EmptyTileSet);
        }
        Ok(Self { tile_count })
    }

    /// Number of distinct tiles
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Draw one tile index
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.tile_count)
    }
}
