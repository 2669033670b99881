//! Grid of tile assignments with incrementally maintained violation scores
//!
//! Every cell always holds a tile. Alongside the assignment the grid keeps a
//! per-cell violation score (how many existing neighbors are not permitted by
//! the adjacency index) and a per-tile usage count. Both are updated locally
//! whenever a cell changes, so reading the energy never rescans the grid.
//!
//! Arrays are indexed `[y, x]` (row-major).

use ndarray::Array2;
use rand::Rng;

use crate::algorithm::annealer::AnnealState;
use crate::io::configuration::{DEFAULT_BALANCE_WEIGHT, MAX_GRID_DIMENSION};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::balance::usage_imbalance;
use crate::spatial::adjacency::{AdjacencyIndex, Direction};
use crate::spatial::tiles::TileSource;

/// Token returned by a move, holding what is needed to revert it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveUndo {
    x: usize,
    y: usize,
    previous: usize,
}

impl MoveUndo {
    /// Cell `(x, y)` the move changed
    pub const fn cell(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Tile the cell held before the move
    pub const fn previous_tile(&self) -> usize {
        self.previous
    }
}

/// Tile assignment, violation scores and usage counts for a fixed-size grid
///
/// The adjacency index is borrowed, never copied: it must outlive every grid
/// built on it and stay unchanged while they exist.
#[derive(Debug)]
pub struct GridState<'a> {
    adjacency: &'a AdjacencyIndex,
    source: TileSource,
    tiles: Array2<usize>,
    scores: Array2<u8>,
    counts: Vec<usize>,
    total_violations: usize,
    balance_weight: f64,
}

impl<'a> GridState<'a> {
    /// Fill a `width` x `height` grid with tiles drawn from `source`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - `source` and `adjacency` disagree on the number of tiles
    pub fn new<R: Rng + ?Sized>(
        adjacency: &'a AdjacencyIndex,
        source: TileSource,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let tiles = Array2::from_shape_simple_fn((height, width), || source.draw(rng));
        Self::from_tiles(adjacency, source, tiles)
    }

    /// Build a grid from an explicit `[y, x]` assignment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - `source` and `adjacency` disagree on the number of tiles
    /// - The assignment contains a tile outside the tile set
    pub fn from_tiles(
        adjacency: &'a AdjacencyIndex,
        source: TileSource,
        tiles: Array2<usize>,
    ) -> Result<Self> {
        let (height, width) = tiles.dim();
        check_dimensions(width, height)?;

        let tile_count = source.tile_count();
        if tile_count != adjacency.tile_count() {
            return Err(invalid_parameter(
                "tile_source",
                &tile_count,
                &format!(
                    "adjacency index covers {} tiles",
                    adjacency.tile_count()
                ),
            ));
        }

        let mut counts = vec![0; tile_count];
        for &tile in &tiles {
            let count = counts
                .get_mut(tile)
                .ok_or(AlgorithmError::InvalidTileIndex {
                    index: tile,
                    max_tiles: tile_count,
                })?;
            *count += 1;
        }

        let mut state = Self {
            adjacency,
            source,
            tiles,
            scores: Array2::zeros((height, width)),
            counts,
            total_violations: 0,
            balance_weight: DEFAULT_BALANCE_WEIGHT,
        };
        state.rescore_all();
        Ok(state)
    }

    /// Replace the weight of the usage-imbalance term
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `weight` is negative or not finite
    pub fn with_balance_weight(mut self, weight: f64) -> Result<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid_parameter(
                "balance_weight",
                &weight,
                &"must be a non-negative finite number",
            ));
        }
        self.balance_weight = weight;
        Ok(self)
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile at `(x, y)`
    pub fn tile(&self, x: usize, y: usize) -> Option<usize> {
        self.tiles.get([y, x]).copied()
    }

    /// Tile assignment indexed `[y, x]`
    pub const fn tiles(&self) -> &Array2<usize> {
        &self.tiles
    }

    /// Violation scores indexed `[y, x]`
    pub const fn scores(&self) -> &Array2<u8> {
        &self.scores
    }

    /// Usage count per tile
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Sum of all cell scores
    pub const fn total_violations(&self) -> usize {
        self.total_violations
    }

    /// Weight of the usage-imbalance term
    pub const fn balance_weight(&self) -> f64 {
        self.balance_weight
    }

    /// Adjacency index the grid is scored against
    pub const fn adjacency(&self) -> &'a AdjacencyIndex {
        self.adjacency
    }

    /// Tile source used for random draws
    pub const fn source(&self) -> TileSource {
        self.source
    }

    /// Composite cost: violations plus weighted usage imbalance
    ///
    /// A grid without violations always has energy 0, however unevenly its
    /// tiles are used.
    pub fn energy(&self) -> f64 {
        if self.total_violations == 0 {
            return 0.0;
        }
        self.balance_weight
            .mul_add(
                usage_imbalance(&self.counts, self.cell_count()),
                self.total_violations as f64,
            )
    }

    /// Count the existing neighbors of `(x, y)` its tile does not permit
    ///
    /// Cells on the border have fewer neighbors; a missing neighbor is never
    /// a violation. Out-of-range cells score 0.
    pub fn check(&self, x: usize, y: usize) -> usize {
        let Some(tile) = self.tile(x, y) else {
            return 0;
        };
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.neighbor(x, y, direction)
                    .and_then(|(nx, ny)| self.tile(nx, ny))
                    .map(|neighbor| (direction, neighbor))
            })
            .filter(|&(direction, neighbor)| !self.adjacency.permits(tile, direction, neighbor))
            .count()
    }

    /// Coordinates one step in `direction` from `(x, y)`, if inside the grid
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width() && ny < self.height()).then_some((nx, ny))
    }

    /// Put `tile` at `(x, y)`, keeping counts and scores consistent
    ///
    /// Returns the tile previously held by the cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid or `tile` is outside
    /// the tile set
    pub fn replace_tile(&mut self, x: usize, y: usize, tile: usize) -> Result<usize> {
        if tile >= self.counts.len() {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.counts.len(),
            });
        }
        let (width, height) = (self.width(), self.height());
        if x >= width || y >= height {
            return Err(invalid_parameter(
                "cell",
                &format!("({x}, {y})"),
                &format!("outside {width}x{height} grid"),
            ));
        }
        Ok(self.set_tile(x, y, tile))
    }

    // Callers guarantee the cell is inside the grid and the tile inside the set
    fn set_tile(&mut self, x: usize, y: usize, tile: usize) -> usize {
        let Some(cell) = self.tiles.get_mut([y, x]) else {
            return tile;
        };
        let previous = std::mem::replace(cell, tile);
        if previous == tile {
            return previous;
        }

        if let Some(count) = self.counts.get_mut(previous) {
            *count -= 1;
        }
        if let Some(count) = self.counts.get_mut(tile) {
            *count += 1;
        }
        self.rescore_around(x, y);
        previous
    }

    // Rejection sampling: uniform over violated cells without keeping a list
    fn pick_violated_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.total_violations == 0 {
            return None;
        }
        loop {
            let x = rng.random_range(0..self.width());
            let y = rng.random_range(0..self.height());
            if self.scores.get([y, x]).is_some_and(|&score| score > 0) {
                return Some((x, y));
            }
        }
    }

    fn rescore_all(&mut self) {
        self.total_violations = 0;
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.rescore(x, y);
            }
        }
    }

    // A score depends only on the cell and its direct neighbors
    fn rescore_around(&mut self, x: usize, y: usize) {
        self.rescore(x, y);
        for direction in Direction::ALL {
            if let Some((nx, ny)) = self.neighbor(x, y, direction) {
                self.rescore(nx, ny);
            }
        }
    }

    fn rescore(&mut self, x: usize, y: usize) {
        let score = self.check(x, y) as u8;
        if let Some(slot) = self.scores.get_mut([y, x]) {
            self.total_violations = self.total_violations - usize::from(*slot) + usize::from(score);
            *slot = score;
        }
    }
}

impl AnnealState for GridState<'_> {
    type Undo = MoveUndo;

    fn energy(&self) -> f64 {
        Self::energy(self)
    }

    fn do_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<MoveUndo> {
        let (x, y) = self.pick_violated_cell(rng)?;
        let tile = self.source.draw(rng);
        let previous = self.set_tile(x, y, tile);
        Some(MoveUndo { x, y, previous })
    }

    fn undo_move(&mut self, undo: MoveUndo) {
        self.set_tile(undo.x, undo.y, undo.previous);
    }

    fn deep_copy(&self) -> Self {
        Self {
            adjacency: self.adjacency,
            source: self.source,
            tiles: self.tiles.clone(),
            scores: self.scores.clone(),
            counts: self.counts.clone(),
            total_violations: self.total_violations,
            balance_weight: self.balance_weight,
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(AlgorithmError::InvalidDimensions { width, height });
    }
    Ok(())
}
