//! Directional tile compatibility relation
//!
//! The index is built once (from pixel edges or connector codes, see
//! `io::tileset`) and only ever queried afterwards. It is not checked for
//! symmetry: if `b` is allowed east of `a` but `a` is not allowed west of `b`,
//! the pair simply scores a violation from one side only. Keeping the relation
//! consistent is the builder's responsibility.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};

/// One of the four orthogonal grid directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row `y - 1`
    North,
    /// Towards column `x + 1`
    East,
    /// Towards row `y + 1`
    South,
    /// Towards column `x - 1`
    West,
}

impl Direction {
    /// All directions in N, E, S, W order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Unit step `(dx, dy)` for this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Position of this direction in `ALL`
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

/// Read-only mapping from `(tile, direction)` to the tiles allowed one step away
///
/// `compatible(a, East).contains(b)` means `b` may sit directly east of `a`.
#[derive(Clone, Debug)]
pub struct AdjacencyIndex {
    tile_count: usize,
    // Indexed by tile * 4 + direction
    allowed: Vec<TileBitset>,
}

impl AdjacencyIndex {
    /// Create an index over `tile_count` tiles where nothing is compatible
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if `tile_count` is zero
    pub fn new(tile_count: usize) -> Result<Self> {
        if tile_count == 0 {
            return Err(AlgorithmError::EmptyTileSet);
        }
        Ok(Self {
            tile_count,
            allowed: vec![TileBitset::new(tile_count); tile_count * Direction::ALL.len()],
        })
    }

    /// Build an index by evaluating `predicate(a, direction, b)` for every ordered pair
    ///
    /// # Errors
    ///
    /// Returns `EmptyTileSet` if `tile_count` is zero
    pub fn from_predicate<F>(tile_count: usize, mut predicate: F) -> Result<Self>
    where
        F: FnMut(usize, Direction, usize) -> bool,
    {
        let mut index = Self::new(tile_count)?;
        for a in 0..tile_count {
            for direction in Direction::ALL {
                for b in 0..tile_count {
                    if predicate(a, direction, b) {
                        index.allow(a, direction, b)?;
                    }
                }
            }
        }
        Ok(index)
    }

    /// Permit `neighbor` to sit one step in `direction` from `tile`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if either tile is outside the set
    pub fn allow(&mut self, tile: usize, direction: Direction, neighbor: usize) -> Result<()> {
        self.check_tile(neighbor)?;
        let slot = self.slot(tile, direction)?;
        if let Some(set) = self.allowed.get_mut(slot) {
            set.insert(neighbor);
        }
        Ok(())
    }

    /// Permit the pair in both directions (`neighbor` in `direction` of `tile` and back)
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileIndex` if either tile is outside the set
    pub fn allow_pair(&mut self, tile: usize, direction: Direction, neighbor: usize) -> Result<()> {
        self.allow(tile, direction, neighbor)?;
        self.allow(neighbor, direction.opposite(), tile)
    }

    /// Tiles allowed one step in `direction` from `tile`
    ///
    /// Out-of-range tiles yield `None`; an in-range tile with nothing
    /// compatible yields an empty set.
    pub fn compatible(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.slot(tile, direction)
            .ok()
            .and_then(|slot| self.allowed.get(slot))
    }

    /// Whether `neighbor` may sit one step in `direction` from `tile`
    pub fn permits(&self, tile: usize, direction: Direction, neighbor: usize) -> bool {
        self.compatible(tile, direction)
            .is_some_and(|set| set.contains(neighbor))
    }

    /// Number of tiles the index covers
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    fn check_tile(&self, tile: usize) -> Result<()> {
        if tile < self.tile_count {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.tile_count,
            })
        }
    }

    fn slot(&self, tile: usize, direction: Direction) -> Result<usize> {
        self.check_tile(tile)?;
        Ok(tile * Direction::ALL.len() + direction.index())
    }
}
