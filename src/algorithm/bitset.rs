use bitvec::prelude::*;

/// Fixed-size bitset for tile membership in adjacency sets
///
/// Tiles are 0-based indices into the tile set. Membership tests are O(1),
/// which keeps the per-neighbor violation check in the annealing loop cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Insert a tile index, ignoring indices outside the set
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity of the set
    pub const fn max_tiles(&self) -> usize {
        self.max_tiles
    }

    /// Iterate over the member tile indices in ascending order
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.members().collect()
    }
}
