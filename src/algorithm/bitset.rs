use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog indices, used as a cell's candidate domain
///
/// Indices are 0-based positions in the tile catalog. Provides O(1)
/// membership testing and in-place intersection for domain filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
        }
    }

    /// Number of catalog indices this set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index; indices past the capacity are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile index
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    ///
    /// Returns whether any member was removed.
    pub fn intersect_with(&mut self, other: &Self) -> bool {
        let before = self.count();
        self.bits &= &other.bits;
        self.count() != before
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Keep only the given tile, which must already be a member to survive
    pub fn retain_only(&mut self, tile: usize) {
        let keep = self.contains(tile);
        self.bits.fill(false);
        if keep {
            self.bits.set(tile, true);
        }
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The `n`-th member in ascending index order
    pub fn nth_member(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Iterate over members in ascending index order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
