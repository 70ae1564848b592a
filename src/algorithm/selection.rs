//! Lowest-entropy cell selection with uniform random tie-breaking

use crate::algorithm::random::RandomSource;
use crate::spatial::grid::{Grid, Position};

/// Uncollapsed cells sharing the lowest entropy on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyCandidates {
    /// Domain size shared by every candidate
    pub entropy: usize,
    /// Tied cells in row-major order
    pub positions: Vec<Position>,
}

/// Scan the uncollapsed cells once, keeping those tied at the minimum entropy
///
/// Returns `None` when every cell is collapsed. Cells with an empty domain
/// have entropy 0 and therefore win the scan, which is how contradictions
/// reach the collapse step.
pub fn lowest_entropy_candidates(grid: &Grid) -> Option<EntropyCandidates> {
    let mut best_entropy = usize::MAX;
    let mut positions = Vec::new();

    for cell in grid.uncollapsed_cells() {
        let entropy = cell.entropy();
        if entropy == best_entropy {
            positions.push(cell.position());
        } else if entropy < best_entropy {
            best_entropy = entropy;
            positions.clear();
            positions.push(cell.position());
        }
    }

    (!positions.is_empty()).then_some(EntropyCandidates {
        entropy: best_entropy,
        positions,
    })
}

/// Pick one of the lowest-entropy cells uniformly at random
pub fn select_lowest_entropy<R: RandomSource>(grid: &Grid, random: &mut R) -> Option<Position> {
    let candidates = lowest_entropy_candidates(grid)?;
    random.choose(&candidates.positions).copied()
}
