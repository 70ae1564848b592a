//! Neighbor domain filtering after a collapse
//!
//! The default mode only touches the four direct neighbors of the collapsed
//! cell and never cascades, even when a neighbor is narrowed to one or zero
//! candidates. `FixedPoint` keeps filtering through a work queue until no
//! domain changes, which removes most late contradictions at the cost of a
//! different step-by-step trace.

use std::collections::{HashSet, VecDeque};

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{Side, TileCatalog};

/// How far a collapse is propagated through the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationMode {
    /// Filter the four direct neighbors only
    #[default]
    SingleHop,
    /// Keep filtering until no domain changes
    FixedPoint,
}

/// Cells whose domains changed during one propagation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells that lost at least one candidate, in the order they were narrowed
    ///
    /// A cell narrowed several times during fixed-point propagation appears once per narrowing.
    pub narrowed: Vec<Position>,
    /// Cells left with no candidates
    pub emptied: Vec<Position>,
}

impl PropagationReport {
    fn record(&mut self, position: Position, before: usize, after: usize) {
        if after < before {
            self.narrowed.push(position);
            if after == 0 {
                self.emptied.push(position);
            }
        }
    }
}

/// Propagate the tile fixed at `origin` according to `mode`
///
/// # Errors
///
/// Returns `Contradiction` if fixed-point propagation empties a domain.
/// Single-hop propagation never fails; emptied cells are only listed in the report.
pub fn propagate(
    grid: &mut Grid,
    catalog: &TileCatalog,
    origin: Position,
    mode: PropagationMode,
) -> Result<PropagationReport> {
    match mode {
        PropagationMode::SingleHop => Ok(propagate_single_hop(grid, catalog, origin)),
        PropagationMode::FixedPoint => propagate_to_fixed_point(grid, catalog, origin),
    }
}

/// Filter the direct neighbors of a collapsed cell against its chosen tile
///
/// Does nothing if `origin` is outside the grid or not collapsed.
pub fn propagate_single_hop(
    grid: &mut Grid,
    catalog: &TileCatalog,
    origin: Position,
) -> PropagationReport {
    let mut report = PropagationReport::default();
    let Some(tile) = grid.cell(origin).and_then(|cell| cell.chosen()) else {
        return report;
    };

    for side in Side::ALL {
        let Some(neighbor) = grid.neighbor_position(origin, side) else {
            continue;
        };
        let Some(cell) = grid.cell_mut(neighbor) else {
            continue;
        };
        if cell.is_collapsed() {
            continue;
        }

        let before = cell.entropy();
        let after = cell.restrict(catalog, side, tile.has_connector(side));
        report.record(neighbor, before, after);
    }

    report
}

/// Filter outward from `origin` until every domain is consistent with its neighbors
///
/// A neighbor is only constrained across an edge when every candidate of the
/// source cell agrees on the connector flag of that edge.
///
/// # Errors
///
/// Returns `Contradiction` at the first cell whose domain becomes empty.
pub fn propagate_to_fixed_point(
    grid: &mut Grid,
    catalog: &TileCatalog,
    origin: Position,
) -> Result<PropagationReport> {
    let mut report = PropagationReport::default();
    let mut queue = VecDeque::from([origin]);
    let mut queued = HashSet::from([origin]);

    while let Some(position) = queue.pop_front() {
        queued.remove(&position);
        let Some(domain) = grid.cell(position).map(|cell| cell.domain().clone()) else {
            continue;
        };

        for side in Side::ALL {
            let (any_without, any_with) = catalog.connector_flags(&domain, side);
            // Both flags still possible: nothing to tell the neighbor
            if any_without == any_with {
                continue;
            }

            let Some(neighbor) = grid.neighbor_position(position, side) else {
                continue;
            };
            let Some(cell) = grid.cell_mut(neighbor) else {
                continue;
            };
            if cell.is_collapsed() {
                continue;
            }

            let before = cell.entropy();
            let after = cell.restrict(catalog, side, any_with);
            report.record(neighbor, before, after);

            if after == 0 {
                return Err(AlgorithmError::Contradiction {
                    position: neighbor,
                    iteration: 0,
                });
            }
            if after < before && queued.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    Ok(report)
}
