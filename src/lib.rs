//! Connector-matching tile grid generation with a lowest-entropy collapse solver
//!
//! Every cell starts with the whole tile catalog as candidates. The solver
//! repeatedly collapses the most constrained cell to a random candidate and
//! filters its neighbors so that adjacent tiles agree on whether a connector
//! crosses their shared edge.

#![forbid(unsafe_code)]

/// Solver core: domain sets, selection, propagation and the step driver
pub mod algorithm;
/// Command-line host, configuration, error handling and text export
pub mod io;
/// Tiles, cells and the grid they live on
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig, SolverState, StepStatus};
pub use algorithm::propagation::PropagationMode;
pub use algorithm::random::{RandomSelector, RandomSource};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{Cell, Grid, Position, Side, TileCatalog, TileVariant};
