//! Spatial data structures: tiles, cells and the grid
//!
//! This module contains:
//! - Tile variants, sides and the catalog
//! - Per-cell domain state
//! - The fixed-size grid and neighbor lookup

/// Per-position solver state
pub mod cell;
/// Grid storage and neighbor lookup
pub mod grid;
/// Tile variants and catalogs
pub mod tiles;

pub use cell::Cell;
pub use grid::{Grid, Position};
pub use tiles::{Side, TileCatalog, TileVariant};
