//! Fixed-size grid of cells with bounds-checked neighbor lookup
//!
//! Cells are stored row-major in an `ndarray::Array2` indexed `[y, x]`.
//! The grid is sized once at construction and never resized; solving only
//! mutates cells in place.

use ndarray::Array2;
use std::fmt;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::cell::Cell;
use crate::spatial::tiles::{Side, TileCatalog};

/// Column and row of a cell; `(0, 0)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, growing to the right
    pub x: usize,
    /// Row, growing downwards
    pub y: usize,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Adjacent collapsed cells whose facing connectors disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyMismatch {
    /// Cell on the near side of the shared edge
    pub position: Position,
    /// Direction from `position` to the other cell
    pub side: Side,
}

/// Width × height array of cells
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid whose every cell starts with the full catalog
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(width: usize, height: usize, catalog: &TileCatalog) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            Cell::new(Position::new(x, y), catalog)
        });

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; construction rejects empty grids
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at a position, if inside the grid
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get([position.y, position.x])
    }

    /// Mutable cell at a position, for drivers that collapse or filter cells
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut([position.y, position.x])
    }

    /// Cell at signed coordinates; `None` outside the grid
    ///
    /// Grid edges are an expected case, not an error.
    pub fn neighbor_at(&self, x: isize, y: isize) -> Option<&Cell> {
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.cell(Position::new(column, row))
    }

    /// Position across the given edge of a cell, if inside the grid
    pub fn neighbor_position(&self, position: Position, side: Side) -> Option<Position> {
        let [dx, dy] = side.offset();
        let x = position.x.checked_add_signed(dx)?;
        let y = position.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(Position::new(x, y))
    }

    /// Cell across the given edge of a cell
    pub fn neighbor(&self, position: Position, side: Side) -> Option<&Cell> {
        self.neighbor_position(position, side)
            .and_then(|neighbor| self.cell(neighbor))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Uncollapsed cells in row-major order
    ///
    /// The order is stable, which keeps seeded tie-breaks reproducible.
    pub fn uncollapsed_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| !cell.is_collapsed())
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell has been collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Shared edges between collapsed cells whose connector flags disagree
    ///
    /// Each edge is reported once, from its left or upper cell.
    pub fn adjacency_mismatches(&self) -> Vec<AdjacencyMismatch> {
        let mut mismatches = Vec::new();
        for cell in &self.cells {
            let Some(tile) = cell.chosen() else {
                continue;
            };
            for side in [Side::Right, Side::Bottom] {
                let Some(other) = self
                    .neighbor(cell.position(), side)
                    .and_then(Cell::chosen)
                else {
                    continue;
                };
                if tile.has_connector(side) != other.has_connector(side.opposite()) {
                    mismatches.push(AdjacencyMismatch {
                        position: cell.position(),
                        side,
                    });
                }
            }
        }
        mismatches
    }

    /// Return every cell to the full catalog
    pub fn reset(&mut self, catalog: &TileCatalog) {
        for cell in &mut self.cells {
            cell.reset(catalog);
        }
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be positive"));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
