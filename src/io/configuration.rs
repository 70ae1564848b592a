//! Solver limits and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// A 1000 px square window drawn with 10 px cells
/// Default number of columns
pub const DEFAULT_WIDTH: usize = 100;
/// Default number of rows
pub const DEFAULT_HEIGHT: usize = 100;

/// Whole-grid attempts before giving up on contradictions
pub const DEFAULT_ATTEMPTS: usize = 1;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Text export
/// Character drawn for a cell that is still undecided
pub const UNDECIDED_GLYPH: char = '?';
/// Character drawn for a cell with no candidates left
pub const CONTRADICTION_GLYPH: char = '!';

/// Progress bar refresh interval, in collapsed cells
pub const PROGRESS_REFRESH_CELLS: usize = 64;
