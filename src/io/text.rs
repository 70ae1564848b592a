//! Text export of grid state for terminals and files

use crate::io::configuration::{CONTRADICTION_GLYPH, UNDECIDED_GLYPH};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{Cell, Grid};
use std::path::Path;

fn cell_glyph(cell: &Cell) -> char {
    match cell.chosen() {
        Some(tile) => tile.glyph(),
        None if cell.is_contradicted() => CONTRADICTION_GLYPH,
        None => UNDECIDED_GLYPH,
    }
}

fn render_rows(grid: &Grid, glyph: impl Fn(&Cell) -> char) -> String {
    let mut output = String::with_capacity((grid.width() + 1) * grid.height() * 3);
    for (index, cell) in grid.cells().enumerate() {
        output.push(glyph(cell));
        if (index + 1).is_multiple_of(grid.width()) {
            output.push('\n');
        }
    }
    output
}

/// Draw collapsed cells as box-drawing glyphs, one text line per grid row
///
/// Undecided cells show as `?` and cells with an empty domain as `!`.
pub fn render_grid(grid: &Grid) -> String {
    render_rows(grid, cell_glyph)
}

/// Draw each undecided cell's domain size as a base-36 digit
///
/// Collapsed cells show as `·`. Useful for inspecting a run stopped early.
pub fn render_entropy_map(grid: &Grid) -> String {
    render_rows(grid, |cell| {
        if cell.is_collapsed() {
            '·'
        } else {
            u32::try_from(cell.entropy())
                .ok()
                .and_then(|entropy| char::from_digit(entropy, 36))
                .unwrap_or('+')
        }
    })
}

/// Write text to a file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn write_text(text: &str, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    std::fs::write(output_path, text).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write file",
        source: e,
    })
}
