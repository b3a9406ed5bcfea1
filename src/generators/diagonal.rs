use crate::palette::{Color, Palette};
use crate::spatial::Grid;

/// Diagonal stripes: cell (row, col) takes palette color `(row + col) mod n`
pub fn diagonal(rows: usize, cols: usize, palette: &Palette) -> Grid {
    let palette_len = palette.len().max(1);
    Grid::from_fn(rows, cols, |row, col| {
        Some(Color::new((row + col) % palette_len))
    })
}
