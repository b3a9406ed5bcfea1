use crate::palette::{Color, Palette};
use crate::spatial::Grid;

/// Block-diagonal "log cabin" layout
///
/// Tiles the grid with `block_size` square blocks, clipped at the edges. A
/// block whose top-left cell is (top, left) takes palette color
/// `floor((top + left) / block_size) mod n`. The result is never balanced;
/// balancing would break the block structure.
pub fn log_cabin(rows: usize, cols: usize, palette: &Palette, block_size: usize) -> Grid {
    let block = block_size.max(1);
    let palette_len = palette.len().max(1);

    Grid::from_fn(rows, cols, |row, col| {
        let top = row - row % block;
        let left = col - col % block;
        Some(Color::new(((top + left) / block) % palette_len))
    })
}
