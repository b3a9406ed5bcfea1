use bitvec::vec::BitVec;
use rand::Rng;

use crate::palette::{Color, Palette};
use crate::spatial::Grid;

/// Output of the local-exclusion random fill before balancing
#[derive(Debug, Clone)]
pub struct RandomFill {
    /// Filled grid, possibly unbalanced
    pub grid: Grid,
    /// Row-major flags marking cells that took the fallback color
    pub fallback_cells: BitVec,
}

impl RandomFill {
    /// Coordinates of every cell that took the fallback color
    pub fn fallback_positions(&self) -> Vec<(usize, usize)> {
        let cols = self.grid.cols().max(1);
        self.fallback_cells
            .iter_ones()
            .map(|index| (index / cols, index % cols))
            .collect()
    }
}

/// Fill cells in row-major order avoiding identical neighbors
///
/// A color is valid for a cell while its running count is below `target` and
/// none of the 8 neighbors holds it. The color is drawn uniformly from the
/// valid set. When no color is valid the first palette color is used anyway
/// and the cell is flagged as a fallback; the balancer repairs the resulting
/// counts afterwards.
pub fn random_fill(
    rows: usize,
    cols: usize,
    palette: &Palette,
    target: usize,
    rng: &mut impl Rng,
) -> RandomFill {
    let mut grid = Grid::new(rows, cols);
    let mut counts = vec![0_usize; palette.len()];
    let mut fallback_cells = BitVec::repeat(false, rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            let valid: Vec<Color> = palette
                .colors()
                .filter(|&color| {
                    counts.get(color.index()).is_some_and(|&count| count < target)
                        && !grid.has_neighbor_with(row, col, color)
                })
                .collect();

            let color = if valid.is_empty() {
                fallback_cells.set(grid.index_of(row, col), true);
                palette.first()
            } else {
                valid
                    .get(rng.random_range(0..valid.len()))
                    .copied()
                    .unwrap_or_else(|| palette.first())
            };

            if let Some(cell) = grid.cell_mut(row, col) {
                *cell = Some(color);
            }
            if let Some(count) = counts.get_mut(color.index()) {
                *count += 1;
            }
        }
    }

    RandomFill {
        grid,
        fallback_cells,
    }
}
