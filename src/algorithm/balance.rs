use crate::algorithm::validation::count_colors;
use crate::io::error::Result;
use crate::palette::Color;
use crate::spatial::Grid;
use crate::spatial::quota::ensure_balanceable;

/// One cell changed by the balancer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recolor {
    /// Row of the changed cell
    pub row: usize,
    /// Column of the changed cell
    pub col: usize,
    /// Donor color the cell held before
    pub from: Color,
    /// Deficient color the cell holds now
    pub to: Color,
}

/// Greedily recolor cells until every palette color reaches `target`
///
/// Colors are topped up in palette order. Each missing unit is taken from the
/// first color in palette order that is above target, by flipping the first
/// row-major cell holding it. A color that cannot be topped up because no
/// donor remains is left short. Returns the changed cells in the order they
/// were flipped; a balanced grid yields no changes.
///
/// # Errors
///
/// Returns `Unbalanceable` without touching the grid unless
/// `rows * cols == palette_len * target`
pub fn balance_colors(
    grid: &mut Grid,
    palette_len: usize,
    target: usize,
) -> Result<Vec<Recolor>> {
    ensure_balanceable(grid.cell_count(), palette_len, target)?;

    let mut counts = count_colors(grid, palette_len, target).as_slice().to_vec();
    let mut changes = Vec::new();

    for deficient in 0..palette_len {
        while counts.get(deficient).is_some_and(|&count| count < target) {
            let Some(donor) = (0..palette_len).find(|&index| {
                index != deficient && counts.get(index).is_some_and(|&count| count > target)
            }) else {
                break;
            };

            let from = Color::new(donor);
            let to = Color::new(deficient);
            let Some(((row, col), _)) = grid.cells().find(|&(_, cell)| cell == Some(from)) else {
                break;
            };

            grid.set(row, col, to)?;
            if let Some(count) = counts.get_mut(donor) {
                *count -= 1;
            }
            if let Some(count) = counts.get_mut(deficient) {
                *count += 1;
            }
            changes.push(Recolor { row, col, from, to });
        }
    }

    if !changes.is_empty() {
        log::debug!("balancer recolored {} cells", changes.len());
    }

    Ok(changes)
}
