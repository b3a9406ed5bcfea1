use crate::palette::{Color, Palette};
use crate::spatial::{Grid, Quota};

struct RankedCell {
    row: usize,
    col: usize,
    distance: f64,
}

/// Concentric color bands around two centers ("bug eye")
///
/// Cells are ranked by their distance to the nearer center. The stable sort
/// keeps row-major order among equal distances. The ranked sequence is cut
/// into one run per color, sized by the even [`Quota`] split, and the runs
/// take palette colors in order.
pub fn radial_two_center(
    rows: usize,
    cols: usize,
    palette: &Palette,
    centers: [(f64, f64); 2],
) -> Grid {
    let mut ranked: Vec<RankedCell> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .map(|(row, col)| {
            let distance = centers
                .iter()
                .map(|&(center_row, center_col)| {
                    (row as f64 - center_row).hypot(col as f64 - center_col)
                })
                .fold(f64::INFINITY, f64::min);
            RankedCell { row, col, distance }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let quota = Quota::new(rows * cols, palette.len());
    let mut grid = Grid::new(rows, cols);
    let mut color_index = 0;
    let mut assigned = 0;

    for cell in &ranked {
        if assigned >= quota.for_color(color_index) {
            color_index = (color_index + 1) % palette.len().max(1);
            assigned = 0;
        }
        if let Some(slot) = grid.cell_mut(cell.row, cell.col) {
            *slot = Some(Color::new(color_index));
        }
        assigned += 1;
    }

    grid
}
