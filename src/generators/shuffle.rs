use rand::Rng;

use crate::palette::{Color, Palette};
use crate::spatial::{Grid, Quota};

/// Exact-quota random layout for the sandbox
///
/// Lays out every color's [`Quota`] share, shuffles it with Fisher-Yates
/// (from the last index down to 1, swapping with a uniform index in
/// `[0, i]`) and fills the grid row-major. Balanced by construction whenever
/// the quota is flat.
pub fn uniform_shuffle(rows: usize, cols: usize, palette: &Palette, rng: &mut impl Rng) -> Grid {
    let quota = Quota::new(rows * cols, palette.len());

    let mut colors: Vec<Option<Color>> = palette
        .colors()
        .flat_map(|color| std::iter::repeat_n(Some(color), quota.for_color(color.index())))
        .collect();

    for i in (1..colors.len()).rev() {
        let j = rng.random_range(0..=i);
        colors.swap(i, j);
    }

    let mut shuffled = colors.into_iter();
    Grid::from_fn(rows, cols, |_, _| shuffled.next().flatten())
}
