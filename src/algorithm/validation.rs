use crate::palette::Color;
use crate::spatial::Grid;

/// Per-color cell counts of a grid measured against a flat target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCounts {
    counts: Vec<usize>,
    unset: usize,
    target: usize,
}

impl ColorCounts {
    /// Count of one color (zero for colors outside the palette)
    pub fn count(&self, color: Color) -> usize {
        self.counts.get(color.index()).copied().unwrap_or(0)
    }

    /// Every palette color with its count, in palette order
    pub fn iter(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, &count)| (Color::new(index), count))
    }

    /// Raw counts in palette order
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    /// Number of cells holding no color
    pub const fn unset(&self) -> usize {
        self.unset
    }

    /// Target every color is measured against
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Whether every palette color has exactly the target count
    pub fn is_balanced(&self) -> bool {
        self.counts.iter().all(|&count| count == self.target)
    }

    /// Colors below target with their count
    pub fn deficits(&self) -> Vec<(Color, usize)> {
        self.iter().filter(|&(_, count)| count < self.target).collect()
    }

    /// Colors above target with their count
    pub fn surpluses(&self) -> Vec<(Color, usize)> {
        self.iter().filter(|&(_, count)| count > self.target).collect()
    }
}

/// Count every palette color in a grid
///
/// Colors with no cells are reported as zero. Cells holding an index outside
/// the palette are ignored.
pub fn count_colors(grid: &Grid, palette_len: usize, target: usize) -> ColorCounts {
    let mut counts = vec![0; palette_len];
    let mut unset = 0;

    for (_, cell) in grid.cells() {
        match cell {
            Some(color) => {
                if let Some(count) = counts.get_mut(color.index()) {
                    *count += 1;
                }
            }
            None => unset += 1,
        }
    }

    ColorCounts {
        counts,
        unset,
        target,
    }
}
