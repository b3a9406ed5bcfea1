//! Tests for per-color counting and surplus/deficit reporting

#[cfg(test)]
mod tests {
    use quiltgrid::algorithm::count_colors;
    use quiltgrid::palette::Color;
    use quiltgrid::spatial::Grid;

    // Tests colors without cells are reported as zero
    // Verified by only reporting colors present in the grid
    #[test]
    fn test_reports_every_palette_color() {
        let grid = Grid::from_fn(2, 3, |_, _| Some(Color::new(1)));

        let counts = count_colors(&grid, 4, 2);

        assert_eq!(counts.as_slice(), &[0, 6, 0, 0]);
        assert_eq!(counts.iter().count(), 4);
        assert!(!counts.is_balanced());
    }

    // Tests deficits and surpluses are split around the target
    // Verified by counting equal-to-target colors as deficits
    #[test]
    fn test_deficits_and_surpluses() {
        let colors = [0, 0, 0, 1, 1, 2]
            .iter()
            .map(|&i| Some(Color::new(i)))
            .collect();
        let grid = Grid::from_row_major(2, 3, colors).expect("valid shape");

        let counts = count_colors(&grid, 3, 2);

        assert_eq!(counts.surpluses(), vec![(Color::new(0), 3)]);
        assert_eq!(counts.deficits(), vec![(Color::new(2), 1)]);
        assert_eq!(counts.target(), 2);
    }

    // Tests unset cells are counted separately
    // Verified by counting unset cells as the first color
    #[test]
    fn test_unset_cells() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Color::new(0)).expect("in bounds");

        let counts = count_colors(&grid, 2, 2);

        assert_eq!(counts.unset(), 3);
        assert_eq!(counts.count(Color::new(0)), 1);
        assert_eq!(counts.count(Color::new(9)), 0);
    }

    // Tests an exactly balanced grid is recognized
    // Verified by requiring strictly more than target
    #[test]
    fn test_balanced_grid() {
        let colors = [0, 1, 1, 0].iter().map(|&i| Some(Color::new(i))).collect();
        let grid = Grid::from_row_major(2, 2, colors).expect("valid shape");

        let counts = count_colors(&grid, 2, 2);

        assert!(counts.is_balanced());
        assert!(counts.deficits().is_empty());
        assert!(counts.surpluses().is_empty());
    }
}
