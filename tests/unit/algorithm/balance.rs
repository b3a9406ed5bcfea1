//! Tests for the greedy color balancer

#[cfg(test)]
mod tests {
    use quiltgrid::DesignerError;
    use quiltgrid::algorithm::{Recolor, balance_colors, count_colors};
    use quiltgrid::generators::uniform_shuffle;
    use quiltgrid::palette::{Color, Palette};
    use quiltgrid::spatial::Grid;
    use rand::{SeedableRng, rngs::StdRng};

    fn grid_of(rows: usize, cols: usize, indices: &[usize]) -> Grid {
        let colors = indices.iter().map(|&i| Some(Color::new(i))).collect();
        Grid::from_row_major(rows, cols, colors).expect("valid shape")
    }

    // Tests that a balanced grid comes back untouched
    // Verified by flipping cells even when counts already match
    #[test]
    fn test_balanced_grid_is_unchanged() {
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(7);
        let original = uniform_shuffle(6, 14, &palette, &mut rng);
        let mut grid = original.clone();

        let changes = balance_colors(&mut grid, palette.len(), 12).expect("balanceable");

        assert!(changes.is_empty());
        assert_eq!(grid, original);
    }

    // Tests the first row-major donor cells are flipped
    // Verified by scanning the grid in reverse
    #[test]
    fn test_flips_first_donor_cells_in_row_major_order() {
        let mut grid = grid_of(2, 2, &[0, 0, 0, 0]);

        let changes = balance_colors(&mut grid, 2, 2).expect("balanceable");

        let b = Color::new(1);
        assert_eq!(grid.get(0, 0), Some(b));
        assert_eq!(grid.get(0, 1), Some(b));
        assert_eq!(grid.get(1, 0), Some(Color::new(0)));
        assert_eq!(changes.len(), 2);
    }

    // Tests donors are chosen in palette order, not by cell position
    // Verified by taking the donor from the first surplus cell instead
    #[test]
    fn test_donor_follows_palette_order() {
        // Color 2 occupies the first row, color 1 the second; color 0 is missing
        let mut grid = grid_of(2, 3, &[2, 2, 2, 1, 1, 1]);

        let changes = balance_colors(&mut grid, 3, 2).expect("balanceable");

        let a = Color::new(0);
        assert_eq!(
            changes,
            vec![
                Recolor {
                    row: 1,
                    col: 0,
                    from: Color::new(1),
                    to: a,
                },
                Recolor {
                    row: 0,
                    col: 0,
                    from: Color::new(2),
                    to: a,
                },
            ]
        );
        assert!(count_colors(&grid, 3, 2).is_balanced());
    }

    // Tests mismatched sizes are rejected before any change
    // Verified by balancing before checking the size
    #[test]
    fn test_unbalanceable_grid_is_rejected_untouched() {
        let original = grid_of(2, 2, &[0, 0, 0, 1]);
        let mut grid = original.clone();

        let result = balance_colors(&mut grid, 3, 1);

        assert!(matches!(
            result,
            Err(DesignerError::Unbalanceable {
                cells: 4,
                palette_size: 3,
                target: 1
            })
        ));
        assert_eq!(grid, original);
    }

    // Tests a deficit stays unresolved once donors run out
    // Verified by flipping colors that are exactly at target
    #[test]
    fn test_deficit_left_when_no_donor_remains() {
        let a = Color::new(0);
        let colors = vec![Some(a), Some(a), Some(a), None];
        let mut grid = Grid::from_row_major(2, 2, colors).expect("valid shape");

        let changes = balance_colors(&mut grid, 2, 2).expect("balanceable");

        assert_eq!(changes.len(), 1);
        let counts = count_colors(&grid, 2, 2);
        assert_eq!(counts.count(a), 2);
        assert_eq!(counts.count(Color::new(1)), 1);
        assert!(!counts.is_balanced());
    }
}
