//! Tests for the exact-quota sandbox shuffle

#[cfg(test)]
mod tests {
    use quiltgrid::algorithm::count_colors;
    use quiltgrid::generators::uniform_shuffle;
    use quiltgrid::palette::Palette;
    use rand::{SeedableRng, rngs::StdRng};

    // Tests the shuffle is balanced by construction
    // Verified by dropping the last color from the list
    #[test]
    fn test_exact_counts() {
        let palette = Palette::default();
        for seed in 0..10 {
            let grid = uniform_shuffle(6, 14, &palette, &mut StdRng::seed_from_u64(seed));
            assert!(count_colors(&grid, 7, 12).is_balanced());
        }
    }

    // Tests leftover cells go to the first colors in palette order
    // Verified by giving the extra cells to the last colors
    #[test]
    fn test_extra_cells_go_to_leading_colors() {
        let palette = Palette::default();
        let grid = uniform_shuffle(4, 4, &palette, &mut StdRng::seed_from_u64(5));

        let counts = count_colors(&grid, 7, 2);
        assert_eq!(counts.as_slice(), &[3, 3, 2, 2, 2, 2, 2]);
        assert_eq!(counts.unset(), 0);
    }

    // Tests the same seed gives the same layout
    // Verified by drawing from thread randomness
    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let palette = Palette::default();
        let a = uniform_shuffle(6, 14, &palette, &mut StdRng::seed_from_u64(9));
        let b = uniform_shuffle(6, 14, &palette, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
