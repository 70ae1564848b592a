//! Tests for lowest-entropy scanning and tie-breaking

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::random::RandomSource;
    use tilecollapse::algorithm::selection::{lowest_entropy_candidates, select_lowest_entropy};
    use tilecollapse::spatial::tiles::{HORIZONTAL, VERTICAL};
    use tilecollapse::{Grid, Position, Side, TileCatalog};

    /// Returns a fixed index, clamped into range
    struct FixedIndex(usize);

    impl RandomSource for FixedIndex {
        fn choose_index(&mut self, len: usize) -> Option<usize> {
            (len > 0).then(|| self.0.min(len - 1))
        }
    }

    // Tests a fresh grid ties every cell in row-major order
    // Verified by resetting the candidate list on equal entropy
    #[test]
    fn test_fresh_grid_ties_all_cells() {
        let catalog = TileCatalog::pipes();
        let grid = Grid::new(3, 2, &catalog).expect("valid grid");

        let candidates = lowest_entropy_candidates(&grid).expect("cells remain");
        assert_eq!(candidates.entropy, 11);
        assert_eq!(
            candidates.positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
            ]
        );
    }

    // Tests a narrowed cell is preferred over untouched ones
    // Verified by selecting the maximum entropy
    #[test]
    fn test_narrowed_cell_wins() {
        let catalog = TileCatalog::pipes();
        let mut grid = Grid::new(3, 3, &catalog).expect("valid grid");
        let target = Position::new(2, 1);

        // A connector arriving from the left keeps the 7 pipes with a left edge
        if let Some(cell) = grid.cell_mut(target) {
            cell.restrict(&catalog, Side::Right, true);
        }

        let candidates = lowest_entropy_candidates(&grid).expect("cells remain");
        assert_eq!(candidates.entropy, 7);
        assert_eq!(candidates.positions, vec![target]);

        let mut random = FixedIndex(0);
        assert_eq!(select_lowest_entropy(&grid, &mut random), Some(target));
    }

    // Tests ties at the minimum are broken by the random source
    // Verified by always returning the first tied position
    #[test]
    fn test_tie_broken_by_random_source() {
        let catalog = TileCatalog::pipes();
        let mut grid = Grid::new(4, 1, &catalog).expect("valid grid");

        for x in [1, 3] {
            if let Some(cell) = grid.cell_mut(Position::new(x, 0)) {
                cell.restrict(&catalog, Side::Right, true);
            }
        }

        let candidates = lowest_entropy_candidates(&grid).expect("cells remain");
        assert_eq!(candidates.positions, vec![Position::new(1, 0), Position::new(3, 0)]);

        assert_eq!(
            select_lowest_entropy(&grid, &mut FixedIndex(0)),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            select_lowest_entropy(&grid, &mut FixedIndex(1)),
            Some(Position::new(3, 0))
        );
    }

    // Tests collapsed cells are never candidates, whatever their entropy
    // Verified by scanning all cells instead of uncollapsed ones
    #[test]
    fn test_collapsed_cells_excluded() {
        let catalog = TileCatalog::pipes();
        let mut grid = Grid::new(2, 1, &catalog).expect("valid grid");

        if let Some(cell) = grid.cell_mut(Position::new(0, 0)) {
            cell.collapse_to(&catalog, HORIZONTAL).expect("candidate");
        }

        let candidates = lowest_entropy_candidates(&grid).expect("one cell remains");
        assert_eq!(candidates.entropy, 11);
        assert_eq!(candidates.positions, vec![Position::new(1, 0)]);

        if let Some(cell) = grid.cell_mut(Position::new(1, 0)) {
            cell.collapse_to(&catalog, VERTICAL).expect("candidate");
        }
        assert!(lowest_entropy_candidates(&grid).is_none());
        assert_eq!(select_lowest_entropy(&grid, &mut FixedIndex(0)), None);
    }

    // Tests an emptied cell has entropy 0 and is selected first
    // Verified by skipping cells with an empty domain
    #[test]
    fn test_empty_domain_selected_first() {
        let catalog = TileCatalog::new(vec![VERTICAL]).expect("valid catalog");
        let mut grid = Grid::new(3, 1, &catalog).expect("valid grid");

        // VERTICAL has no left edge, so a connector from the left empties the cell
        if let Some(cell) = grid.cell_mut(Position::new(2, 0)) {
            assert_eq!(cell.restrict(&catalog, Side::Right, true), 0);
        }

        let candidates = lowest_entropy_candidates(&grid).expect("cells remain");
        assert_eq!(candidates.entropy, 0);
        assert_eq!(candidates.positions, vec![Position::new(2, 0)]);
    }
}
