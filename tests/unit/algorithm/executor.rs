//! Tests for the step driver: convergence, contradictions, pinning and reset

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::executor::Collapse;
    use tilecollapse::spatial::tiles::{CROSS, HORIZONTAL, VERTICAL};
    use tilecollapse::{
        AlgorithmError, Cell, Position, PropagationMode, RandomSource, Solver, SolverConfig,
        SolverState, StepStatus, TileCatalog, TileVariant,
    };

    /// Always picks the first option
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn choose_index(&mut self, len: usize) -> Option<usize> {
            (len > 0).then_some(0)
        }
    }

    const BLANK: TileVariant = TileVariant::from_mask(0);
    const BOTTOM_ONLY: TileVariant = TileVariant::new(false, false, true, false);
    const RIGHT_BOTTOM: TileVariant = TileVariant::new(false, true, true, false);

    fn chosen_tiles<R: RandomSource>(solver: &Solver<R>) -> Vec<Option<TileVariant>> {
        solver.grid().cells().map(Cell::chosen).collect()
    }

    // Tests invalid dimensions are rejected before any cell is built
    // Verified by removing the zero-width validation
    #[test]
    fn test_new_rejects_zero_dimensions() {
        let result = Solver::seeded(SolverConfig::new(0, 3), TileCatalog::pipes(), 1);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter { parameter: "width", .. })
        ));

        let result = Solver::seeded(SolverConfig::new(3, 0), TileCatalog::pipes(), 1);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter { parameter: "height", .. })
        ));
    }

    // Tests a single cell converges on the first step and stays converged
    // Verified by reporting Progressing on the collapsing step
    #[test]
    fn test_single_cell_converges_in_one_step() {
        let mut solver =
            Solver::seeded(SolverConfig::new(1, 1), TileCatalog::pipes(), 42).expect("valid solver");

        assert_eq!(solver.step().expect("no contradiction"), StepStatus::Converged);
        assert_eq!(solver.state(), SolverState::Converged);
        assert_eq!(solver.iteration(), 1);

        let tile = solver
            .last_collapse()
            .map(|collapse| collapse.tile)
            .expect("one collapse");
        assert!(solver.catalog().index_of(tile).is_some());

        let before = chosen_tiles(&solver);
        assert_eq!(solver.step().expect("still converged"), StepStatus::Converged);
        assert_eq!(solver.iteration(), 1);
        assert_eq!(chosen_tiles(&solver), before);
    }

    // Tests a cross on the left forces a cross on the right
    // Verified by filtering on the neighbor's own side instead of the facing side
    #[test]
    fn test_two_cell_propagation() {
        let catalog = TileCatalog::new(vec![CROSS, BLANK]).expect("valid catalog");
        let mut solver =
            Solver::new(SolverConfig::new(2, 1), catalog, FirstChoice).expect("valid solver");

        assert_eq!(solver.step().expect("no contradiction"), StepStatus::Progressing);
        assert_eq!(
            solver.last_collapse(),
            Some(Collapse {
                position: Position::new(0, 0),
                tile: CROSS,
            })
        );

        let right = solver.grid().cell(Position::new(1, 0)).expect("inside grid");
        assert_eq!(right.entropy(), 1);
        assert_eq!(right.candidates(solver.catalog()), vec![CROSS]);

        assert_eq!(solver.step().expect("no contradiction"), StepStatus::Converged);
        assert_eq!(chosen_tiles(&solver), vec![Some(CROSS), Some(CROSS)]);
    }

    // Tests an emptied cell surfaces as a contradiction when it is selected
    // Verified by skipping empty-domain cells during selection
    #[test]
    fn test_contradiction_detected_on_selection() {
        let catalog = TileCatalog::new(vec![BOTTOM_ONLY, RIGHT_BOTTOM]).expect("valid catalog");
        let mut solver =
            Solver::seeded(SolverConfig::new(1, 2), catalog, 7).expect("valid solver");

        // Neither tile has a top edge, so whichever cell collapses first empties the other
        assert_eq!(solver.step().expect("first collapse"), StepStatus::Progressing);

        let error = solver.step().expect_err("second cell has no candidates");
        let position = error.contradiction_position().expect("contradiction");
        assert!(matches!(
            error,
            AlgorithmError::Contradiction { iteration: 2, .. }
        ));
        assert!(
            solver
                .grid()
                .cell(position)
                .is_some_and(Cell::is_contradicted)
        );
        assert_eq!(solver.state(), SolverState::Contradiction(position));

        let repeated = solver.step().expect_err("contradiction is terminal");
        assert_eq!(repeated.contradiction_position(), Some(position));
        assert_eq!(solver.iteration(), 2);
    }

    // Tests fixed-point propagation reports the contradiction on the collapsing step
    // Verified by ignoring propagation errors in the step driver
    #[test]
    fn test_fixed_point_contradiction_is_immediate() {
        let catalog = TileCatalog::new(vec![BOTTOM_ONLY, RIGHT_BOTTOM]).expect("valid catalog");
        let config = SolverConfig::new(1, 2).with_propagation(PropagationMode::FixedPoint);
        let mut solver = Solver::new(config, catalog, FirstChoice).expect("valid solver");

        let error = solver.step().expect_err("propagation empties the lower cell");
        assert!(matches!(
            error,
            AlgorithmError::Contradiction { iteration: 1, position } if position == Position::new(0, 1)
        ));
        assert_eq!(
            solver.state(),
            SolverState::Contradiction(Position::new(0, 1))
        );
    }

    // Tests run honors the step limit and stops at convergence
    // Verified by ignoring max_steps in the run loop
    #[test]
    fn test_run_with_step_limit() {
        let mut solver = Solver::seeded(SolverConfig::new(4, 4), TileCatalog::complete(), 3)
            .expect("valid solver");

        assert_eq!(solver.run(Some(5)).expect("no contradiction"), StepStatus::Progressing);
        assert_eq!(solver.iteration(), 5);
        assert_eq!(solver.grid().collapsed_count(), 5);

        assert_eq!(solver.run(None).expect("no contradiction"), StepStatus::Converged);
        assert_eq!(solver.iteration(), 16);
        assert_eq!(solver.run(None).expect("converged"), StepStatus::Converged);
    }

    // Tests pinning fixes a cell and propagates from it
    // Verified by skipping propagation after a pin
    #[test]
    fn test_pin_propagates() {
        let catalog = TileCatalog::new(vec![CROSS, BLANK]).expect("valid catalog");
        let mut solver =
            Solver::new(SolverConfig::new(2, 1), catalog, FirstChoice).expect("valid solver");

        solver
            .pin(Position::new(1, 0), BLANK)
            .expect("blank is a candidate");
        let left = solver.grid().cell(Position::new(0, 0)).expect("inside grid");
        assert_eq!(left.candidates(solver.catalog()), vec![BLANK]);

        assert_eq!(solver.step().expect("no contradiction"), StepStatus::Converged);
        assert_eq!(chosen_tiles(&solver), vec![Some(BLANK), Some(BLANK)]);
    }

    // Tests pins outside the grid, on collapsed cells, or off the domain are refused
    // Verified by removing the candidate check in collapse_to
    #[test]
    fn test_pin_rejections() {
        let mut solver = Solver::new(
            SolverConfig::new(2, 1),
            TileCatalog::new(vec![HORIZONTAL, VERTICAL]).expect("valid catalog"),
            FirstChoice,
        )
        .expect("valid solver");

        assert!(matches!(
            solver.pin(Position::new(5, 0), HORIZONTAL),
            Err(AlgorithmError::InvalidParameter { parameter: "position", .. })
        ));
        assert!(matches!(
            solver.pin(Position::new(0, 0), CROSS),
            Err(AlgorithmError::InvalidParameter { parameter: "tile", .. })
        ));

        solver
            .pin(Position::new(0, 0), HORIZONTAL)
            .expect("candidate");
        assert!(matches!(
            solver.pin(Position::new(0, 0), HORIZONTAL),
            Err(AlgorithmError::CellAlreadyCollapsed { .. })
        ));
        // The right cell must now continue the horizontal pipe
        assert!(matches!(
            solver.pin(Position::new(1, 0), VERTICAL),
            Err(AlgorithmError::InvalidParameter { parameter: "tile", .. })
        ));
    }

    // Tests reset clears progress and a contradiction
    // Verified by keeping the latched state across reset
    #[test]
    fn test_reset_clears_state() {
        let catalog = TileCatalog::new(vec![BOTTOM_ONLY, RIGHT_BOTTOM]).expect("valid catalog");
        let mut solver = Solver::new(SolverConfig::new(1, 2), catalog, FirstChoice)
            .expect("valid solver");

        assert!(solver.run(None).is_err());
        solver.reset();

        assert_eq!(solver.state(), SolverState::Progressing);
        assert_eq!(solver.iteration(), 0);
        assert_eq!(solver.last_collapse(), None);
        assert!(solver.grid().cells().all(|cell| cell.entropy() == 2));
    }

    // Tests reseeding replays the same grid as a fresh solver with that seed
    // Verified by not resetting the grid in reseed
    #[test]
    fn test_reseed_matches_fresh_solver() {
        let config = SolverConfig::new(6, 6);

        let mut fresh = Solver::seeded(config, TileCatalog::complete(), 11).expect("valid solver");
        fresh.run(None).expect("complete catalog never contradicts");

        let mut reused = Solver::seeded(config, TileCatalog::complete(), 99).expect("valid solver");
        reused.run(Some(10)).expect("no contradiction");
        reused.reseed(11);
        reused.run(None).expect("complete catalog never contradicts");

        assert_eq!(chosen_tiles(&fresh), chosen_tiles(&reused));
    }
}
