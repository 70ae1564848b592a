use crate::{
    algorithm::propagation::{PropagationMode, propagate},
    algorithm::random::{RandomSelector, RandomSource},
    algorithm::selection::select_lowest_entropy,
    io::error::{AlgorithmError, Result, WithContext, invalid_parameter},
    spatial::grid::{Grid, Position},
    spatial::tiles::{TileCatalog, TileVariant},
};

/// Grid dimensions and propagation behavior for one solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// How far each collapse is propagated
    pub propagation: PropagationMode,
}

impl SolverConfig {
    /// Single-hop configuration for a `width × height` grid
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            propagation: PropagationMode::SingleHop,
        }
    }

    /// Same dimensions with a different propagation mode
    #[must_use]
    pub const fn with_propagation(mut self, propagation: PropagationMode) -> Self {
        self.propagation = propagation;
        self
    }
}

/// Observable solver state between steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Uncollapsed cells remain
    Progressing,
    /// Every cell is collapsed
    Converged,
    /// A cell ran out of candidates; terminal until reset
    Contradiction(Position),
}

/// Result of a successful step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// A cell was collapsed and uncollapsed cells remain
    Progressing,
    /// No uncollapsed cells remain
    Converged,
}

/// The most recent collapse performed by the solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collapse {
    /// Collapsed cell
    pub position: Position,
    /// Tile it was fixed to
    pub tile: TileVariant,
}

/// Lowest-entropy collapse solver over a connector-matching tile grid
///
/// Each [`step`](Self::step) selects the uncollapsed cell with the smallest
/// domain (ties broken at random), collapses it to a random candidate and
/// filters its neighbors. Driven externally, one step at a time.
pub struct Solver<R = RandomSelector> {
    catalog: TileCatalog,
    grid: Grid,
    config: SolverConfig,
    random: R,
    state: SolverState,
    iteration: usize,
    last_collapse: Option<Collapse>,
}

impl Solver<RandomSelector> {
    /// Create a solver driven by a seeded [`RandomSelector`]
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid
    pub fn seeded(config: SolverConfig, catalog: TileCatalog, seed: u64) -> Result<Self> {
        Self::new(config, catalog, RandomSelector::new(seed))
    }

    /// Reset the grid and restart the random sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.random.reseed(seed);
        self.reset();
    }
}

impl<R: RandomSource> Solver<R> {
    /// Create a solver with every cell holding the full catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Width or height is zero or above the maximum grid dimension
    /// - The catalog is empty
    pub fn new(config: SolverConfig, catalog: TileCatalog, random: R) -> Result<Self> {
        if catalog.is_empty() {
            return Err(AlgorithmError::InvalidCatalog {
                reason: "catalog must contain at least one tile".to_string(),
            });
        }

        let grid = Grid::new(config.width, config.height, &catalog)?;

        Ok(Self {
            catalog,
            grid,
            config,
            random,
            state: SolverState::Progressing,
            iteration: 0,
            last_collapse: None,
        })
    }

    /// Access the grid for read-only consumers
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Access the tile catalog
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Access the configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Number of steps that collapsed a cell or hit a contradiction
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Cell collapsed by the latest step
    pub const fn last_collapse(&self) -> Option<Collapse> {
        self.last_collapse
    }

    /// Perform one select, collapse and propagate cycle
    ///
    /// After convergence further calls change nothing and return `Converged`.
    /// After a contradiction further calls return the same contradiction.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when the selected cell has an empty domain, or
    /// when fixed-point propagation empties one.
    pub fn step(&mut self) -> Result<StepStatus> {
        match self.state {
            SolverState::Converged => return Ok(StepStatus::Converged),
            SolverState::Contradiction(position) => {
                return Err(AlgorithmError::Contradiction {
                    position,
                    iteration: self.iteration,
                });
            }
            SolverState::Progressing => {}
        }

        let Some(position) = select_lowest_entropy(&self.grid, &mut self.random) else {
            tracing::debug!(iteration = self.iteration, "grid converged");
            self.state = SolverState::Converged;
            return Ok(StepStatus::Converged);
        };

        self.iteration += 1;
        let result = self.collapse_and_propagate(position);
        let tile = self.record_outcome(result)?;

        tracing::trace!(
            iteration = self.iteration,
            x = position.x,
            y = position.y,
            tile = %tile,
            "collapsed cell"
        );
        self.last_collapse = Some(Collapse { position, tile });

        if self.grid.is_fully_collapsed() {
            tracing::debug!(iteration = self.iteration, "grid converged");
            self.state = SolverState::Converged;
            Ok(StepStatus::Converged)
        } else {
            Ok(StepStatus::Progressing)
        }
    }

    /// Step until convergence, a contradiction, or `max_steps` collapses
    ///
    /// Returns the final status of the last step taken.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` as soon as a step reports one
    pub fn run(&mut self, max_steps: Option<usize>) -> Result<StepStatus> {
        let mut status = if self.state == SolverState::Converged {
            StepStatus::Converged
        } else {
            StepStatus::Progressing
        };
        let mut taken = 0;

        while status == StepStatus::Progressing && max_steps.is_none_or(|limit| taken < limit) {
            status = self.step()?;
            taken += 1;
        }

        Ok(status)
    }

    /// Fix a cell to a chosen tile before or between steps, then propagate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The solver already stopped on a contradiction
    /// - The position is outside the grid
    /// - The cell is collapsed or the tile is not among its candidates
    /// - Fixed-point propagation empties a domain
    pub fn pin(&mut self, position: Position, tile: TileVariant) -> Result<()> {
        if let SolverState::Contradiction(at) = self.state {
            return Err(AlgorithmError::Contradiction {
                position: at,
                iteration: self.iteration,
            });
        }

        let cell = self
            .grid
            .cell_mut(position)
            .ok_or_else(|| invalid_parameter("position", &position, &"outside the grid"))?;
        cell.collapse_to(&self.catalog, tile)?;

        let report = propagate(
            &mut self.grid,
            &self.catalog,
            position,
            self.config.propagation,
        );
        self.record_outcome(report.map(|_| tile))?;

        self.last_collapse = Some(Collapse { position, tile });
        if self.grid.is_fully_collapsed() {
            self.state = SolverState::Converged;
        }
        Ok(())
    }

    /// Restore every cell to the full catalog and clear the solver state
    ///
    /// The random source continues from where it was.
    pub fn reset(&mut self) {
        self.grid.reset(&self.catalog);
        self.state = SolverState::Progressing;
        self.iteration = 0;
        self.last_collapse = None;
    }

    fn collapse_and_propagate(&mut self, position: Position) -> Result<TileVariant> {
        let cell = self
            .grid
            .cell_mut(position)
            .ok_or_else(|| invalid_parameter("position", &position, &"outside the grid"))?;
        let tile = cell.collapse(&self.catalog, &mut self.random)?;

        let report = propagate(
            &mut self.grid,
            &self.catalog,
            position,
            self.config.propagation,
        )?;
        for emptied in &report.emptied {
            tracing::debug!(
                x = emptied.x,
                y = emptied.y,
                "propagation emptied a domain; contradiction surfaces when the cell is selected"
            );
        }

        Ok(tile)
    }

    /// Fill in the iteration and latch contradictions into the solver state
    fn record_outcome<T>(&mut self, result: Result<T>) -> Result<T> {
        let result = result.with_iteration(self.iteration);
        if let Err(error) = &result {
            if let Some(position) = error.contradiction_position() {
                tracing::warn!(
                    iteration = self.iteration,
                    x = position.x,
                    y = position.y,
                    "contradiction: no tile fits the neighbors"
                );
                self.state = SolverState::Contradiction(position);
            }
        }
        result
    }
}
