//! Command-line host that drives the solver and exports the solved grid

use crate::algorithm::executor::{Solver, SolverConfig, StepStatus};
use crate::algorithm::propagation::PropagationMode;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, PROGRESS_REFRESH_CELLS,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::text::{render_entropy_map, render_grid, write_text};
use crate::spatial::tiles::{TileCatalog, TileVariant};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Propagation mode as spelled on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PropagationArg {
    /// Filter only the direct neighbors of each collapsed cell
    SingleHop,
    /// Keep filtering until no domain changes
    FixedPoint,
}

impl From<PropagationArg> for PropagationMode {
    fn from(arg: PropagationArg) -> Self {
        match arg {
            PropagationArg::SingleHop => Self::SingleHop,
            PropagationArg::FixedPoint => Self::FixedPoint,
        }
    }
}

/// Built-in tile catalogs
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    /// Straights, elbows, tees and a cross
    Pipes,
    /// All sixteen connector combinations
    Complete,
}

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate connector-matching tile grids with a lowest-entropy collapse solver"
)]
/// Command-line arguments for the tile grid generator
pub struct Cli {
    /// Number of columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// How far each collapse constrains the grid
    #[arg(short, long, value_enum, default_value_t = PropagationArg::SingleHop)]
    pub propagation: PropagationArg,

    /// Built-in tile catalog, ignored when tiles are given explicitly
    #[arg(short, long, value_enum, default_value_t = CatalogArg::Pipes)]
    pub catalog: CatalogArg,

    /// Custom catalog entry as top-right-bottom-left flags (e.g. 1010) or a glyph
    #[arg(short = 't', long = "tile", value_name = "TRBL")]
    pub tiles: Vec<TileVariant>,

    /// Whole-grid attempts; each restart after a contradiction uses the next seed
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Stop after this many steps even if cells remain undecided
    #[arg(short, long)]
    pub max_steps: Option<usize>,

    /// Write the text dump to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dump per-cell domain sizes instead of tile glyphs
    #[arg(short, long)]
    pub entropy: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Catalog selected by `--tile` entries or the `--catalog` preset
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit tiles contain a duplicate
    pub fn tile_catalog(&self) -> Result<TileCatalog> {
        if !self.tiles.is_empty() {
            return TileCatalog::new(self.tiles.clone());
        }
        Ok(match self.catalog {
            CatalogArg::Pipes => TileCatalog::pipes(),
            CatalogArg::Complete => TileCatalog::complete(),
        })
    }

    /// Grid dimensions and propagation mode
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.width, self.height).with_propagation(self.propagation.into())
    }
}

/// Outcome of a command-line run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Attempts used, including the final one
    pub attempts: usize,
    /// Seed of the final attempt
    pub seed: u64,
    /// Status after the last step of the final attempt
    pub status: StepStatus,
    /// Collapse steps taken in the final attempt
    pub steps: usize,
}

/// Drives solver attempts with progress tracking and exports the result
pub struct GridRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl GridRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve and write the text dump
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The arguments describe an invalid grid or catalog
    /// - Every attempt ends in a contradiction
    /// - The output file cannot be written
    pub fn run(&mut self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let (solver, summary) = self.solve()?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish(start_time.elapsed());
        }

        let text = if self.cli.entropy {
            render_entropy_map(solver.grid())
        } else {
            render_grid(solver.grid())
        };

        match &self.cli.output {
            Some(path) => write_text(&text, path)?,
            None => std::io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .map_err(|e| AlgorithmError::FileSystem {
                    path: PathBuf::from("<stdout>"),
                    operation: "write text",
                    source: e,
                })?,
        }

        Ok(summary)
    }

    /// Run attempts until one finishes without a contradiction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `attempts` is zero
    /// - The arguments describe an invalid grid or catalog
    /// - The last attempt ends in a contradiction
    pub fn solve(&mut self) -> Result<(Solver, RunSummary)> {
        let attempts = self.cli.attempts;
        if attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &attempts,
                &"at least one attempt is required",
            ));
        }

        let catalog = self.cli.tile_catalog()?;
        let mut solver = Solver::seeded(self.cli.solver_config(), catalog, self.cli.seed)?;

        tracing::info!(
            width = self.cli.width,
            height = self.cli.height,
            seed = self.cli.seed,
            tiles = solver.catalog().len(),
            "solving grid"
        );

        let mut attempt = 1;
        loop {
            let seed = self.cli.seed.wrapping_add(attempt as u64 - 1);
            if attempt > 1 {
                solver.reseed(seed);
            }

            if let Some(ref mut pm) = self.progress_manager {
                pm.start_attempt(attempt, attempts, solver.grid().len());
            }

            match self.drive(&mut solver) {
                Ok(status) => {
                    let mismatches = solver.grid().adjacency_mismatches();
                    if !mismatches.is_empty() {
                        tracing::error!(count = mismatches.len(), "adjacent tiles disagree");
                    }

                    let summary = RunSummary {
                        attempts: attempt,
                        seed,
                        status,
                        steps: solver.iteration(),
                    };
                    return Ok((solver, summary));
                }
                Err(error) => {
                    let Some(position) = error.contradiction_position() else {
                        return Err(error);
                    };
                    if let Some(ref pm) = self.progress_manager {
                        pm.report_contradiction(position);
                    }
                    if attempt >= attempts {
                        return Err(error);
                    }
                    tracing::info!(attempt, seed, %position, "restarting after contradiction");
                    attempt += 1;
                }
            }
        }
    }

    fn drive(&self, solver: &mut Solver) -> Result<StepStatus> {
        let mut status = StepStatus::Progressing;
        let mut taken = 0;

        while status == StepStatus::Progressing
            && self.cli.max_steps.is_none_or(|limit| taken < limit)
        {
            status = solver.step()?;
            taken += 1;

            if taken.is_multiple_of(PROGRESS_REFRESH_CELLS) {
                self.report_progress(solver.iteration());
            }
        }
        self.report_progress(solver.grid().collapsed_count());

        Ok(status)
    }

    fn report_progress(&self, collapsed: usize) {
        if let Some(ref pm) = self.progress_manager {
            pm.update(collapsed);
        }
    }
}
