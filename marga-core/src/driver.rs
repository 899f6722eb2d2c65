//! Query driver: runs the solvers and cross-checks their costs.
//!
//! The two solvers sum the same step costs in different orders, so equality
//! is checked under an absolute plus relative tolerance. Paths are never
//! compared; multiple optima may exist.

use log::{debug, warn};

use crate::core::GridCoord;
use crate::error::{Result, SearchError};
use crate::grid::GridMap;
use crate::search::{
    BatchConfig, BatchSolver, SearchResult, SequentialConfig, SequentialSolver,
};

/// Absolute cost tolerance for cross-solver agreement.
pub const ABS_TOLERANCE: f32 = 1e-3;
/// Relative cost tolerance for cross-solver agreement.
pub const REL_TOLERANCE: f32 = 1e-5;

/// True when two optimal costs agree within tolerance.
#[inline]
pub fn costs_agree(a: f32, b: f32) -> bool {
    (a - b).abs() <= ABS_TOLERANCE + REL_TOLERANCE * a.abs().max(b.abs())
}

/// Which solvers to run and with what configuration.
#[derive(Clone, Debug, Default)]
pub struct DriverConfig {
    pub solvers: SolverSelection,
    pub sequential: SequentialConfig,
    pub batch: BatchConfig,
}

/// Solver selection for a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverSelection {
    SequentialOnly,
    ParallelOnly,
    #[default]
    Both,
}

impl SolverSelection {
    #[inline]
    pub fn runs_sequential(self) -> bool {
        matches!(self, SolverSelection::SequentialOnly | SolverSelection::Both)
    }

    #[inline]
    pub fn runs_parallel(self) -> bool {
        matches!(self, SolverSelection::ParallelOnly | SolverSelection::Both)
    }
}

/// Per-solver results of one query.
#[derive(Clone, Debug)]
pub struct QueryReport {
    pub sequential: Option<SearchResult>,
    pub parallel: Option<SearchResult>,
}

impl QueryReport {
    /// Any successful result, preferring the sequential one.
    pub fn solution(&self) -> Option<&SearchResult> {
        self.sequential
            .iter()
            .chain(self.parallel.iter())
            .find(|r| r.success)
    }
}

/// Runs one or both solvers over a prepared grid.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Create a driver with the given configuration.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Create a driver running both solvers with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DriverConfig::default())
    }

    /// Run the selected solvers and cross-check their results.
    ///
    /// Returns [`SearchError::CostMismatch`] when both solvers ran and either
    /// their success flags differ or their costs disagree beyond tolerance.
    pub fn run(&self, grid: &GridMap, start: GridCoord, target: GridCoord) -> Result<QueryReport> {
        let sequential = if self.config.solvers.runs_sequential() {
            let solver = SequentialSolver::new(self.config.sequential.clone());
            Some(solver.solve(grid, start, target))
        } else {
            None
        };

        let parallel = if self.config.solvers.runs_parallel() {
            let solver = BatchSolver::new(self.config.batch.clone());
            Some(solver.solve(grid, start, target)?)
        } else {
            None
        };

        if let (Some(seq), Some(par)) = (&sequential, &parallel) {
            let seq_cost = seq.success.then_some(seq.cost);
            let par_cost = par.success.then_some(par.cost);
            let agree = match (seq_cost, par_cost) {
                (Some(a), Some(b)) => costs_agree(a, b),
                (None, None) => true,
                _ => false,
            };
            if !agree {
                warn!(
                    "[Driver] cost mismatch: sequential {:?} vs parallel {:?}",
                    seq_cost, par_cost
                );
                return Err(SearchError::CostMismatch {
                    sequential: seq_cost,
                    parallel: par_cost,
                });
            }
            debug!(
                "[Driver] solvers agree: cost={:?}, sequential {} expansions, parallel {} rounds",
                seq_cost, seq.stats.nodes_expanded, par.stats.rounds
            );
        }

        Ok(QueryReport {
            sequential,
            parallel,
        })
    }
}
