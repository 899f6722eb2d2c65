//! Pathway solvers.
//!
//! Two interchangeable solvers over the same [`GridMap`](crate::grid::GridMap):
//!
//! - [`SequentialSolver`]: classic A* with a binary-heap open set. The
//!   reference baseline for correctness.
//! - [`BatchSolver`]: data-parallel A* that extracts and expands batches of
//!   open nodes per round.
//!
//! Both return a [`SearchResult`] with the optimal cost and the ordered path
//! from start to target. "No path" is a normal result, not an error.

pub mod parallel;
pub mod sequential;

pub use parallel::{BatchConfig, BatchSolver};
pub use sequential::{SequentialConfig, SequentialSolver};

use crate::core::GridCoord;

/// Result of a pathway query.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Ordered cells from start to target inclusive (empty if no path found).
    pub path: Vec<GridCoord>,
    /// Optimal path cost.
    pub cost: f32,
    /// Whether a path was found.
    pub success: bool,
    /// Reason for failure (if any).
    pub failure: Option<SearchFailure>,
    /// Search statistics.
    pub stats: SearchStats,
}

impl SearchResult {
    /// Create a failed result.
    pub(crate) fn failed(reason: SearchFailure, stats: SearchStats) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            success: false,
            failure: Some(reason),
            stats,
        }
    }

    /// Create a successful result.
    pub(crate) fn found(path: Vec<GridCoord>, cost: f32, stats: SearchStats) -> Self {
        Self {
            path,
            cost,
            success: true,
            failure: None,
            stats,
        }
    }
}

/// Reason for a failed query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailure {
    /// Start or target is outside the grid.
    OutOfBounds,
    /// Start and target are disconnected.
    NoPath,
    /// The expansion or round limit was reached before termination.
    LimitExceeded,
    /// The query was cancelled between rounds.
    Cancelled,
    /// The round-boundary deadline passed.
    TimedOut,
}

/// Counters reported by both solvers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Nodes expanded (popped and not discarded as stale).
    pub nodes_expanded: usize,
    /// Batch rounds executed (1 per expansion for the sequential solver).
    pub rounds: usize,
}
