//! Batch-parallel A* solver.
//!
//! Each round extracts up to `K` minimum-`f` entries from the open set,
//! expands them concurrently, deduplicates the generated successors, relaxes
//! them against the per-cell atomic arena and stages the improved cells for
//! the next round. Rounds are bulk-synchronous: the extract, expand, dedup,
//! relax and insert phases are barrier-separated, and the arena is mutated
//! only during the relax phase.
//!
//! A cell is closed only while its `f` equals the batch minimum. Heuristic
//! consistency makes those distances final (an entry with equal `f` cannot
//! improve another), so closed cells never need relaxation; the remaining
//! extracted entries are expanded speculatively and reinserted, and later
//! rounds retire or improve them. The search terminates when the target
//! carries the batch minimum itself: `h = 0` there, so its `f` is its `g`,
//! and no open entry can lead to anything cheaper.

mod arena;
mod frontier;

pub use arena::{NO_PREDECESSOR, NodeArena};
pub use frontier::{OpenEntry, OpenList};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, trace};
use rayon::prelude::*;

use crate::core::{CellId, GridCoord};
use crate::error::Result;
use crate::grid::GridMap;
use crate::heuristic::octile;

use super::{SearchFailure, SearchResult, SearchStats};

/// Configuration for the batch solver.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Nodes extracted per round (`K`).
    pub batch_width: usize,
    /// Maximum rounds before giving up.
    pub max_rounds: usize,
    /// Round-boundary deadline for the whole query.
    pub timeout: Option<Duration>,
    /// Dedicated thread-pool size; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_width: 64,
            max_rounds: usize::MAX,
            timeout: None,
            threads: None,
        }
    }
}

/// A successor emitted by the expansion phase.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    cell: CellId,
    g: f32,
    pred: CellId,
}

/// Batch-parallel A* solver.
pub struct BatchSolver {
    config: BatchConfig,
}

impl BatchSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Find the optimal path from `start` to `target`.
    ///
    /// Fails with a back-end error when the configured thread pool cannot be
    /// built; "no path" is a normal result.
    pub fn solve(&self, grid: &GridMap, start: GridCoord, target: GridCoord) -> Result<SearchResult> {
        self.solve_with_cancel(grid, start, target, None)
    }

    /// As [`solve`](Self::solve), with a cancellation flag checked between
    /// rounds. Rounds are the cancellation quantum; partial state is
    /// discarded.
    pub fn solve_with_cancel(
        &self,
        grid: &GridMap,
        start: GridCoord,
        target: GridCoord,
        cancel: Option<&AtomicBool>,
    ) -> Result<SearchResult> {
        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(|| self.run(grid, start, target, cancel)))
            }
            None => Ok(self.run(grid, start, target, cancel)),
        }
    }

    fn run(
        &self,
        grid: &GridMap,
        start: GridCoord,
        target: GridCoord,
        cancel: Option<&AtomicBool>,
    ) -> SearchResult {
        trace!(
            "[Batch] solve: start=({},{}) target=({},{}) K={}",
            start.x, start.y, target.x, target.y, self.config.batch_width
        );

        let mut stats = SearchStats::default();

        if !grid.contains(start) || !grid.contains(target) {
            debug!("[Batch] FAILED: start or target outside grid");
            return SearchResult::failed(SearchFailure::OutOfBounds, stats);
        }

        let batch_width = self.config.batch_width.max(1);
        let start_id = grid.to_id(start.x, start.y);
        let target_id = grid.to_id(target.x, target.y);

        let arena = NodeArena::new(grid.cell_count());
        let mut closed = vec![false; grid.cell_count()];
        let mut open = OpenList::new();

        let version = arena.seed_start(start_id);
        open.stage(OpenEntry {
            f: octile(start, target),
            g: 0.0,
            cell: start_id,
            version,
        });

        let deadline = self.config.timeout.map(|t| Instant::now() + t);
        let mut batch: Vec<OpenEntry> = Vec::with_capacity(batch_width);

        loop {
            stats.rounds += 1;
            if stats.rounds > self.config.max_rounds {
                debug!("[Batch] FAILED: round limit {} reached", self.config.max_rounds);
                return SearchResult::failed(SearchFailure::LimitExceeded, stats);
            }
            if let Some(flag) = cancel
                && flag.load(Ordering::Acquire)
            {
                debug!("[Batch] cancelled after {} rounds", stats.rounds - 1);
                return SearchResult::failed(SearchFailure::Cancelled, stats);
            }
            if let Some(deadline) = deadline
                && Instant::now() > deadline
            {
                debug!("[Batch] FAILED: deadline passed after {} rounds", stats.rounds - 1);
                return SearchResult::failed(SearchFailure::TimedOut, stats);
            }

            // Extract: take up to K entries, dropping stale ones. An entry is
            // stale when its cell closed or its record was since improved.
            open.merge();
            batch.clear();
            while batch.len() < batch_width {
                let Some(entry) = open.pop() else { break };
                if closed[entry.cell as usize] || arena.version(entry.cell) != entry.version {
                    continue;
                }
                batch.push(entry);
            }

            // Staging is empty after the merge, so an empty batch means the
            // whole open set was consumed or stale.
            if batch.is_empty() {
                debug_assert!(open.is_drained());
                debug!(
                    "[Batch] FAILED: no path after {} rounds, {} expansions",
                    stats.rounds, stats.nodes_expanded
                );
                return SearchResult::failed(SearchFailure::NoPath, stats);
            }

            let f_min = batch[0].f;
            trace!(
                "[Batch] round {}: batch={} f_min={:.3} frontier={}",
                stats.rounds,
                batch.len(),
                f_min,
                open.frontier_len()
            );

            // Terminate when the target carries the batch minimum: its f is
            // its g, and every remaining open entry has f >= f_min.
            if let Some(done) = batch.iter().find(|e| e.cell == target_id && e.f <= f_min) {
                let path = reconstruct_path(grid, &arena, target_id);
                debug!(
                    "[Batch] SUCCESS: cost={:.3}, path={} cells, {} rounds, {} expansions",
                    done.g,
                    path.len(),
                    stats.rounds,
                    stats.nodes_expanded
                );
                return SearchResult::found(path, done.g, stats);
            }

            // Close the minimum-f plateau; those distances are final.
            for entry in batch.iter().filter(|e| e.f <= f_min) {
                closed[entry.cell as usize] = true;
            }
            stats.nodes_expanded += batch.len();

            // Expand every extracted node in parallel.
            let mut candidates: Vec<Candidate> = batch
                .par_iter()
                .flat_map_iter(|entry| {
                    grid.neighbours(entry.cell).map(move |(cell, step)| Candidate {
                        cell,
                        g: entry.g + step,
                        pred: entry.cell,
                    })
                })
                .collect();

            // Intra-batch dedup: one candidate per cell, minimum (g, pred).
            candidates.par_sort_unstable_by(|a, b| {
                a.cell
                    .cmp(&b.cell)
                    .then(a.g.total_cmp(&b.g))
                    .then(a.pred.cmp(&b.pred))
            });
            candidates.dedup_by_key(|c| c.cell);

            // Global relax: candidates into closed cells are dropped, the
            // rest compare-and-swap against the arena; winners get a fresh
            // version and re-enter the open set.
            let improved: Vec<OpenEntry> = candidates
                .par_iter()
                .filter_map(|c| {
                    if closed[c.cell as usize] {
                        return None;
                    }
                    let version = arena.relax(c.cell, c.g, c.pred)?;
                    Some(OpenEntry {
                        f: c.g + octile(grid.to_xy(c.cell), target),
                        g: c.g,
                        cell: c.cell,
                        version,
                    })
                })
                .collect();

            // Reinsert the speculatively expanded entries that are still
            // current, so later rounds can retire them.
            for entry in batch.iter().filter(|e| e.f > f_min) {
                if arena.version(entry.cell) == entry.version {
                    open.stage(*entry);
                }
            }
            open.stage_all(improved);
        }
    }
}

/// Walk the predecessor chain from the target back to the start.
///
/// Predecessors are only written together with a strictly smaller distance,
/// so the chain decreases in g and stays under the cell count.
fn reconstruct_path(grid: &GridMap, arena: &NodeArena, target_id: CellId) -> Vec<GridCoord> {
    let mut path = Vec::new();
    let mut current = target_id;
    loop {
        path.push(grid.to_xy(current));
        let (_, pred) = arena.record(current);
        if pred == NO_PREDECESSOR || path.len() > grid.cell_count() {
            break;
        }
        current = pred;
    }
    path.reverse();
    path
}
