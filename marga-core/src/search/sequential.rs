//! Sequential A* reference solver.
//!
//! Classic A* with a binary-heap open set, a hash-indexed closed set and a
//! hash-indexed node table holding the best known distance per cell. Stale
//! heap entries left behind by relaxation are filtered by the closed-set
//! check on pop.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, trace};

use crate::core::{CellId, GridCoord};
use crate::grid::GridMap;
use crate::heuristic::octile;

use super::{SearchFailure, SearchResult, SearchStats};

/// Configuration for the sequential solver.
#[derive(Clone, Debug)]
pub struct SequentialConfig {
    /// Maximum node expansions before giving up.
    pub max_expansions: usize,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            max_expansions: usize::MAX,
        }
    }
}

/// Best known distance and predecessor for a discovered cell.
struct NodeRecord {
    g: f32,
    prev: Option<CellId>,
}

/// Open-set entry ordered by `f`, smallest first.
#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    id: CellId,
    f: f32,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other.f.partial_cmp(&self.f).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sequential A* solver.
pub struct SequentialSolver {
    config: SequentialConfig,
}

impl SequentialSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: SequentialConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SequentialConfig::default())
    }

    /// Find the optimal path from `start` to `target`.
    pub fn solve(&self, grid: &GridMap, start: GridCoord, target: GridCoord) -> SearchResult {
        trace!(
            "[Sequential] solve: start=({},{}) target=({},{})",
            start.x, start.y, target.x, target.y
        );

        let mut stats = SearchStats::default();

        if !grid.contains(start) || !grid.contains(target) {
            debug!("[Sequential] FAILED: start or target outside grid");
            return SearchResult::failed(SearchFailure::OutOfBounds, stats);
        }

        let start_id = grid.to_id(start.x, start.y);
        let target_id = grid.to_id(target.x, target.y);

        let mut open: BinaryHeap<HeapEntry> = BinaryHeap::new();
        let mut closed: HashSet<CellId> = HashSet::new();
        let mut table: HashMap<CellId, NodeRecord> = HashMap::new();

        table.insert(start_id, NodeRecord { g: 0.0, prev: None });
        open.push(HeapEntry {
            id: start_id,
            f: octile(start, target),
        });

        while let Some(entry) = open.pop() {
            // Stale entries point at already-finalised cells.
            if closed.contains(&entry.id) {
                continue;
            }
            closed.insert(entry.id);

            stats.nodes_expanded += 1;
            stats.rounds += 1;
            if stats.nodes_expanded > self.config.max_expansions {
                debug!(
                    "[Sequential] FAILED: expansion limit {} reached",
                    self.config.max_expansions
                );
                return SearchResult::failed(SearchFailure::LimitExceeded, stats);
            }

            let g = table[&entry.id].g;

            if entry.id == target_id {
                let path = self.reconstruct_path(grid, &table, target_id);
                trace!(
                    "[Sequential] SUCCESS: cost={:.3}, path={} cells, expanded={}",
                    g,
                    path.len(),
                    stats.nodes_expanded
                );
                return SearchResult::found(path, g, stats);
            }

            for (neighbour_id, step_cost) in grid.neighbours(entry.id) {
                let tentative = g + step_cost;
                let known = table.get(&neighbour_id).map_or(f32::INFINITY, |r| r.g);
                if tentative < known {
                    table.insert(
                        neighbour_id,
                        NodeRecord {
                            g: tentative,
                            prev: Some(entry.id),
                        },
                    );
                    // Any older heap entry goes stale and is dropped by the
                    // closed-set check on a later pop.
                    open.push(HeapEntry {
                        id: neighbour_id,
                        f: tentative + octile(grid.to_xy(neighbour_id), target),
                    });
                }
            }
        }

        debug!(
            "[Sequential] FAILED: no path after expanding {} nodes",
            stats.nodes_expanded
        );
        SearchResult::failed(SearchFailure::NoPath, stats)
    }

    /// Walk predecessors from the target back to the start and reverse.
    fn reconstruct_path(
        &self,
        grid: &GridMap,
        table: &HashMap<CellId, NodeRecord>,
        target_id: CellId,
    ) -> Vec<GridCoord> {
        let mut path = Vec::new();
        let mut current = Some(target_id);
        while let Some(id) = current {
            path.push(grid.to_xy(id));
            current = table[&id].prev;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::SQRT_2;

    #[test]
    fn test_diagonal_run() {
        let grid = GridMap::open(3, 3).unwrap();
        let solver = SequentialSolver::with_defaults();
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(2, 2));

        assert!(result.success);
        assert!((result.cost - 2.0 * SQRT_2).abs() < 1e-5);
        assert_eq!(result.path.first(), Some(&GridCoord::new(0, 0)));
        assert_eq!(result.path.last(), Some(&GridCoord::new(2, 2)));
        assert_eq!(result.path.len(), 3);
    }

    #[test]
    fn test_trivial_query() {
        let grid = GridMap::open(1, 1).unwrap();
        let solver = SequentialSolver::with_defaults();
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(0, 0));

        assert!(result.success);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.path, vec![GridCoord::new(0, 0)]);
    }

    #[test]
    fn test_no_edges_means_no_path() {
        let grid = GridMap::new(4, 4).unwrap();
        let solver = SequentialSolver::with_defaults();
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(3, 3));

        assert!(!result.success);
        assert_eq!(result.failure, Some(SearchFailure::NoPath));
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_out_of_bounds_query() {
        let grid = GridMap::open(2, 2).unwrap();
        let solver = SequentialSolver::with_defaults();
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(5, 0));
        assert!(!result.success);
        assert_eq!(result.failure, Some(SearchFailure::OutOfBounds));
    }

    #[test]
    fn test_relaxation_prefers_cheaper_route() {
        // Axial detour (cost 2) vs direct diagonal (cost sqrt2) to (1,1).
        let mut grid = GridMap::open(2, 2).unwrap();
        grid.disable(GridCoord::new(0, 0), crate::core::Direction::NorthEast);
        let solver = SequentialSolver::with_defaults();
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(1, 1));

        assert!(result.success);
        assert!((result.cost - 2.0).abs() < 1e-5);
        assert_eq!(result.path.len(), 3);
    }

    #[test]
    fn test_expansion_limit() {
        let grid = GridMap::open(16, 16).unwrap();
        let solver = SequentialSolver::new(SequentialConfig { max_expansions: 3 });
        let result = solver.solve(&grid, GridCoord::new(0, 0), GridCoord::new(15, 15));
        assert!(!result.success);
        assert_eq!(result.failure, Some(SearchFailure::LimitExceeded));
    }
}
