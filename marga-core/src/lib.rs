//! # Marga-Core: Grid Pathway Finding
//!
//! Optimal shortest paths on 8-connected grids, with two interchangeable
//! solvers over the same map:
//!
//! - **Sequential A\***: binary-heap open set, hash-indexed closed set and
//!   node table. The reference baseline for correctness.
//! - **Batch-parallel A\***: extracts batches of open nodes per round,
//!   expands them concurrently, deduplicates successors and relaxes a
//!   lock-free per-cell arena. Designed for data-parallel back-ends.
//!
//! Axial steps cost 1, diagonal steps cost sqrt(2); each cell carries an
//! 8-bit connectivity mask over the fixed [`Direction`] table. The
//! [`Driver`] runs both solvers on one map and cross-checks their optimal
//! costs; paths may differ when multiple optima exist.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_core::{Driver, GridCoord, GridMap};
//!
//! let grid = GridMap::open(8, 8).unwrap();
//! let report = Driver::with_defaults()
//!     .run(&grid, GridCoord::new(0, 0), GridCoord::new(7, 7))
//!     .unwrap();
//!
//! let solution = report.solution().unwrap();
//! println!("cost {:.3} over {} cells", solution.cost, solution.path.len());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: cell coordinates, IDs and the 8-direction move table
//! - [`grid`]: connectivity grid with the ID bijection and neighbour walk
//! - [`heuristic`]: octile distance
//! - [`search`]: the two solvers
//! - [`input`]: map sources filling grids with connectivity masks
//! - [`driver`]: solver selection and cross-checking

pub mod core;
pub mod driver;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod input;
pub mod search;

pub use self::core::{CellId, Direction, GridCoord};
pub use self::driver::{Driver, DriverConfig, QueryReport, SolverSelection, costs_agree};
pub use self::error::{Result, SearchError};
pub use self::grid::GridMap;
pub use self::input::{MapSource, OpenMapSource, PreparedMap, RandomMapSource, prepare};
pub use self::search::{
    BatchConfig, BatchSolver, SearchFailure, SearchResult, SearchStats, SequentialConfig,
    SequentialSolver,
};
