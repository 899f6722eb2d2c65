//! Map sources.
//!
//! A [`MapSource`] fills a grid's connectivity masks in row-major order using
//! the fixed [`Direction`](crate::core::Direction) convention and supplies
//! the query endpoints. Any source honouring that contract is acceptable;
//! this module provides a fully-open source and a seeded random source.

mod open;
mod random;

pub use open::OpenMapSource;
pub use random::RandomMapSource;

use crate::core::GridCoord;
use crate::error::Result;
use crate::grid::GridMap;

/// Producer of connectivity masks and query endpoints.
pub trait MapSource {
    /// Fill `masks` (one byte per cell, row-major) with connectivity bits.
    fn generate(&mut self, masks: &mut [u8]);

    /// Start cell of the query; must be within range.
    fn start(&self) -> GridCoord;

    /// Target cell of the query; must be within range.
    fn target(&self) -> GridCoord;
}

/// A grid with its query endpoints, ready for the solvers.
#[derive(Clone, Debug)]
pub struct PreparedMap {
    pub grid: GridMap,
    pub start: GridCoord,
    pub target: GridCoord,
}

/// Allocate a grid and fill it from a map source.
pub fn prepare(width: usize, height: usize, source: &mut dyn MapSource) -> Result<PreparedMap> {
    let mut grid = GridMap::new(width, height)?;
    source.generate(grid.masks_raw_mut());
    let (start, target) = (source.start(), source.target());
    debug_assert!(grid.contains(start) && grid.contains(target));
    Ok(PreparedMap {
        grid,
        start,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_open_map() {
        let mut source = OpenMapSource::new(4, 3);
        let map = prepare(4, 3, &mut source).unwrap();
        assert_eq!(map.grid.width(), 4);
        assert_eq!(map.grid.height(), 3);
        assert_eq!(map.start, GridCoord::new(0, 0));
        assert_eq!(map.target, GridCoord::new(3, 2));
    }
}
