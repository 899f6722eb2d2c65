//! Connectivity grid for pathway queries.
//!
//! Each cell carries an 8-bit mask over the [`Direction`] table; bit `k` set
//! means the step to neighbour `k` is permitted. Masks are directed: enabling
//! a step does not enable the reverse step.

use crate::core::{CellId, Direction, GridCoord};
use crate::error::{Result, SearchError};

/// A `width x height` grid of connectivity masks in row-major order.
///
/// Cell IDs are dense: `id = y * width + x`, a total bijection on
/// `[0, width * height)`.
#[derive(Clone, Debug)]
pub struct GridMap {
    masks: Vec<u8>,
    width: usize,
    height: usize,
}

impl GridMap {
    /// Create a grid with no edges enabled.
    ///
    /// Fails with [`SearchError::Capacity`] when the cell count does not fit
    /// the dense `u32` ID space.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let cells = width
            .checked_mul(height)
            .filter(|&n| n > 0 && n <= u32::MAX as usize)
            .ok_or(SearchError::Capacity { width, height })?;
        Ok(Self {
            masks: vec![0; cells],
            width,
            height,
        })
    }

    /// Create a fully-connected grid: every in-range step enabled.
    pub fn open(width: usize, height: usize) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let mut mask = 0u8;
                for dir in Direction::ALL {
                    let (dx, dy) = dir.offset();
                    if grid.in_range(x + dx, y + dy) {
                        mask |= dir.bit();
                    }
                }
                let id = grid.to_id(x, y);
                grid.masks[id as usize] = mask;
            }
        }
        Ok(grid)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.masks.len()
    }

    /// Check if a coordinate is within bounds.
    #[inline]
    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Check if a grid coordinate is within bounds.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.in_range(coord.x, coord.y)
    }

    /// Dense cell ID of an in-range coordinate.
    #[inline]
    pub fn to_id(&self, x: i32, y: i32) -> CellId {
        debug_assert!(self.in_range(x, y));
        y as u32 * self.width as u32 + x as u32
    }

    /// Coordinate of a cell ID.
    #[inline]
    pub fn to_xy(&self, id: CellId) -> GridCoord {
        GridCoord::new(
            (id % self.width as u32) as i32,
            (id / self.width as u32) as i32,
        )
    }

    /// Connectivity mask of a cell.
    #[inline]
    pub fn mask(&self, id: CellId) -> u8 {
        self.masks[id as usize]
    }

    /// Raw mask buffer in row-major order (for map sources and renderers).
    #[inline]
    pub fn masks_raw(&self) -> &[u8] {
        &self.masks
    }

    /// Mutable raw mask buffer, filled by [`MapSource::generate`].
    ///
    /// [`MapSource::generate`]: crate::input::MapSource::generate
    #[inline]
    pub fn masks_raw_mut(&mut self) -> &mut [u8] {
        &mut self.masks
    }

    /// Enable the step from `coord` toward `dir`.
    pub fn enable(&mut self, coord: GridCoord, dir: Direction) {
        let id = self.to_id(coord.x, coord.y);
        self.masks[id as usize] |= dir.bit();
    }

    /// Disable the step from `coord` toward `dir`.
    pub fn disable(&mut self, coord: GridCoord, dir: Direction) {
        let id = self.to_id(coord.x, coord.y);
        self.masks[id as usize] &= !dir.bit();
    }

    /// Enable the step from `coord` toward `dir` and its reverse.
    pub fn enable_undirected(&mut self, coord: GridCoord, dir: Direction) {
        self.enable(coord, dir);
        let (dx, dy) = dir.offset();
        let other = GridCoord::new(coord.x + dx, coord.y + dy);
        if self.contains(other) {
            self.enable(other, dir.opposite());
        }
    }

    /// Disable the step from `coord` toward `dir` and its reverse.
    pub fn disable_undirected(&mut self, coord: GridCoord, dir: Direction) {
        self.disable(coord, dir);
        let (dx, dy) = dir.offset();
        let other = GridCoord::new(coord.x + dx, coord.y + dy);
        if self.contains(other) {
            self.disable(other, dir.opposite());
        }
    }

    /// Disable every step into and out of `coord`.
    pub fn isolate(&mut self, coord: GridCoord) {
        for dir in Direction::ALL {
            self.disable_undirected(coord, dir);
        }
    }

    /// Lazily enumerate the permitted, in-range neighbours of a cell as
    /// `(neighbour_id, step_cost)` pairs.
    #[inline]
    pub fn neighbours(&self, id: CellId) -> Neighbours<'_> {
        Neighbours {
            grid: self,
            origin: self.to_xy(id),
            mask: self.mask(id),
            next: 0,
        }
    }
}

/// Iterator over the permitted neighbours of one cell.
pub struct Neighbours<'a> {
    grid: &'a GridMap,
    origin: GridCoord,
    mask: u8,
    next: usize,
}

impl Iterator for Neighbours<'_> {
    type Item = (CellId, f32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < 8 {
            let dir = Direction::from_index(self.next);
            self.next += 1;
            if self.mask & dir.bit() == 0 {
                continue;
            }
            let (dx, dy) = dir.offset();
            let (nx, ny) = (self.origin.x + dx, self.origin.y + dy);
            if self.grid.in_range(nx, ny) {
                return Some((self.grid.to_id(nx, ny), dir.cost()));
            }
        }
        None
    }
}
