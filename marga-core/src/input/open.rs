//! Fully-connected map source.

use crate::core::{Direction, GridCoord};

use super::MapSource;

/// Enables every in-range step; start and target sit in opposite corners.
#[derive(Clone, Debug)]
pub struct OpenMapSource {
    width: usize,
    height: usize,
}

impl OpenMapSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl MapSource for OpenMapSource {
    fn generate(&mut self, masks: &mut [u8]) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let mut mask = 0u8;
                for dir in Direction::ALL {
                    let (dx, dy) = dir.offset();
                    let (nx, ny) = (x + dx, y + dy);
                    if nx >= 0
                        && ny >= 0
                        && (nx as usize) < self.width
                        && (ny as usize) < self.height
                    {
                        mask |= dir.bit();
                    }
                }
                masks[y as usize * self.width + x as usize] = mask;
            }
        }
    }

    fn start(&self) -> GridCoord {
        GridCoord::new(0, 0)
    }

    fn target(&self) -> GridCoord {
        GridCoord::new(self.width as i32 - 1, self.height as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_match_open_grid() {
        let mut source = OpenMapSource::new(5, 4);
        let mut masks = vec![0u8; 20];
        source.generate(&mut masks);

        let grid = crate::grid::GridMap::open(5, 4).unwrap();
        assert_eq!(masks, grid.masks_raw());
    }
}
