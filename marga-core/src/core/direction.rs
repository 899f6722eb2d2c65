//! The fixed 8-direction move table.
//!
//! Every producer of connectivity masks (map sources, grid editing helpers)
//! and every consumer (both solvers, the renderer) shares this table. Bit `k`
//! of a cell's mask permits the step to neighbour `k`.
//!
//! Indices 0-3 are the axial moves at step cost 1, indices 4-7 are the
//! diagonal moves at step cost sqrt(2).

use std::f32::consts::SQRT_2;

/// One of the eight grid move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    West = 1,
    North = 2,
    South = 3,
    NorthEast = 4,
    NorthWest = 5,
    SouthEast = 6,
    SouthWest = 7,
}

/// (dx, dy) per direction index.
const OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Step cost per direction index.
const COSTS: [f32; 8] = [1.0, 1.0, 1.0, 1.0, SQRT_2, SQRT_2, SQRT_2, SQRT_2];

/// Index of the reversed move per direction index.
const OPPOSITES: [u8; 8] = [1, 0, 3, 2, 7, 6, 5, 4];

impl Direction {
    /// All eight directions in mask-bit order.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Mask bit index of this direction.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Mask bit of this direction.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Coordinate offset of this move.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        OFFSETS[self as usize]
    }

    /// Step cost of this move.
    #[inline]
    pub const fn cost(self) -> f32 {
        COSTS[self as usize]
    }

    /// True for the four diagonal moves.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        (self as u8) >= 4
    }

    /// The reversed move.
    #[inline]
    pub const fn opposite(self) -> Direction {
        Direction::ALL[OPPOSITES[self as usize] as usize]
    }

    /// Direction from a mask bit index in `0..8`.
    #[inline]
    pub const fn from_index(index: usize) -> Direction {
        Direction::ALL[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_and_costs_line_up() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let axial = dx == 0 || dy == 0;
            assert_eq!(dir.is_diagonal(), !axial);
            if axial {
                assert_eq!(dir.cost(), 1.0);
            } else {
                assert_eq!(dir.cost(), SQRT_2);
            }
        }
    }

    #[test]
    fn test_opposite_reverses_offset() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx, dy), (-ox, -oy));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u8;
        for dir in Direction::ALL {
            assert_eq!(seen & dir.bit(), 0);
            seen |= dir.bit();
        }
        assert_eq!(seen, 0xff);
    }
}
