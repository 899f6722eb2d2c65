//! Octile-distance heuristic.
//!
//! The shortest possible distance between two cells on an 8-connected grid
//! with axial cost 1 and diagonal cost sqrt(2). Admissible and consistent for
//! the step costs in [`core::direction`](crate::core::direction), so the
//! first time a solver finalises a cell its distance is optimal.

use crate::core::GridCoord;
use std::f32::consts::SQRT_2;

/// Octile distance from `from` to `to`.
#[inline]
pub fn octile(from: GridCoord, to: GridCoord) -> f32 {
    let dx = (from.x - to.x).abs() as f32;
    let dy = (from.y - to.y).abs() as f32;
    let min = dx.min(dy);
    let max = dx.max(dy);
    min * SQRT_2 + (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    #[test]
    fn test_octile_axial_and_diagonal() {
        let origin = GridCoord::new(0, 0);
        assert_eq!(octile(origin, GridCoord::new(5, 0)), 5.0);
        assert_eq!(octile(origin, GridCoord::new(0, 3)), 3.0);
        assert_eq!(octile(origin, GridCoord::new(4, 4)), 4.0 * SQRT_2);
        let mixed = octile(origin, GridCoord::new(5, 2));
        assert!((mixed - (2.0 * SQRT_2 + 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_octile_symmetry() {
        let a = GridCoord::new(-3, 7);
        let b = GridCoord::new(9, -1);
        assert_eq!(octile(a, b), octile(b, a));
        assert_eq!(octile(a, a), 0.0);
    }

    #[test]
    fn test_octile_consistency_over_single_steps() {
        // h(u) <= cost(u, v) + h(v) for every move from every cell in a
        // neighbourhood of the target.
        let target = GridCoord::new(0, 0);
        for x in -4..=4 {
            for y in -4..=4 {
                let u = GridCoord::new(x, y);
                for dir in Direction::ALL {
                    let (dx, dy) = dir.offset();
                    let v = GridCoord::new(x + dx, y + dy);
                    assert!(octile(u, target) <= dir.cost() + octile(v, target) + 1e-6);
                }
            }
        }
    }
}
