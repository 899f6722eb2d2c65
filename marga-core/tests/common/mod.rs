//! Shared helpers for the integration suites.
#![allow(dead_code)]

use marga_core::{Direction, GridCoord, GridMap};

/// Check a returned path edge by edge against the grid and return its cost.
///
/// Asserts that the path runs from `start` to `target`, that every step
/// follows an enabled connectivity bit, and returns the re-summed step cost.
pub fn checked_path_cost(
    grid: &GridMap,
    start: GridCoord,
    target: GridCoord,
    path: &[GridCoord],
) -> f32 {
    assert!(!path.is_empty(), "path must not be empty");
    assert_eq!(path[0], start, "path must begin at the start cell");
    assert_eq!(*path.last().unwrap(), target, "path must end at the target");

    let mut cost = 0.0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let step = Direction::ALL
            .into_iter()
            .find(|d| {
                let (dx, dy) = d.offset();
                (from.x + dx, from.y + dy) == (to.x, to.y)
            })
            .unwrap_or_else(|| panic!("({},{}) -> ({},{}) is not an 8-neighbour step",
                from.x, from.y, to.x, to.y));

        let id = grid.to_id(from.x, from.y);
        assert_ne!(
            grid.mask(id) & step.bit(),
            0,
            "step ({},{}) -> ({},{}) is not enabled on the grid",
            from.x,
            from.y,
            to.x,
            to.y
        );
        cost += step.cost();
    }
    cost
}

/// Disable every diagonal edge on the grid, in both directions.
pub fn strip_diagonals(grid: &mut GridMap) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            for dir in Direction::ALL.into_iter().filter(|d| d.is_diagonal()) {
                grid.disable(GridCoord::new(x, y), dir);
            }
        }
    }
}
