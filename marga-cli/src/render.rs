//! SVG rendering of a grid and its solution path.
//!
//! Each cell is drawn as a dot with half-edges toward the neighbours its
//! mask permits, so one-way connectivity stays visible. The solution path is
//! overlaid as a polyline between cell centres.

use std::path::Path;

use svg::Document;
use svg::node::element::{Circle, Line, Polyline, Rectangle};

use marga_core::{Direction, GridCoord, GridMap};

use crate::error::Result;

/// Pixels per grid cell.
const CELL: f32 = 24.0;
/// Fraction of the cell span covered by a half-edge stroke.
const EDGE_REACH: f32 = 0.42;

/// Centre of a cell in SVG coordinates (SVG y grows downward).
fn centre(grid: &GridMap, coord: GridCoord) -> (f32, f32) {
    (
        (coord.x as f32 + 0.5) * CELL,
        (grid.height() as f32 - coord.y as f32 - 0.5) * CELL,
    )
}

/// Render the grid, endpoints and an optional path to an SVG file.
pub fn save_svg(
    grid: &GridMap,
    start: GridCoord,
    target: GridCoord,
    path: &[GridCoord],
    out: &Path,
) -> Result<()> {
    let (image_w, image_h) = (
        grid.width() as f32 * CELL,
        grid.height() as f32 * CELL,
    );

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, image_w, image_h))
        .add(
            Rectangle::new()
                .set("width", image_w)
                .set("height", image_h)
                .set("fill", "#ffffff"),
        );

    // Connectivity half-edges.
    for id in 0..grid.cell_count() as u32 {
        let coord = grid.to_xy(id);
        let (cx, cy) = centre(grid, coord);
        let mask = grid.mask(id);
        for dir in Direction::ALL {
            if mask & dir.bit() == 0 {
                continue;
            }
            let (dx, dy) = dir.offset();
            if !grid.in_range(coord.x + dx, coord.y + dy) {
                continue;
            }
            document = document.add(
                Line::new()
                    .set("x1", cx)
                    .set("y1", cy)
                    .set("x2", cx + dx as f32 * CELL * EDGE_REACH)
                    .set("y2", cy - dy as f32 * CELL * EDGE_REACH)
                    .set("stroke", "#c8c8c8")
                    .set("stroke-width", 1.0),
            );
        }
        document = document.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", CELL * 0.08)
                .set("fill", "#808080"),
        );
    }

    // Solution path between cell centres.
    if path.len() >= 2 {
        let points = path
            .iter()
            .map(|&coord| {
                let (x, y) = centre(grid, coord);
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        document = document.add(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", "#00a000")
                .set("stroke-width", 2.5),
        );
    }

    // Endpoints on top.
    let (sx, sy) = centre(grid, start);
    let (tx, ty) = centre(grid, target);
    document = document
        .add(
            Circle::new()
                .set("cx", sx)
                .set("cy", sy)
                .set("r", CELL * 0.25)
                .set("fill", "#0060d0"),
        )
        .add(
            Circle::new()
                .set("cx", tx)
                .set("cy", ty)
                .set("r", CELL * 0.25)
                .set("fill", "#d03020"),
        );

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    svg::save(out, &document)?;
    Ok(())
}
