// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure pan/zoom bounds math.
//!
//! Everything in this module is a pure function of the grid constraints, the
//! device tuning, the surface extent in backing pixels, and a zoom factor.
//! The viewport manager recomputes bounds through these functions whenever
//! any of those inputs change; tests can probe the policy directly without
//! standing up a manager.

use kurbo::{Rect, Size, Vec2};
use pixelpane_geometry::ViewportConstraints;

use crate::ViewportTuning;

/// Viewport extent in grid cells at `zoom`, for a surface of `surface_px`
/// backing pixels.
#[must_use]
pub fn viewport_size_in_grid(
    constraints: ViewportConstraints,
    surface_px: Size,
    zoom: f64,
) -> Size {
    let scale = constraints.pixel_size * zoom;
    Size::new(surface_px.width / scale, surface_px.height / scale)
}

/// The fit-to-grid zoom: the largest zoom that shows the whole grid.
///
/// The tuning's fit margin backs the exact fit off a little so the grid edge
/// never touches the surface edge, and the result is kept inside
/// `[tuning.zoom_floor, constraints.max_zoom]`. A degenerate or non-finite
/// surface yields the floor.
#[must_use]
pub fn fit_zoom(constraints: ViewportConstraints, tuning: ViewportTuning, surface_px: Size) -> f64 {
    if !(surface_px.width.is_finite() && surface_px.height.is_finite())
        || surface_px.width <= 0.0
        || surface_px.height <= 0.0
    {
        return tuning.zoom_floor;
    }
    let grid_px = Size::new(
        f64::from(constraints.grid_width) * constraints.pixel_size,
        f64::from(constraints.grid_height) * constraints.pixel_size,
    );
    let exact = (surface_px.width / grid_px.width).min(surface_px.height / grid_px.height);
    let padded = exact * (1.0 - tuning.fit_margin);
    padded.max(tuning.zoom_floor).min(constraints.max_zoom)
}

/// The offset that centers the grid in the viewport at `zoom`.
///
/// Components go negative when the viewport is larger than the grid on that
/// axis; the view then extends past the grid edge on both sides.
#[must_use]
pub fn centered_offset(constraints: ViewportConstraints, surface_px: Size, zoom: f64) -> Vec2 {
    let view = viewport_size_in_grid(constraints, surface_px, zoom);
    let grid = constraints.grid_size();
    Vec2::new(
        (grid.width - view.width) * 0.5,
        (grid.height - view.height) * 0.5,
    )
}

/// The legal pan-offset range at `zoom`.
///
/// In the returned rectangle, `x0..x1` is the legal range for `offset.x`
/// and `y0..y1` the legal range for `offset.y`.
///
/// Two regimes:
/// - Viewport at least as large as the grid on both axes: the grid stays
///   essentially centered, with the tuning's roam allowance of slack around
///   the centered position.
/// - Otherwise: the range keeps some part of the grid in view on every
///   axis, widened by the tuning's edge padding so clamping at the exact
///   limit cannot clip the outermost cells to rounding.
#[must_use]
pub fn pan_bounds(
    constraints: ViewportConstraints,
    tuning: ViewportTuning,
    surface_px: Size,
    zoom: f64,
) -> Rect {
    let view = viewport_size_in_grid(constraints, surface_px, zoom);
    let grid = constraints.grid_size();
    if view.width >= grid.width && view.height >= grid.height {
        let center = centered_offset(constraints, surface_px, zoom);
        let allowance = tuning.roam_allowance * grid.width.min(grid.height);
        Rect::new(
            center.x - allowance,
            center.y - allowance,
            center.x + allowance,
            center.y + allowance,
        )
    } else {
        let padding = tuning.edge_padding * view.width.min(view.height);
        let (x0, x1) = axis_range(grid.width, view.width, padding);
        let (y0, y1) = axis_range(grid.height, view.height, padding);
        Rect::new(x0, y0, x1, y1)
    }
}

/// Offset range on one axis when the grid must stay in view.
///
/// When the grid is larger than the viewport the range spans
/// `0..grid - view`; when the viewport is larger the span flips, letting
/// the grid sit anywhere within the view.
fn axis_range(grid: f64, view: f64, padding: f64) -> (f64, f64) {
    let span = grid - view;
    (span.min(0.0) - padding, span.max(0.0) + padding)
}

/// Clamps `offset` into `bounds`.
///
/// Total over all float inputs: non-finite components come back pinned to a
/// bounds edge rather than propagating.
#[must_use]
pub fn clamp_offset(offset: Vec2, bounds: Rect) -> Vec2 {
    Vec2::new(
        offset.x.max(bounds.x0).min(bounds.x1),
        offset.y.max(bounds.y0).min(bounds.y1),
    )
}
