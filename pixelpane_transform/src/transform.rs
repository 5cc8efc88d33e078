// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The screen/canvas/grid conversion pipeline.

use std::fmt;

use kurbo::{Point, Size};
use pixelpane_geometry::{
    GridArea, GridCoord, InvalidStateError, SurfaceEvent, SurfaceGeometry,
    SurfaceGeometryProvider, ViewportConstraints, ViewportState, is_reasonable_point,
};

use crate::cache::GeometryCache;
use crate::error::{ConversionInput, TransformError};
use crate::policy::DevicePolicy;

/// Converts between screen, canvas, and grid space.
///
/// The converter owns the device policy and a TTL cache over the host's
/// surface geometry, but no viewport state: every conversion takes the
/// [`ViewportState`] to convert under, so callers decide whether they mean
/// the renderer's current state or the animation target.
///
/// Screen positions are in the same coordinate space as
/// [`SurfaceGeometry::rect`], the space pointer events report in.
pub struct CoordinateTransform<P> {
    constraints: ViewportConstraints,
    policy: DevicePolicy,
    provider: P,
    cache: GeometryCache,
}

impl<P: SurfaceGeometryProvider> CoordinateTransform<P> {
    /// Creates a converter over a surface-geometry provider.
    #[must_use]
    pub fn new(constraints: ViewportConstraints, policy: DevicePolicy, provider: P) -> Self {
        Self {
            constraints,
            policy,
            provider,
            cache: GeometryCache::new(policy.geometry_ttl),
        }
    }

    /// The grid constraints this converter was built with.
    #[must_use]
    pub fn constraints(&self) -> ViewportConstraints {
        self.constraints
    }

    /// The device policy this converter was built with.
    #[must_use]
    pub fn policy(&self) -> DevicePolicy {
        self.policy
    }

    /// Feeds a platform surface notification into the geometry cache.
    ///
    /// Resize and visual-viewport changes drop the cached snapshot;
    /// orientation changes additionally distrust fresh reads until the
    /// platform has had time to settle on the new dimensions.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        self.cache.handle_event(event);
    }

    /// Drops the cached surface snapshot unconditionally.
    pub fn invalidate_geometry(&mut self) {
        self.cache.invalidate();
    }

    /// Converts a screen position to the grid cell under it.
    ///
    /// `Ok(None)` is a miss: the position is garbage or farther outside the
    /// canvas than the policy's edge tolerance. Positions within the
    /// tolerance band are pulled onto the nearest edge cell, so a click a
    /// hair past the border still paints.
    pub fn screen_to_grid(
        &mut self,
        screen: Point,
        state: ViewportState,
    ) -> Result<Option<GridCoord>, TransformError> {
        validated(state)?;
        if !is_reasonable_point(screen) {
            tracing::debug!(x = screen.x, y = screen.y, "discarding unreasonable screen position");
            return Ok(None);
        }
        let geometry = self.geometry_for(ConversionInput::Screen(screen))?;
        let Some(canvas) = canvas_from_screen(screen, geometry, self.policy) else {
            return Ok(None);
        };
        let scale = self.constraints.pixel_size * state.zoom;
        let world_x = state.offset.x + canvas.x / scale;
        let world_y = state.offset.y + canvas.y / scale;
        let cell = self.constraints.clamp_cell(
            cell_index(self.policy.snap_mode.snap(world_x)),
            cell_index(self.policy.snap_mode.snap(world_y)),
        );
        Ok(Some(cell))
    }

    /// Converts a grid cell to the screen position of its top-left corner.
    ///
    /// `Ok(None)` when the cell is not on the grid. The result can lie
    /// outside the visible surface; callers overlaying UI clip for
    /// themselves.
    pub fn grid_to_screen(
        &mut self,
        cell: GridCoord,
        state: ViewportState,
    ) -> Result<Option<Point>, TransformError> {
        validated(state)?;
        if !self.constraints.contains(cell) {
            return Ok(None);
        }
        let geometry = self.geometry_for(ConversionInput::Cell(cell))?;
        Ok(Some(screen_from_cell(
            cell,
            state,
            geometry,
            self.policy,
            self.constraints.pixel_size,
        )))
    }

    /// Viewport extent in grid cells at `zoom`, for the current surface.
    pub fn viewport_size_in_grid(&mut self, zoom: f64) -> Result<Size, TransformError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(InvalidStateError::Zoom { zoom }.into());
        }
        let geometry = self.geometry_for(ConversionInput::Viewport)?;
        let backing = geometry.backing_size();
        let scale = self.constraints.pixel_size * zoom;
        Ok(Size::new(backing.width / scale, backing.height / scale))
    }

    /// The grid cells with any part inside the viewport, clamped to the
    /// grid.
    pub fn visible_grid_area(&mut self, state: ViewportState) -> Result<GridArea, TransformError> {
        validated(state)?;
        let view = self.viewport_size_in_grid(state.zoom)?;
        let first_x = cell_index(state.offset.x.floor());
        let first_y = cell_index(state.offset.y.floor());
        // The last visible column/row is the one strictly before the far
        // edge; an empty view degenerates to the first cell.
        let last_x = cell_index((state.offset.x + view.width).ceil() - 1.0).max(first_x);
        let last_y = cell_index((state.offset.y + view.height).ceil() - 1.0).max(first_y);
        Ok(GridArea::new(
            self.constraints.clamp_cell(first_x, first_y),
            self.constraints.clamp_cell(last_x, last_y),
        ))
    }

    /// The grid cell at the center of the viewport.
    pub fn viewport_center(&mut self, state: ViewportState) -> Result<GridCoord, TransformError> {
        validated(state)?;
        let view = self.viewport_size_in_grid(state.zoom)?;
        let center_x = state.offset.x + view.width * 0.5;
        let center_y = state.offset.y + view.height * 0.5;
        Ok(self.constraints.clamp_cell(
            cell_index(self.policy.snap_mode.snap(center_x)),
            cell_index(self.policy.snap_mode.snap(center_y)),
        ))
    }

    /// Runs a conversion self-check through both directions of the
    /// pipeline.
    ///
    /// The cell is converted to its screen corner, probed at the interior
    /// point farthest from the policy's snap boundaries, and converted
    /// back. A mismatch means the two directions disagree about the
    /// mapping (paint landing on the wrong cell, from the user's side); it
    /// is logged and reported, never panicked on.
    pub fn check_round_trip(
        &mut self,
        cell: GridCoord,
        state: ViewportState,
    ) -> Result<RoundTrip, TransformError> {
        let Some(corner) = self.grid_to_screen(cell, state)? else {
            return Ok(RoundTrip {
                cell,
                screen: None,
                round_tripped: None,
            });
        };
        let geometry = self.geometry_for(ConversionInput::Cell(cell))?;
        let probe_px = self.policy.snap_mode.probe_offset() * self.constraints.pixel_size
            * state.zoom
            / geometry.device_pixel_ratio;
        let probe = Point::new(corner.x + probe_px, corner.y + probe_px);
        let round_tripped = self.screen_to_grid(probe, state)?;
        let report = RoundTrip {
            cell,
            screen: Some(corner),
            round_tripped,
        };
        if !report.matches() {
            tracing::warn!(
                cell = %cell,
                round_tripped = ?round_tripped,
                zoom = state.zoom,
                "round-trip self-check mismatch"
            );
        }
        Ok(report)
    }

    fn geometry_for(&mut self, input: ConversionInput) -> Result<SurfaceGeometry, TransformError> {
        self.cache
            .get(&self.provider)
            .map_err(|source| TransformError::Geometry { input, source })
    }
}

impl<P> fmt::Debug for CoordinateTransform<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateTransform")
            .field("constraints", &self.constraints)
            .field("policy", &self.policy)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Report from [`CoordinateTransform::check_round_trip`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundTrip {
    /// The cell the check started from.
    pub cell: GridCoord,
    /// Screen position of the cell's top-left corner, if the cell is on
    /// the grid.
    pub screen: Option<Point>,
    /// The cell the probe position converted back to, if it hit.
    pub round_tripped: Option<GridCoord>,
}

impl RoundTrip {
    /// Whether the check came back on the cell it started from.
    #[must_use]
    pub fn matches(&self) -> bool {
        self.round_tripped == Some(self.cell)
    }
}

fn validated(state: ViewportState) -> Result<(), TransformError> {
    state.validate().map_err(|err| {
        tracing::error!(error = %err, "rejecting conversion under invalid viewport state");
        TransformError::from(err)
    })
}

/// Screen position to canvas-local backing pixels, or a miss.
///
/// Applies the policy's visual-viewport correction, rebases onto the
/// content box, rejects positions beyond the edge tolerance, clamps the
/// tolerance band onto the edge, and scales by the device pixel ratio.
fn canvas_from_screen(
    screen: Point,
    geometry: SurfaceGeometry,
    policy: DevicePolicy,
) -> Option<Point> {
    let mut position = screen;
    if policy.use_visual_viewport_offset {
        position += geometry.visual_offset;
    }
    let content = geometry.content_rect();
    let local = Point::new(position.x - content.x0, position.y - content.y0);
    let size = content.size();
    let tolerance = policy.edge_tolerance_px;
    if local.x < -tolerance
        || local.y < -tolerance
        || local.x > size.width + tolerance
        || local.y > size.height + tolerance
    {
        return None;
    }
    let clamped = Point::new(
        local.x.max(0.0).min(size.width),
        local.y.max(0.0).min(size.height),
    );
    Some(Point::new(
        clamped.x * geometry.device_pixel_ratio,
        clamped.y * geometry.device_pixel_ratio,
    ))
}

/// Grid cell's top-left corner to a screen position; exact inverse of the
/// screen-to-canvas steps.
fn screen_from_cell(
    cell: GridCoord,
    state: ViewportState,
    geometry: SurfaceGeometry,
    policy: DevicePolicy,
    pixel_size: f64,
) -> Point {
    let scale = pixel_size * state.zoom;
    let canvas_x = (f64::from(cell.x) - state.offset.x) * scale;
    let canvas_y = (f64::from(cell.y) - state.offset.y) * scale;
    let content = geometry.content_rect();
    let mut position = Point::new(
        content.x0 + canvas_x / geometry.device_pixel_ratio,
        content.y0 + canvas_y / geometry.device_pixel_ratio,
    );
    if policy.use_visual_viewport_offset {
        position -= geometry.visual_offset;
    }
    position
}

/// Truncates a snapped or floored coordinate to a signed cell index.
#[expect(
    clippy::cast_possible_truncation,
    reason = "inputs are validated finite and the result is clamped onto the grid"
)]
fn cell_index(value: f64) -> i64 {
    value as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use kurbo::{Insets, Rect, Vec2};
    use pixelpane_geometry::{GeometryError, InvalidStateError};

    struct Fixed(SurfaceGeometry);

    impl SurfaceGeometryProvider for Fixed {
        fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
            Ok(self.0)
        }
    }

    struct Detached;

    impl SurfaceGeometryProvider for Detached {
        fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
            Err(GeometryError::Detached)
        }
    }

    // Counts fetches through a shared handle, since the converter takes the
    // provider by value.
    struct Counting {
        hits: Rc<Cell<u32>>,
    }

    impl SurfaceGeometryProvider for Counting {
        fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
            self.hits.set(self.hits.get() + 1);
            Ok(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)))
        }
    }

    fn constraints() -> ViewportConstraints {
        ViewportConstraints::new(10.0, 100, 100, 40.0)
    }

    fn state() -> ViewportState {
        ViewportState::new(
            2.0,
            Vec2::new(10.0, 20.0),
            Rect::new(-10.0, -10.0, 110.0, 110.0),
        )
    }

    fn plain_transform() -> CoordinateTransform<Fixed> {
        CoordinateTransform::new(
            constraints(),
            DevicePolicy::desktop(),
            Fixed(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0))),
        )
    }

    #[test]
    fn screen_maps_through_zoom_and_offset() {
        let mut transform = plain_transform();
        // Scale is 20 backing px per cell: 100px right of the origin is 5
        // cells right of the offset.
        let cell = transform
            .screen_to_grid(Point::new(100.0, 60.0), state())
            .unwrap();
        assert_eq!(cell, Some(GridCoord::new(15, 23)));
    }

    #[test]
    fn floor_mode_boundaries_fall_on_cell_corners() {
        let mut transform = plain_transform();
        // One backing pixel short of the corner still lands in the cell.
        let inside = transform
            .screen_to_grid(Point::new(119.0, 79.0), state())
            .unwrap();
        assert_eq!(inside, Some(GridCoord::new(15, 23)));
        // The corner itself is where the next cell starts.
        let corner = transform
            .screen_to_grid(Point::new(120.0, 80.0), state())
            .unwrap();
        assert_eq!(corner, Some(GridCoord::new(16, 24)));
    }

    #[test]
    fn device_pixel_ratio_scales_pointer_positions() {
        let geometry = SurfaceGeometry {
            device_pixel_ratio: 2.0,
            ..SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 400.0, 300.0))
        };
        let mut transform =
            CoordinateTransform::new(constraints(), DevicePolicy::desktop(), Fixed(geometry));
        // 100 unscaled px is 200 backing px, 10 cells at scale 20.
        let cell = transform
            .screen_to_grid(Point::new(100.0, 60.0), state())
            .unwrap();
        assert_eq!(cell, Some(GridCoord::new(20, 26)));
    }

    #[test]
    fn content_insets_shift_the_canvas_origin() {
        let geometry = SurfaceGeometry {
            content_inset: Insets::new(5.0, 3.0, 0.0, 0.0),
            ..SurfaceGeometry::from_rect(Rect::new(50.0, 40.0, 850.0, 640.0))
        };
        let mut transform =
            CoordinateTransform::new(constraints(), DevicePolicy::desktop(), Fixed(geometry));
        // Content origin is (55, 43); the click lands 20x10 px into it.
        let cell = transform
            .screen_to_grid(Point::new(75.0, 53.0), state())
            .unwrap();
        assert_eq!(cell, Some(GridCoord::new(11, 20)));
    }

    #[test]
    fn tolerance_band_clamps_onto_the_edge_cell() {
        let mut transform = plain_transform();
        // 1.5px left of the canvas is within the 2px desktop tolerance and
        // snaps onto the offset column.
        let cell = transform
            .screen_to_grid(Point::new(-1.5, 60.0), state())
            .unwrap();
        assert_eq!(cell, Some(GridCoord::new(10, 23)));
    }

    #[test]
    fn positions_beyond_the_tolerance_miss() {
        let mut transform = plain_transform();
        assert_eq!(
            transform.screen_to_grid(Point::new(-3.0, 60.0), state()).unwrap(),
            None
        );
        assert_eq!(
            transform.screen_to_grid(Point::new(100.0, 603.0), state()).unwrap(),
            None
        );
    }

    #[test]
    fn unreasonable_positions_miss_without_erroring() {
        let mut transform = plain_transform();
        assert_eq!(
            transform
                .screen_to_grid(Point::new(f64::NAN, 60.0), state())
                .unwrap(),
            None
        );
        assert_eq!(
            transform
                .screen_to_grid(Point::new(2.0e6, 60.0), state())
                .unwrap(),
            None
        );
    }

    #[test]
    fn touch_policy_corrects_for_the_visual_viewport() {
        let geometry = SurfaceGeometry {
            visual_offset: Vec2::new(30.0, 10.0),
            ..SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0))
        };
        let mut touch =
            CoordinateTransform::new(constraints(), DevicePolicy::touch(), Fixed(geometry));
        let mut desktop =
            CoordinateTransform::new(constraints(), DevicePolicy::desktop(), Fixed(geometry));

        // The touch policy shifts the position into layout space first.
        let cell = touch.screen_to_grid(Point::new(70.0, 50.0), state()).unwrap();
        assert_eq!(cell, Some(GridCoord::new(15, 23)));
        // A desktop policy reads the same position as-is.
        let cell = desktop.screen_to_grid(Point::new(70.0, 50.0), state()).unwrap();
        assert_eq!(cell, Some(GridCoord::new(13, 22)));
    }

    #[test]
    fn invalid_state_is_rejected_with_the_reason() {
        let mut transform = plain_transform();
        let bad = ViewportState::new(0.0, Vec2::ZERO, Rect::ZERO);
        assert_eq!(
            transform.screen_to_grid(Point::new(1.0, 1.0), bad),
            Err(TransformError::InvalidViewport(InvalidStateError::Zoom {
                zoom: 0.0
            }))
        );
        assert!(transform.grid_to_screen(GridCoord::new(0, 0), bad).is_err());
        assert!(transform.visible_grid_area(bad).is_err());
        assert!(transform.viewport_center(bad).is_err());
    }

    #[test]
    fn detached_surface_errors_carry_the_input() {
        let mut transform =
            CoordinateTransform::new(constraints(), DevicePolicy::desktop(), Detached);
        let err = transform
            .screen_to_grid(Point::new(5.0, 5.0), state())
            .unwrap_err();
        match err {
            TransformError::Geometry { input, source } => {
                assert_eq!(input, ConversionInput::Screen(Point::new(5.0, 5.0)));
                assert_eq!(source, GeometryError::Detached);
            }
            other => panic!("expected a geometry error, got {other:?}"),
        }
    }

    #[test]
    fn invalidate_geometry_forces_a_refetch() {
        let hits = Rc::new(Cell::new(0));
        let mut transform = CoordinateTransform::new(
            constraints(),
            DevicePolicy::desktop(),
            Counting { hits: Rc::clone(&hits) },
        );
        transform.screen_to_grid(Point::new(100.0, 60.0), state()).unwrap();
        assert_eq!(hits.get(), 1);
        transform.invalidate_geometry();
        transform.screen_to_grid(Point::new(100.0, 60.0), state()).unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn cells_map_back_to_their_screen_corner() {
        let mut transform = plain_transform();
        let corner = transform
            .grid_to_screen(GridCoord::new(15, 23), state())
            .unwrap();
        assert_eq!(corner, Some(Point::new(100.0, 60.0)));
    }

    #[test]
    fn off_grid_cells_have_no_screen_position() {
        let mut transform = plain_transform();
        assert_eq!(
            transform.grid_to_screen(GridCoord::new(100, 0), state()).unwrap(),
            None
        );
    }

    #[test]
    fn grid_to_screen_inverts_the_device_pipeline() {
        let geometry = SurfaceGeometry {
            device_pixel_ratio: 2.0,
            content_inset: Insets::new(5.0, 3.0, 0.0, 0.0),
            visual_offset: Vec2::new(30.0, 10.0),
            ..SurfaceGeometry::from_rect(Rect::new(50.0, 40.0, 850.0, 640.0))
        };
        let mut transform =
            CoordinateTransform::new(constraints(), DevicePolicy::touch(), Fixed(geometry));
        let state = state();
        let corner = transform
            .grid_to_screen(GridCoord::new(30, 40), state)
            .unwrap()
            .expect("cell is on the grid");
        // Re-entering the pipeline at the corner lands on the same cell.
        let cell = transform.screen_to_grid(corner, state).unwrap();
        assert_eq!(cell, Some(GridCoord::new(30, 40)));
    }

    #[test]
    fn viewport_size_counts_cells_at_zoom() {
        let mut transform = plain_transform();
        assert_eq!(
            transform.viewport_size_in_grid(2.0).unwrap(),
            Size::new(40.0, 30.0)
        );
        assert_eq!(
            transform.viewport_size_in_grid(0.5).unwrap(),
            Size::new(160.0, 120.0)
        );
        assert!(transform.viewport_size_in_grid(0.0).is_err());
        assert!(transform.viewport_size_in_grid(f64::NAN).is_err());
    }

    #[test]
    fn visible_area_includes_partial_cells() {
        let mut transform = plain_transform();
        let state = ViewportState::new(
            2.0,
            Vec2::new(10.4, 20.9),
            Rect::new(-10.0, -10.0, 110.0, 110.0),
        );
        let area = transform.visible_grid_area(state).unwrap();
        assert_eq!(area.top_left, GridCoord::new(10, 20));
        assert_eq!(area.bottom_right, GridCoord::new(50, 50));
    }

    #[test]
    fn visible_area_clamps_to_the_grid() {
        let mut transform = plain_transform();
        let zoomed_out = ViewportState::new(
            0.57,
            Vec2::new(-20.2, -2.6),
            Rect::new(-50.0, -50.0, 150.0, 150.0),
        );
        let area = transform.visible_grid_area(zoomed_out).unwrap();
        assert_eq!(area.top_left, GridCoord::new(0, 0));
        assert_eq!(area.bottom_right, GridCoord::new(99, 99));
    }

    #[test]
    fn viewport_center_is_the_middle_cell() {
        let mut transform = plain_transform();
        // Offset (10, 20) plus half of a 40x30-cell view.
        assert_eq!(
            transform.viewport_center(state()).unwrap(),
            GridCoord::new(30, 35)
        );
    }

    #[test]
    fn round_trip_reports_a_match_under_both_snap_modes() {
        for policy in [DevicePolicy::desktop(), DevicePolicy::touch()] {
            let mut transform = CoordinateTransform::new(
                constraints(),
                policy,
                Fixed(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0))),
            );
            let report = transform
                .check_round_trip(GridCoord::new(15, 23), state())
                .unwrap();
            assert!(report.matches(), "round trip failed under {policy:?}");
        }
    }

    #[test]
    fn round_trip_of_an_off_grid_cell_reports_no_match() {
        let mut transform = plain_transform();
        let report = transform
            .check_round_trip(GridCoord::new(100, 100), state())
            .unwrap();
        assert!(!report.matches());
        assert_eq!(report.screen, None);
    }
}
