// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animated pan/zoom state machine.

use std::fmt;

use kurbo::{Point, Size, Vec2};
use pixelpane_geometry::{
    GridCoord, SurfaceGeometryProvider, ViewportConstraints, ViewportState, is_reasonable_point,
};

use crate::bounds;
use crate::events::{ChangeSource, ListenerId, Listeners, ViewportChange};
use crate::tuning::ViewportTuning;

/// Fraction of the remaining distance covered per animation tick.
///
/// Exponential easing: every tick moves zoom and offset this fraction of
/// the way to the target, so motion starts fast and settles smoothly.
pub const ANIMATION_SPEED: f64 = 0.15;

/// Delta below which the animation snaps to its target and stops.
///
/// Applied to the zoom factor and to each offset component, all three of
/// which live in ranges where a remaining distance this small is invisible.
pub const SNAP_THRESHOLD: f64 = 0.01;

/// Owns pan/zoom state for one grid canvas and animates between targets.
///
/// The manager keeps two [`ViewportState`]s: `target` is where the view is
/// headed and moves instantly on every mutation, `current` is what the
/// renderer draws and eases toward the target as the host calls [`tick`]
/// once per frame. Every published state is already clamped, so consumers
/// never see an offset outside its own bounds or a zoom outside
/// `[min_zoom, max_zoom]`.
///
/// The manager is single-threaded and not reentrant: listeners run
/// synchronously inside the mutating call and must not call back into the
/// manager they observe.
///
/// [`tick`]: Self::tick
pub struct ViewportManager<P> {
    constraints: ViewportConstraints,
    tuning: ViewportTuning,
    provider: P,
    /// Content box extent in backing pixels, refreshed from the provider on
    /// construction and on [`Self::handle_surface_change`].
    surface_px: Size,
    /// Content box extent in unscaled pixels, for focal-point fractions.
    content_px: Size,
    current: ViewportState,
    target: ViewportState,
    animating: bool,
    active_source: ChangeSource,
    listeners: Listeners,
}

impl<P: SurfaceGeometryProvider> ViewportManager<P> {
    /// Creates a manager fitted to the grid: minimum zoom, centered.
    #[must_use]
    pub fn new(constraints: ViewportConstraints, tuning: ViewportTuning, provider: P) -> Self {
        Self::build(constraints, tuning, provider, None)
    }

    /// Creates a manager at an explicit starting zoom, centered.
    ///
    /// The zoom is clamped like any other zoom input; a non-finite value
    /// falls back to the fitted minimum.
    #[must_use]
    pub fn with_initial_zoom(
        constraints: ViewportConstraints,
        tuning: ViewportTuning,
        provider: P,
        zoom: f64,
    ) -> Self {
        Self::build(constraints, tuning, provider, Some(zoom))
    }

    fn build(
        constraints: ViewportConstraints,
        tuning: ViewportTuning,
        provider: P,
        initial_zoom: Option<f64>,
    ) -> Self {
        let (content_px, surface_px) = read_surface(&provider);
        let fitted = bounds::fit_zoom(constraints, tuning, surface_px);
        let zoom = match initial_zoom {
            Some(zoom) if zoom.is_finite() => zoom.max(fitted).min(constraints.max_zoom),
            _ => fitted,
        };
        let pan_bounds = bounds::pan_bounds(constraints, tuning, surface_px, zoom);
        let offset = bounds::clamp_offset(
            bounds::centered_offset(constraints, surface_px, zoom),
            pan_bounds,
        );
        let state = ViewportState::new(zoom, offset, pan_bounds);
        tracing::debug!(
            zoom,
            offset_x = offset.x,
            offset_y = offset.y,
            "viewport initialized"
        );
        Self {
            constraints,
            tuning,
            provider,
            surface_px,
            content_px,
            current: state,
            target: state,
            animating: false,
            active_source: ChangeSource::ApiUpdate,
            listeners: Listeners::new(),
        }
    }

    /// The state the renderer should draw right now.
    #[must_use]
    pub fn current(&self) -> ViewportState {
        self.current
    }

    /// The state the animation is heading toward.
    #[must_use]
    pub fn target(&self) -> ViewportState {
        self.target
    }

    /// The grid constraints this manager was built with.
    #[must_use]
    pub fn constraints(&self) -> ViewportConstraints {
        self.constraints
    }

    /// The device tuning this manager was built with.
    #[must_use]
    pub fn tuning(&self) -> ViewportTuning {
        self.tuning
    }

    /// Whether [`Self::tick`] still has work to do.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// The smallest legal zoom for the current surface: the fit-to-grid
    /// zoom, which tracks surface size through
    /// [`Self::handle_surface_change`].
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        bounds::fit_zoom(self.constraints, self.tuning, self.surface_px)
    }

    /// The hard zoom ceiling.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.constraints.max_zoom
    }

    /// Clamps a zoom factor into `[min_zoom, max_zoom]`.
    ///
    /// Total over all float inputs: a non-finite zoom comes back as the
    /// minimum rather than propagating.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let floor = self.min_zoom();
        if !zoom.is_finite() {
            return floor;
        }
        zoom.max(floor).min(self.constraints.max_zoom)
    }

    /// Grid cells per backing pixel at the current zoom.
    ///
    /// Hosts use this to turn a pointer drag in pixels into a pan delta in
    /// cells.
    #[must_use]
    pub fn grid_units_per_pixel(&self) -> f64 {
        1.0 / (self.constraints.pixel_size * self.current.zoom)
    }

    /// Registers a listener for viewport changes.
    ///
    /// Listeners fire synchronously, in registration order, on every state
    /// transition: target moves, animation frames, and snaps.
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewportChange) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a listener. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Removes every listener, for host teardown.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Sets the target zoom, keeping the grid point at the viewport center
    /// fixed.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_anchored(zoom, Vec2::new(0.5, 0.5), ChangeSource::ApiUpdate);
    }

    /// Sets the target zoom, keeping the grid point under `focal` fixed.
    ///
    /// `focal` is relative to the content box's top-left corner, in
    /// unscaled pixels, the position a host reads off a pointer event. An
    /// unusable focal point degrades to a center-anchored zoom.
    pub fn set_zoom_about(&mut self, zoom: f64, focal: Point) {
        let fraction = self.focal_fraction(focal);
        self.zoom_anchored(zoom, fraction, ChangeSource::ApiUpdate);
    }

    /// Sets the target pan offset, in grid cells.
    pub fn set_pan(&mut self, offset: Vec2) {
        self.commit_target(self.target.zoom, offset, ChangeSource::ApiUpdate);
    }

    /// Nudges the target pan offset by a gesture delta, in grid cells.
    ///
    /// Convert a pixel drag with [`Self::grid_units_per_pixel`] first.
    pub fn apply_pan_delta(&mut self, delta: Vec2) {
        self.commit_target(
            self.target.zoom,
            self.target.offset + delta,
            ChangeSource::UserInput,
        );
    }

    /// Nudges the target zoom by a gesture delta, anchored at `focal` when
    /// one is given and at the viewport center otherwise.
    pub fn apply_zoom_delta(&mut self, delta: f64, focal: Option<Point>) {
        let fraction = match focal {
            Some(focal) => self.focal_fraction(focal),
            None => Vec2::new(0.5, 0.5),
        };
        self.zoom_anchored(self.target.zoom + delta, fraction, ChangeSource::UserInput);
    }

    /// Pans so that `cell` sits at the viewport center, at the current
    /// target zoom. Cells beyond the grid edge are treated as the nearest
    /// real cell.
    pub fn navigate_to_cell(&mut self, cell: GridCoord) {
        let cell = self
            .constraints
            .clamp_cell(i64::from(cell.x), i64::from(cell.y));
        let view =
            bounds::viewport_size_in_grid(self.constraints, self.surface_px, self.target.zoom);
        let offset = Vec2::new(
            f64::from(cell.x) + 0.5 - view.width * 0.5,
            f64::from(cell.y) + 0.5 - view.height * 0.5,
        );
        self.commit_target(self.target.zoom, offset, ChangeSource::ApiUpdate);
    }

    /// Animates back to the fitted, centered framing.
    pub fn fit_to_grid(&mut self) {
        let zoom = self.min_zoom();
        let offset = bounds::centered_offset(self.constraints, self.surface_px, zoom);
        self.commit_target(zoom, offset, ChangeSource::ApiUpdate);
    }

    /// Animates back to the initial framing. Synonym for
    /// [`Self::fit_to_grid`].
    pub fn reset(&mut self) {
        self.fit_to_grid();
    }

    /// Re-reads the surface, recomputes pan bounds, and re-clamps the
    /// target offset against them without touching the zoom.
    ///
    /// Hosts call this on resize and after orientation settles. The zoom
    /// is left alone even when the fitted minimum has moved past it; the
    /// new minimum applies to subsequent zoom input via
    /// [`Self::clamp_zoom`].
    pub fn handle_surface_change(&mut self) {
        self.refresh_surface();
        tracing::debug!(
            width = self.surface_px.width,
            height = self.surface_px.height,
            "surface changed, re-clamping viewport"
        );
        self.commit_target(self.target.zoom, self.target.offset, ChangeSource::Constraint);
    }

    /// Advances the animation by one frame.
    ///
    /// Call once per frame while it returns `true`. Each call moves the
    /// current state [`ANIMATION_SPEED`] of the way to the target; once
    /// every remaining delta is below [`SNAP_THRESHOLD`] the current state
    /// snaps to the target and the animation stops. Returns whether the
    /// animation is still running, and does nothing when it is not.
    pub fn tick(&mut self) -> bool {
        if !self.animating {
            return false;
        }
        let old = self.current;
        let delta_zoom = self.target.zoom - self.current.zoom;
        let delta = self.target.offset - self.current.offset;
        if delta_zoom.abs() < SNAP_THRESHOLD
            && delta.x.abs() < SNAP_THRESHOLD
            && delta.y.abs() < SNAP_THRESHOLD
        {
            self.current = self.target;
            self.animating = false;
            tracing::trace!(zoom = self.current.zoom, "viewport animation settled");
        } else {
            let zoom = self.current.zoom + delta_zoom * ANIMATION_SPEED;
            let offset = self.current.offset + delta * ANIMATION_SPEED;
            let pan_bounds =
                bounds::pan_bounds(self.constraints, self.tuning, self.surface_px, zoom);
            self.current =
                ViewportState::new(zoom, bounds::clamp_offset(offset, pan_bounds), pan_bounds);
        }
        if self.current != old {
            self.listeners.emit(&ViewportChange {
                old_state: old,
                new_state: self.current,
                source: self.active_source,
            });
        }
        self.animating
    }

    /// Abandons the animation and jumps the current state to the target.
    ///
    /// For hosts that need the final state immediately, such as before a
    /// synchronous export or when the page is being hidden.
    pub fn snap_to_target(&mut self) {
        self.animating = false;
        if self.current != self.target {
            let old = self.current;
            self.current = self.target;
            self.listeners.emit(&ViewportChange {
                old_state: old,
                new_state: self.current,
                source: self.active_source,
            });
        }
    }

    /// A point-in-time snapshot of the manager's internals.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            current: self.current,
            target: self.target,
            animating: self.animating,
            min_zoom: self.min_zoom(),
            max_zoom: self.max_zoom(),
            surface_px: self.surface_px,
            tuning: self.tuning,
            listener_count: self.listeners.len(),
        }
    }

    /// Retargets zoom while keeping the grid point at `fraction` of the
    /// viewport fixed on screen.
    ///
    /// Solved in viewport fractions so it holds for any surface size: the
    /// world point at `fraction` of the old view is placed at `fraction`
    /// of the new view.
    fn zoom_anchored(&mut self, zoom: f64, fraction: Vec2, source: ChangeSource) {
        let new_zoom = self.clamp_zoom(zoom);
        let old_view =
            bounds::viewport_size_in_grid(self.constraints, self.surface_px, self.target.zoom);
        let new_view = bounds::viewport_size_in_grid(self.constraints, self.surface_px, new_zoom);
        let offset = Vec2::new(
            self.target.offset.x + fraction.x * (old_view.width - new_view.width),
            self.target.offset.y + fraction.y * (old_view.height - new_view.height),
        );
        self.commit_target(new_zoom, offset, source);
    }

    /// Where `focal` sits in the content box, as fractions of its extent.
    ///
    /// Unusable input degrades to the center, turning a garbage pointer
    /// position into a center-anchored zoom instead of a pan jump.
    fn focal_fraction(&self, focal: Point) -> Vec2 {
        if !is_reasonable_point(focal)
            || self.content_px.width <= 0.0
            || self.content_px.height <= 0.0
        {
            return Vec2::new(0.5, 0.5);
        }
        Vec2::new(
            focal.x / self.content_px.width,
            focal.y / self.content_px.height,
        )
    }

    /// Clamps and installs a new target, notifying listeners when it moved.
    fn commit_target(&mut self, zoom: f64, offset: Vec2, source: ChangeSource) {
        let pan_bounds = bounds::pan_bounds(self.constraints, self.tuning, self.surface_px, zoom);
        let offset = bounds::clamp_offset(offset, pan_bounds);
        let new_state = ViewportState::new(zoom, offset, pan_bounds);
        if new_state == self.target {
            return;
        }
        let old = self.target;
        self.target = new_state;
        self.active_source = source;
        self.animating = true;
        tracing::trace!(
            zoom = new_state.zoom,
            offset_x = new_state.offset.x,
            offset_y = new_state.offset.y,
            source = ?source,
            "viewport target updated"
        );
        self.listeners.emit(&ViewportChange {
            old_state: old,
            new_state,
            source,
        });
    }

    fn refresh_surface(&mut self) {
        let (content_px, surface_px) = read_surface(&self.provider);
        self.content_px = content_px;
        self.surface_px = surface_px;
    }
}

impl<P> fmt::Debug for ViewportManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportManager")
            .field("constraints", &self.constraints)
            .field("tuning", &self.tuning)
            .field("surface_px", &self.surface_px)
            .field("content_px", &self.content_px)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("animating", &self.animating)
            .field("active_source", &self.active_source)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

/// Point-in-time snapshot of a [`ViewportManager`] for inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// State the renderer draws.
    pub current: ViewportState,
    /// State the animation is heading toward.
    pub target: ViewportState,
    /// Whether the animation loop has work left.
    pub animating: bool,
    /// Smallest legal zoom for the current surface.
    pub min_zoom: f64,
    /// Hard zoom ceiling.
    pub max_zoom: f64,
    /// Content box extent in backing pixels.
    pub surface_px: Size,
    /// Device tuning in effect.
    pub tuning: ViewportTuning,
    /// Number of registered listeners.
    pub listener_count: usize,
}

/// Content and backing sizes from the provider; an unavailable surface is
/// treated as empty.
fn read_surface<P: SurfaceGeometryProvider>(provider: &P) -> (Size, Size) {
    match provider.surface_geometry() {
        Ok(geometry) => (geometry.content_size(), geometry.backing_size()),
        Err(error) => {
            tracing::warn!(%error, "surface geometry unavailable, treating the surface as empty");
            (Size::ZERO, Size::ZERO)
        }
    }
}
