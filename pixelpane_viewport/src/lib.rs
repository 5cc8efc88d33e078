// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pixelpane_viewport --heading-base-level=0

//! Pixelpane Viewport: an animated pan/zoom viewport over a fixed pixel grid.
//!
//! [`ViewportManager`] owns the pan/zoom state for one grid canvas. It is
//! headless: the host wires pointer gestures into its mutators, drives one
//! [`tick`](ViewportManager::tick) per rendered frame, and draws whatever
//! [`current`](ViewportManager::current) says. The manager takes care of:
//! - Clamping every zoom into the dynamic `[min_zoom, max_zoom]` range,
//!   where the minimum is the fit-to-grid zoom for the current surface.
//! - Keeping the pan offset inside device-tuned bounds, with distinct
//!   regimes for a grid larger and smaller than the viewport.
//! - Easing between states with an exponential animation that snaps once
//!   the remaining distance is invisible.
//! - Focal-point zooming that keeps the grid cell under the pointer fixed.
//! - Synchronous change notification tagged with what caused each change.
//!
//! The pure bounds math lives in [`bounds`] and can be used on its own.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use pixelpane_geometry::{
//!     GeometryError, SurfaceGeometry, SurfaceGeometryProvider, ViewportConstraints,
//! };
//! use pixelpane_viewport::{ViewportManager, ViewportTuning};
//!
//! struct Window;
//!
//! impl SurfaceGeometryProvider for Window {
//!     fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
//!         Ok(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)))
//!     }
//! }
//!
//! // A 1000x1000 grid of 10px cells, zoomable up to 40x.
//! let constraints = ViewportConstraints::new(10.0, 1000, 1000, 40.0);
//! let mut view = ViewportManager::new(constraints, ViewportTuning::desktop(), Window);
//!
//! // Zoom in around a pointer position; the target moves instantly.
//! view.set_zoom_about(8.0, Point::new(200.0, 150.0));
//!
//! // The host drives one tick per frame until the easing settles.
//! while view.tick() {}
//! assert_eq!(view.current(), view.target());
//! ```
//!
//! ## Design notes
//!
//! - The manager never talks to a platform. Surface geometry comes in
//!   through a [`SurfaceGeometryProvider`](pixelpane_geometry::SurfaceGeometryProvider)
//!   capability, and frame timing comes from the host's own scheduler.
//! - There are no error paths on the mutators. Out-of-range input is
//!   clamped and garbage input degrades to a sensible fallback, because a
//!   slightly wrong camera beats an interaction layer full of `Result`s.
//! - `current` and `target` are both published as plain
//!   [`ViewportState`](pixelpane_geometry::ViewportState) values, so a
//!   renderer can capture one per frame with no locking.

mod events;
mod manager;
mod tuning;

pub mod bounds;

pub use events::{ChangeSource, ListenerId, ViewportChange};
pub use manager::{ANIMATION_SPEED, SNAP_THRESHOLD, ViewportDebugInfo, ViewportManager};
pub use tuning::ViewportTuning;
