// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pixelpane_transform --heading-base-level=0

//! Pixelpane Transform: screen-to-grid coordinate conversion for a pixel
//! grid canvas.
//!
//! [`CoordinateTransform`] maps pointer positions to grid cells and grid
//! cells back to screen positions, under a
//! [`ViewportState`](pixelpane_geometry::ViewportState) snapshot the caller
//! supplies. It folds in everything that sits between the two
//! spaces on a real device: the device pixel ratio, borders and padding
//! around the canvas, and a visual viewport that has been displaced by an
//! on-screen keyboard. A [`DevicePolicy`] packages the per-device-class
//! choices (snap mode, edge tolerance, geometry cache lifetime) as desktop
//! and touch presets.
//!
//! Surface geometry is read through the same
//! [`SurfaceGeometryProvider`](pixelpane_geometry::SurfaceGeometryProvider)
//! capability the viewport uses, behind a short-TTL cache so a burst of
//! pointer events costs one layout query, not hundreds.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use pixelpane_geometry::{
//!     GeometryError, GridCoord, SurfaceGeometry, SurfaceGeometryProvider,
//!     ViewportConstraints, ViewportState,
//! };
//! use pixelpane_transform::{CoordinateTransform, DevicePolicy};
//!
//! struct Window;
//!
//! impl SurfaceGeometryProvider for Window {
//!     fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
//!         Ok(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)))
//!     }
//! }
//!
//! # fn main() -> Result<(), pixelpane_transform::TransformError> {
//! let constraints = ViewportConstraints::new(10.0, 1000, 1000, 40.0);
//! let mut transform =
//!     CoordinateTransform::new(constraints, DevicePolicy::desktop(), Window);
//!
//! // A camera at zoom 2 with cell (10, 20) in the top-left corner.
//! let state = ViewportState::new(
//!     2.0,
//!     Vec2::new(10.0, 20.0),
//!     Rect::new(0.0, 0.0, 1000.0, 1000.0),
//! );
//!
//! // Each cell covers 20 screen pixels, so the pointer at (100, 60) is
//! // 5 cells right of and 3 cells below the corner cell.
//! let cell = transform.screen_to_grid(Point::new(100.0, 60.0), state)?;
//! assert_eq!(cell, Some(GridCoord::new(15, 23)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Design notes
//!
//! - Conversions take the viewport snapshot as an argument instead of
//!   observing a manager, so callers choose whether hit-testing runs
//!   against the renderer's current state or the animation target.
//! - A pointer outside the canvas is a miss (`Ok(None)`), not an error.
//!   [`TransformError`] is reserved for conditions the caller must react
//!   to: an unusable snapshot or a surface that cannot be measured.
//! - Hosts forward resize, orientation, and visual-viewport notifications
//!   via [`CoordinateTransform::handle_surface_event`]; orientation
//!   changes distrust cached geometry for [`ORIENTATION_SETTLE`] because
//!   platforms report stale dimensions while rotating.

mod cache;
mod error;
mod policy;
mod transform;

pub use cache::ORIENTATION_SETTLE;
pub use error::{ConversionInput, TransformError};
pub use policy::{DevicePolicy, SnapMode};
pub use transform::{CoordinateTransform, RoundTrip};
