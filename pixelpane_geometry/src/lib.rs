// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pixelpane_geometry --heading-base-level=0

//! Pixelpane Geometry: shared data model for the Pixelpane viewport crates.
//!
//! A Pixelpane canvas works in three coordinate spaces:
//! - **Screen space**: pointer-event pixels, relative to the host window.
//! - **Canvas space**: backing-store pixels, relative to the drawing
//!   surface's content box.
//! - **Grid space**: discrete cell indices on the fixed-size pixel grid.
//!
//! This crate defines the data that crosses those spaces without owning any
//! behavior of its own:
//! - [`GridCoord`] and [`GridArea`] for discrete cells.
//! - [`ViewportConstraints`] for the immutable grid geometry.
//! - [`ViewportState`] snapshots (zoom, pan offset, pan bounds) and their
//!   structural validation.
//! - [`SurfaceGeometry`] snapshots of the host surface, the
//!   [`SurfaceGeometryProvider`] capability that produces them, and the
//!   [`SurfaceEvent`] notifications hosts push when the surface changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use pixelpane_geometry::{GridCoord, ViewportConstraints, ViewportState};
//!
//! // A 1000x1000 grid of 10px cells, zoomable up to 40x.
//! let constraints = ViewportConstraints::new(10.0, 1000, 1000, 40.0);
//! assert!(constraints.contains(GridCoord::new(999, 999)));
//!
//! // A snapshot as the viewport manager would publish it.
//! let state = ViewportState::new(
//!     2.0,
//!     Vec2::new(12.5, 40.0),
//!     Rect::new(0.0, 0.0, 960.0, 970.0),
//! );
//! assert!(state.is_valid());
//! ```
//!
//! ## Design notes
//!
//! - Everything here is plain `Copy` data. The viewport manager in
//!   `pixelpane_viewport` produces [`ViewportState`] values and the
//!   converters in `pixelpane_transform` consume them, so a renderer can
//!   capture a snapshot per frame without sharing mutable state.
//! - Hosts stay in charge of the platform: they implement
//!   [`SurfaceGeometryProvider`] over whatever layout query their toolkit
//!   has and forward platform signals as [`SurfaceEvent`]s.

mod constraints;
mod grid;
mod state;
mod surface;
mod validate;

pub use constraints::ViewportConstraints;
pub use grid::{GridArea, GridCoord};
pub use state::{InvalidStateError, ViewportState};
pub use surface::{GeometryError, SurfaceEvent, SurfaceGeometry, SurfaceGeometryProvider};
pub use validate::{MAX_COORD_MAGNITUDE, is_reasonable_point};
