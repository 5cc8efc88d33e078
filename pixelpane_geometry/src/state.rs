// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state snapshots and their structural validation.

use kurbo::{Rect, Vec2};
use thiserror::Error;

/// A pan/zoom snapshot of the window onto the grid.
///
/// `offset` is the grid-space coordinate of the viewport's top-left corner,
/// in cells; it is continuous and may be fractional or negative (negative
/// components mean the view extends past the grid edge). `bounds` is the
/// legal range for `offset` at this zoom: `x0..x1` for `offset.x` and
/// `y0..y1` for `offset.y`.
///
/// Snapshots are plain data. The viewport manager produces them and
/// coordinate converters consume them, so a renderer can hold one across a
/// frame without locking anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Zoom factor; on-screen cell size is `pixel_size * zoom` backing pixels.
    pub zoom: f64,
    /// Grid-space coordinate of the viewport's top-left corner.
    pub offset: Vec2,
    /// Legal range for `offset` at this zoom.
    pub bounds: Rect,
}

impl ViewportState {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(zoom: f64, offset: Vec2, bounds: Rect) -> Self {
        Self {
            zoom,
            offset,
            bounds,
        }
    }

    /// Checks that this snapshot can drive coordinate conversion.
    ///
    /// A snapshot is usable when the zoom is positive and finite and every
    /// continuous coordinate in it is finite. Consumers reject unusable
    /// snapshots up front so NaN can never propagate into cell indices.
    pub fn validate(&self) -> Result<(), InvalidStateError> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(InvalidStateError::Zoom { zoom: self.zoom });
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(InvalidStateError::Offset {
                x: self.offset.x,
                y: self.offset.y,
            });
        }
        let b = self.bounds;
        if !(b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite()) {
            return Err(InvalidStateError::Bounds { bounds: b });
        }
        Ok(())
    }

    /// Whether [`validate`](Self::validate) would succeed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A structurally unusable [`ViewportState`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvalidStateError {
    /// The zoom factor is zero, negative, or not finite.
    #[error("zoom must be positive and finite, got {zoom}")]
    Zoom {
        /// The rejected zoom factor.
        zoom: f64,
    },
    /// An offset component is not finite.
    #[error("offset must be finite, got ({x}, {y})")]
    Offset {
        /// The rejected `offset.x`.
        x: f64,
        /// The rejected `offset.y`.
        y: f64,
    },
    /// A pan-bounds edge is not finite.
    #[error("pan bounds must be finite, got {bounds:?}")]
    Bounds {
        /// The rejected bounds rectangle.
        bounds: Rect,
    },
}
