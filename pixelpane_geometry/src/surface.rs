// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface snapshots and the host capability that produces them.

use kurbo::{Insets, Rect, Size, Vec2};
use thiserror::Error;

/// One atomic description of the host drawing surface.
///
/// All lengths are in unscaled (layout) pixels; multiply by
/// `device_pixel_ratio` to reach backing-store pixels. Hosts assemble a
/// snapshot from whatever their platform exposes, so a consumer never has to
/// correlate separately-sampled values that may straddle a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Surface bounding rectangle in the pointer-event coordinate space.
    pub rect: Rect,
    /// Backing-store pixels per unscaled pixel.
    pub device_pixel_ratio: f64,
    /// Border and padding between `rect` and the interactive content box.
    pub content_inset: Insets,
    /// Displacement of the visual viewport within the layout viewport.
    ///
    /// Non-zero while an on-screen keyboard or collapsing browser chrome has
    /// pinched the visual viewport. Hosts that do not distinguish the two
    /// viewports report zero.
    pub visual_offset: Vec2,
}

impl SurfaceGeometry {
    /// A plain surface: no inset, no visual-viewport displacement, DPR `1.0`.
    #[must_use]
    pub const fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            device_pixel_ratio: 1.0,
            content_inset: Insets::ZERO,
            visual_offset: Vec2::ZERO,
        }
    }

    /// The interactive content box: `rect` with border and padding removed.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.rect.x0 + self.content_inset.x0,
            self.rect.y0 + self.content_inset.y0,
            self.rect.x1 - self.content_inset.x1,
            self.rect.y1 - self.content_inset.y1,
        )
    }

    /// Content box extent in unscaled pixels.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_rect().size()
    }

    /// Content box extent in backing-store pixels.
    #[must_use]
    pub fn backing_size(&self) -> Size {
        let content = self.content_size();
        Size::new(
            content.width * self.device_pixel_ratio,
            content.height * self.device_pixel_ratio,
        )
    }
}

/// The host surface could not be described.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The surface is not attached to a live layout (for example a canvas
    /// that has been removed from its document or window).
    #[error("surface is detached from the host layout")]
    Detached,
    /// The platform reported geometry that cannot be used.
    #[error("host reported unusable surface geometry: {reason}")]
    Unusable {
        /// Host-provided description of what was wrong.
        reason: String,
    },
}

/// Host capability that describes the drawing surface on demand.
///
/// Implementations may be arbitrarily expensive to call (a layout query, a
/// native view measurement), so consumers cache the returned snapshot and
/// refresh it on a short deadline rather than per conversion.
pub trait SurfaceGeometryProvider {
    /// Returns the current surface snapshot.
    fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError>;
}

impl<P: SurfaceGeometryProvider + ?Sized> SurfaceGeometryProvider for &P {
    fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
        (**self).surface_geometry()
    }
}

/// Platform notifications a host pushes into geometry consumers.
///
/// Consumers never subscribe to the platform themselves; the host forwards
/// whatever resize, orientation, and visual-viewport signals it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface or its window changed size.
    Resized,
    /// The device rotated; reported dimensions may lag for a short while.
    OrientationChanged,
    /// The visual viewport moved or resized, for example because an
    /// on-screen keyboard appeared.
    VisualViewportChanged,
}
