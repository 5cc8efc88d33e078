// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-class conversion policy.

use std::time::Duration;

/// How a continuous grid coordinate snaps to a discrete cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SnapMode {
    /// Truncate toward negative infinity: a cell owns the half-open range
    /// `[i, i + 1)` of grid space. What the pointer visually covers is what
    /// it hits, which suits precise pointing devices.
    #[default]
    Floor,
    /// Round to nearest: a cell owns `[i - 0.5, i + 0.5)`. A touch that
    /// lands just past a cell edge still picks the cell the finger meant,
    /// absorbing the fat-finger wobble.
    Round,
}

impl SnapMode {
    /// Snaps a continuous cell coordinate to a cell index.
    #[must_use]
    pub fn snap(self, value: f64) -> f64 {
        match self {
            Self::Floor => value.floor(),
            Self::Round => value.round(),
        }
    }

    /// Offset from a cell's top-left corner to the interior point farthest
    /// from this mode's snapping boundaries, in cells.
    ///
    /// Probing a conversion at this point keeps self-checks away from the
    /// exact edges where float noise flips the snapped index.
    #[must_use]
    pub const fn probe_offset(self) -> f64 {
        match self {
            Self::Floor => 0.5,
            Self::Round => 0.0,
        }
    }
}

/// Conversion knobs that differ between device classes.
///
/// The presets bundle what Pixelpane learned about the two pointer worlds:
/// mice are precise and layouts are stable, so desktop favors exactness and
/// long cache lifetimes; touch input wobbles and mobile layouts reflow
/// under dynamic browser chrome, so touch forgives more and trusts cached
/// geometry less.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePolicy {
    /// How continuous coordinates pick a cell.
    pub snap_mode: SnapMode,
    /// Pointer slop accepted outside the content box, in unscaled pixels.
    /// Positions farther out than this are misses, not clamps.
    pub edge_tolerance_px: f64,
    /// How long a cached surface snapshot may be served before the
    /// provider is asked again.
    pub geometry_ttl: Duration,
    /// Whether pointer positions are corrected by the visual-viewport
    /// offset before use. Only meaningful on hosts where the visual
    /// viewport can detach from the layout viewport.
    pub use_visual_viewport_offset: bool,
}

impl DevicePolicy {
    /// Policy for precise pointing devices.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            snap_mode: SnapMode::Floor,
            edge_tolerance_px: 2.0,
            geometry_ttl: Duration::from_millis(100),
            use_visual_viewport_offset: false,
        }
    }

    /// Policy for touch devices.
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            snap_mode: SnapMode::Round,
            edge_tolerance_px: 8.0,
            geometry_ttl: Duration::from_millis(50),
            use_visual_viewport_offset: true,
        }
    }
}

impl Default for DevicePolicy {
    fn default() -> Self {
        Self::desktop()
    }
}
