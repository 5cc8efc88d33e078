// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-class margins applied when fitting and bounding the view.

/// Margins that differ between precise-pointer and touch devices.
///
/// All fractional fields are in `0.0..1.0`. The presets encode the two
/// device classes Pixelpane ships with; hosts with unusual form factors can
/// build their own values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTuning {
    /// Extra zoom-out applied on top of the exact fit, as a fraction of the
    /// fitted zoom, so the grid edge never touches the surface edge.
    pub fit_margin: f64,
    /// How far a fully visible grid may be nudged off-center, as a fraction
    /// of the smaller grid dimension.
    pub roam_allowance: f64,
    /// Slack added outside the exact pan limits, as a fraction of the
    /// smaller viewport dimension, so clamping at the limit never clips the
    /// outermost row of cells to rounding.
    pub edge_padding: f64,
    /// Absolute lower limit on zoom, keeping enormous grids legible.
    pub zoom_floor: f64,
}

impl ViewportTuning {
    /// Tuning for precise pointing devices.
    ///
    /// A slim fit margin and a generous roam allowance: mouse users place
    /// the view deliberately and expect it to stay put.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            fit_margin: 0.05,
            roam_allowance: 0.10,
            edge_padding: 0.02,
            zoom_floor: 0.1,
        }
    }

    /// Tuning for touch devices.
    ///
    /// A wider fit margin absorbs imprecise pinch gestures, and a smaller
    /// roam allowance keeps the grid from drifting while scrolling.
    #[must_use]
    pub const fn touch() -> Self {
        Self {
            fit_margin: 0.10,
            roam_allowance: 0.05,
            edge_padding: 0.02,
            zoom_floor: 0.1,
        }
    }
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self::desktop()
    }
}
