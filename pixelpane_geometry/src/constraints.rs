// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed grid geometry shared by every viewport consumer.

use kurbo::Size;

use crate::GridCoord;

/// Immutable grid geometry and the hard zoom ceiling.
///
/// These values are decided once, at canvas construction, and shared by the
/// viewport and every coordinate converter. `pixel_size` is the edge length
/// of one grid cell in backing-store pixels at zoom `1.0`; the on-screen
/// size of a cell is always `pixel_size * zoom` backing pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConstraints {
    /// Cell edge length in backing-store pixels at zoom `1.0`.
    pub pixel_size: f64,
    /// Number of grid columns.
    pub grid_width: u32,
    /// Number of grid rows.
    pub grid_height: u32,
    /// Hard upper limit on zoom.
    pub max_zoom: f64,
}

impl ViewportConstraints {
    /// Creates grid constraints.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty on either axis, or if `pixel_size` or
    /// `max_zoom` is not a positive finite number.
    #[must_use]
    pub fn new(pixel_size: f64, grid_width: u32, grid_height: u32, max_zoom: f64) -> Self {
        assert!(grid_width > 0 && grid_height > 0, "grid must be non-empty");
        assert!(
            pixel_size.is_finite() && pixel_size > 0.0,
            "pixel_size must be positive and finite"
        );
        assert!(
            max_zoom.is_finite() && max_zoom > 0.0,
            "max_zoom must be positive and finite"
        );
        Self {
            pixel_size,
            grid_width,
            grid_height,
            max_zoom,
        }
    }

    /// Grid extent in cells.
    #[must_use]
    pub fn grid_size(&self) -> Size {
        Size::new(f64::from(self.grid_width), f64::from(self.grid_height))
    }

    /// Whether `cell` lies on the grid.
    #[must_use]
    pub const fn contains(&self, cell: GridCoord) -> bool {
        cell.x < self.grid_width && cell.y < self.grid_height
    }

    /// Clamps a pair of signed cell indices onto the grid.
    ///
    /// Snapped world coordinates can land one cell outside the grid, either
    /// from pointer positions in the edge-tolerance band or from rounding at
    /// the far edge. Conversion never fails for that reason; it reports the
    /// nearest real cell instead.
    #[must_use]
    pub fn clamp_cell(&self, x: i64, y: i64) -> GridCoord {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is clamped into the u32-ranged grid width"
        )]
        let x = x.clamp(0, i64::from(self.grid_width) - 1) as u32;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is clamped into the u32-ranged grid height"
        )]
        let y = y.clamp(0, i64::from(self.grid_height) - 1) as u32;
        GridCoord::new(x, y)
    }
}
