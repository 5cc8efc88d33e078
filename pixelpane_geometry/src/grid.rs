// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete cell coordinates on the shared pixel grid.

use std::fmt;

/// A discrete cell on the pixel grid.
///
/// Cell `(0, 0)` is the top-left corner of the grid; `x` grows rightward and
/// `y` grows downward. A coordinate says nothing about visibility or zoom;
/// it is purely an index into the fixed-size grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl GridCoord {
    /// Creates a cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned, inclusive rectangle of grid cells.
///
/// Both corners are part of the area, so a single cell is represented as
/// `GridArea::new(c, c)` and has width and height 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridArea {
    /// Smallest contained cell on both axes.
    pub top_left: GridCoord,
    /// Largest contained cell on both axes.
    pub bottom_right: GridCoord,
}

impl GridArea {
    /// Creates an area from its inclusive corners.
    ///
    /// # Panics
    ///
    /// Panics if `top_left` is to the right of or below `bottom_right`.
    #[must_use]
    pub const fn new(top_left: GridCoord, bottom_right: GridCoord) -> Self {
        assert!(
            top_left.x <= bottom_right.x && top_left.y <= bottom_right.y,
            "area corners must be ordered"
        );
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bottom_right.x - self.top_left.x + 1
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom_right.y - self.top_left.y + 1
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether `cell` lies inside the area.
    #[must_use]
    pub const fn contains(&self, cell: GridCoord) -> bool {
        cell.x >= self.top_left.x
            && cell.x <= self.bottom_right.x
            && cell.y >= self.top_left.y
            && cell.y <= self.bottom_right.y
    }
}
