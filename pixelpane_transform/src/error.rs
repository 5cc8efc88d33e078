// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion error taxonomy.

use std::fmt;

use kurbo::Point;
use pixelpane_geometry::{GeometryError, GridCoord, InvalidStateError};
use thiserror::Error;

/// Why a coordinate conversion could not run.
///
/// These are the conditions a caller can do something about, which is why
/// they are errors rather than `None`: an invalid snapshot means the caller
/// is holding state it should not be, and a failed geometry read means the
/// surface is gone and conversion should be torn down or retried later. A
/// pointer that is merely outside the canvas is an `Ok(None)` miss, not an
/// error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TransformError {
    /// The supplied viewport snapshot failed validation.
    #[error("invalid viewport state: {0}")]
    InvalidViewport(#[from] InvalidStateError),
    /// The surface geometry needed for conversion could not be read.
    #[error("conversion failed for {input}: {source}")]
    Geometry {
        /// What was being converted when the read failed.
        input: ConversionInput,
        /// The underlying geometry failure.
        source: GeometryError,
    },
}

/// The input a failed conversion was working on, kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConversionInput {
    /// A pointer position in screen space.
    Screen(Point),
    /// A grid cell.
    Cell(GridCoord),
    /// A whole-viewport query with no single input coordinate.
    Viewport,
}

impl fmt::Display for ConversionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen(point) => write!(f, "screen point ({}, {})", point.x, point.y),
            Self::Cell(cell) => write!(f, "grid cell {cell}"),
            Self::Viewport => write!(f, "viewport query"),
        }
    }
}
