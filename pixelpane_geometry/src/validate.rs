// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sanity checks for externally supplied coordinates.

use kurbo::Point;

/// Largest coordinate magnitude accepted from pointer events, in pixels.
///
/// Platform event streams occasionally produce garbage positions (stale
/// touches, synthetic events during teardown). Anything beyond this bound is
/// treated as noise rather than a position, well above any real display
/// while still far from the range where `f64` cell math degrades.
pub const MAX_COORD_MAGNITUDE: f64 = 1.0e6;

/// Whether a pointer-event coordinate is usable.
///
/// Usable means both components are finite and within
/// [`MAX_COORD_MAGNITUDE`] of the origin.
#[must_use]
pub fn is_reasonable_point(point: Point) -> bool {
    point.x.is_finite()
        && point.y.is_finite()
        && point.x.abs() <= MAX_COORD_MAGNITUDE
        && point.y.abs() <= MAX_COORD_MAGNITUDE
}
