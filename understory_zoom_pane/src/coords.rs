// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed screen-space and canvas-space quantities.
//!
//! Pointer positions and wheel deltas arrive in screen pixels, while the
//! collaborator's `translate_by` and the translate extent are expressed in
//! canvas units. Keeping the two apart in the type system prevents a pixel
//! delta from being fed to a canvas-unit setter without dividing by zoom.

use kurbo::{Point, Vec2};

/// A point in screen (pane-local pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint(pub Point);

/// A displacement in screen (pixel) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenVec(pub Vec2);

/// A point in canvas (world) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasPoint(pub Point);

/// A displacement in canvas (world) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasVec(pub Vec2);

impl ScreenPoint {
    /// Creates a screen point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }
}

impl ScreenVec {
    /// Creates a screen displacement from pixel components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Converts a pixel displacement into canvas units at the given zoom.
    ///
    /// A non-positive or non-finite zoom is treated as `1.0`.
    #[must_use]
    pub fn to_canvas(self, zoom: f64) -> CanvasVec {
        let zoom = if zoom.is_finite() && zoom > 0.0 {
            zoom
        } else {
            1.0
        };
        CanvasVec(self.0 / zoom)
    }
}

impl CanvasPoint {
    /// Creates a canvas point from world coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Point::new(x, y))
    }
}

impl CanvasVec {
    /// Creates a canvas displacement from world components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Converts a canvas displacement into pixels at the given zoom.
    #[must_use]
    pub fn to_screen(self, zoom: f64) -> ScreenVec {
        ScreenVec(self.0 * zoom)
    }
}

impl From<Point> for ScreenPoint {
    fn from(p: Point) -> Self {
        Self(p)
    }
}

impl From<(f64, f64)> for ScreenPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
