// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::coords::{CanvasPoint, CanvasVec, ScreenPoint, ScreenVec};
use crate::error::ConfigError;

/// Pan offset plus uniform zoom of an infinite canvas.
///
/// `x`/`y` are the screen-space position of the canvas origin, so a canvas
/// point `p` is drawn at `(p.x * zoom + x, p.y * zoom + y)`.
///
/// Equality is exact on all three fields; this is what gesture-end change
/// detection relies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Horizontal offset in screen pixels.
    pub x: f64,
    /// Vertical offset in screen pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    /// No pan, zoom `1.0`.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        zoom: 1.0,
    };

    /// Creates a viewport from its offset and zoom.
    #[must_use]
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Returns `true` if all three fields are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.zoom.is_finite()
    }

    /// Returns the pan offset as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the canvas → screen affine transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.zoom)
    }

    /// Maps a canvas point onto the screen.
    #[must_use]
    pub fn canvas_to_screen(&self, p: CanvasPoint) -> ScreenPoint {
        ScreenPoint(Point::new(
            p.0.x * self.zoom + self.x,
            p.0.y * self.zoom + self.y,
        ))
    }

    /// Maps a screen point back into canvas space.
    #[must_use]
    pub fn screen_to_canvas(&self, p: ScreenPoint) -> CanvasPoint {
        CanvasPoint(Point::new(
            (p.0.x - self.x) / self.zoom,
            (p.0.y - self.y) / self.zoom,
        ))
    }

    /// Translates by a canvas-space delta; the offset moves by `delta * zoom`.
    #[must_use]
    pub fn translate(self, delta: CanvasVec) -> Self {
        Self {
            x: self.x + delta.0.x * self.zoom,
            y: self.y + delta.0.y * self.zoom,
            zoom: self.zoom,
        }
    }

    /// Moves the offset by a screen-space delta.
    #[must_use]
    pub fn pan_screen(self, delta: ScreenVec) -> Self {
        self.translate(delta.to_canvas(self.zoom))
    }

    /// Sets the zoom while keeping the canvas point under `anchor` fixed.
    #[must_use]
    pub fn scale_about(self, zoom: f64, anchor: ScreenPoint) -> Self {
        let under = self.screen_to_canvas(anchor);
        Self {
            x: anchor.0.x - under.0.x * zoom,
            y: anchor.0.y - under.0.y * zoom,
            zoom,
        }
    }

    /// Returns the canvas rectangle visible through `view_rect`.
    #[must_use]
    pub fn visible_canvas_rect(&self, view_rect: Rect) -> Rect {
        let min = self.screen_to_canvas(ScreenPoint(Point::new(view_rect.x0, view_rect.y0)));
        let max = self.screen_to_canvas(ScreenPoint(Point::new(view_rect.x1, view_rect.y1)));
        Rect::from_points(min.0, max.0)
    }
}

/// Translate extent plus zoom range bounding every [`Viewport`].
///
/// Construct with [`ZoomBounds::new`], which rejects inverted or non-finite
/// ranges. Infinite extent edges are allowed and mean "unbounded".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    translate_extent: Rect,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            translate_extent: INFINITE_EXTENT,
            min_zoom: 0.5,
            max_zoom: 2.0,
        }
    }
}

/// A translate extent that never constrains.
pub const INFINITE_EXTENT: Rect = Rect::new(
    f64::NEG_INFINITY,
    f64::NEG_INFINITY,
    f64::INFINITY,
    f64::INFINITY,
);

impl ZoomBounds {
    /// Validates and creates bounds.
    ///
    /// `translate_extent` must have `x0 <= x1` and `y0 <= y1` (no NaN).
    /// `min_zoom`/`max_zoom` must be finite, positive, and ordered.
    pub fn new(translate_extent: Rect, min_zoom: f64, max_zoom: f64) -> Result<Self, ConfigError> {
        let e = translate_extent;
        if [e.x0, e.y0, e.x1, e.y1].iter().any(|v| v.is_nan()) {
            return Err(ConfigError::NonFinite {
                field: "translate_extent",
            });
        }
        if e.x0 > e.x1 || e.y0 > e.y1 {
            return Err(ConfigError::InvertedTranslateExtent { extent: e });
        }
        if !min_zoom.is_finite() {
            return Err(ConfigError::NonFinite { field: "min_zoom" });
        }
        if !max_zoom.is_finite() {
            return Err(ConfigError::NonFinite { field: "max_zoom" });
        }
        if min_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveZoom {
                field: "min_zoom",
                value: min_zoom,
            });
        }
        if min_zoom > max_zoom {
            return Err(ConfigError::InvalidZoomRange { min_zoom, max_zoom });
        }
        Ok(Self {
            translate_extent,
            min_zoom,
            max_zoom,
        })
    }

    /// Returns the translate extent in canvas units.
    #[must_use]
    pub fn translate_extent(&self) -> Rect {
        self.translate_extent
    }

    /// Returns the minimum zoom.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Returns the maximum zoom.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Clamps a zoom factor into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Builds the mount-time viewport.
    ///
    /// `default_position.x`/`.y` are clamped independently into the extent's
    /// x and y ranges and `default_zoom` into the zoom range.
    #[must_use]
    pub fn initialize(&self, default_position: Point, default_zoom: f64) -> Viewport {
        let e = self.translate_extent;
        Viewport {
            x: default_position.x.clamp(e.x0, e.x1),
            y: default_position.y.clamp(e.y0, e.y1),
            zoom: self.clamp_zoom(default_zoom),
        }
    }

    /// Clamps zoom and then shifts the offset so the canvas region visible
    /// through `view_rect` stays inside the translate extent.
    ///
    /// When the visible region is larger than the extent along an axis, the
    /// extent is centered on that axis instead.
    #[must_use]
    pub fn clamp_transform(&self, t: Viewport, view_rect: Rect) -> Viewport {
        let t = Viewport {
            zoom: self.clamp_zoom(t.zoom),
            ..t
        };
        let e = self.translate_extent;
        let visible = t.visible_canvas_rect(view_rect);
        let dx = settle(visible.x0 - e.x0, visible.x1 - e.x1);
        let dy = settle(visible.y0 - e.y0, visible.y1 - e.y1);
        if dx == 0.0 && dy == 0.0 {
            return t;
        }
        t.translate(CanvasVec::new(dx, dy))
    }
}

/// Offset along one axis given how far the visible edges sit past the extent
/// edges (`lo = visible_min - extent_min`, `hi = visible_max - extent_max`).
fn settle(lo: f64, hi: f64) -> f64 {
    if hi > lo {
        return (lo + hi) / 2.0;
    }
    let under = lo.min(0.0);
    if under != 0.0 { under } else { hi.max(0.0) }
}
