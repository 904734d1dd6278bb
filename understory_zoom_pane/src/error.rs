// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Rect;

/// Error returned when a pane configuration cannot describe a valid viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A numeric field was NaN (or infinite where a finite value is required).
    NonFinite {
        /// Name of the offending configuration field.
        field: &'static str,
    },
    /// The translate extent's minimum corner is not below its maximum corner.
    InvertedTranslateExtent {
        /// The extent as supplied.
        extent: Rect,
    },
    /// `min_zoom` is greater than `max_zoom`.
    InvalidZoomRange {
        /// Supplied minimum zoom.
        min_zoom: f64,
        /// Supplied maximum zoom.
        max_zoom: f64,
    },
    /// A zoom value was zero or negative.
    NonPositiveZoom {
        /// Name of the offending configuration field.
        field: &'static str,
        /// The supplied value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "`{field}` must be a finite number"),
            Self::InvertedTranslateExtent { extent } => write!(
                f,
                "translate extent is inverted: min corner ({}, {}) exceeds max corner ({}, {})",
                extent.x0, extent.y0, extent.x1, extent.y1
            ),
            Self::InvalidZoomRange { min_zoom, max_zoom } => write!(
                f,
                "min_zoom ({min_zoom}) must not be greater than max_zoom ({max_zoom})"
            ),
            Self::NonPositiveZoom { field, value } => {
                write!(f, "`{field}` must be positive, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
