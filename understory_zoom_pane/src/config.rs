// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pane configuration: interaction flags, bounds, keys, and move callbacks.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use ui_events::keyboard::{Key, NamedKey};
use ui_events::pointer::PointerButton;

use crate::error::ConfigError;
use crate::input::InputEvent;
use crate::transform::{INFINITE_EXTENT, Viewport, ZoomBounds};

/// Callback fired on gesture start, update, or end.
///
/// Receives the raw input event that caused the change (`None` for
/// programmatic changes and idle-timeout ends) and the resulting viewport.
pub type MoveHandler = dyn Fn(Option<&InputEvent>, Viewport);

/// Which axes pan-on-scroll may move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanOnScrollMode {
    /// Both axes.
    #[default]
    Free,
    /// Vertical only; horizontal wheel deltas are discarded.
    Vertical,
    /// Horizontal only; vertical wheel deltas are discarded.
    Horizontal,
}

/// Whether dragging the pane pans it, and with which buttons.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanOnDrag {
    /// Dragging never pans.
    Disabled,
    /// Dragging with the primary button (or touch) pans.
    #[default]
    Enabled,
    /// Dragging with any of the listed buttons pans; presses with other
    /// buttons are rejected.
    Buttons(Vec<PointerButton>),
}

impl PanOnDrag {
    /// Returns `false` only for [`PanOnDrag::Disabled`].
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Returns `true` if `button` is explicitly listed.
    #[must_use]
    pub fn lists(&self, button: PointerButton) -> bool {
        match self {
            Self::Buttons(buttons) => buttons.contains(&button),
            _ => false,
        }
    }
}

impl From<bool> for PanOnDrag {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

/// Complete pane configuration.
///
/// All fields are public; the `with_*` methods are a fluent alternative.
/// Call [`ZoomPaneConfig::validate`] (or let [`crate::ZoomPane::new`] do it)
/// before use.
///
/// There is no `elements_selectable` flag. Whether elements can be selected
/// never changes admission: a held [`Self::selection_key`] or a box selection
/// reported by the store blocks every gesture either way.
#[derive(Clone)]
pub struct ZoomPaneConfig {
    /// Wheel zooms (default mode).
    pub zoom_on_scroll: bool,
    /// Trackpad pinch (Control + wheel) and platform pinch zoom.
    pub zoom_on_pinch: bool,
    /// Double click zooms in.
    pub zoom_on_double_click: bool,
    /// Drag panning.
    pub pan_on_drag: PanOnDrag,
    /// Wheel pans instead of zooming.
    pub pan_on_scroll: bool,
    /// Multiplier applied to pan-on-scroll deltas.
    pub pan_on_scroll_speed: f64,
    /// Axes pan-on-scroll may move.
    pub pan_on_scroll_mode: PanOnScrollMode,
    /// Suppress the host's default scroll action for wheel events over the pane.
    pub prevent_scrolling: bool,
    /// Bound on the visible canvas region, in canvas units.
    pub translate_extent: Rect,
    /// Smallest allowed zoom.
    pub min_zoom: f64,
    /// Largest allowed zoom.
    pub max_zoom: f64,
    /// Zoom at mount.
    pub default_zoom: f64,
    /// Offset at mount.
    pub default_position: Point,
    /// Key that, while held, turns wheel events into zoom even with pan-on-scroll.
    pub zoom_activation_key: Key,
    /// Key that, while held, hands pointer input to box selection.
    pub selection_key: Key,
    /// Marker class opting a subtree out of wheel handling.
    pub no_wheel_class_name: String,
    /// Marker class opting a subtree out of pan handling.
    pub no_pan_class_name: String,
    /// Fired on every viewport update during a gesture.
    pub on_move: Option<Rc<MoveHandler>>,
    /// Fired when a gesture starts.
    pub on_move_start: Option<Rc<MoveHandler>>,
    /// Fired when a gesture ends with a changed viewport.
    pub on_move_end: Option<Rc<MoveHandler>>,
}

impl Default for ZoomPaneConfig {
    fn default() -> Self {
        Self {
            zoom_on_scroll: true,
            zoom_on_pinch: true,
            zoom_on_double_click: true,
            pan_on_drag: PanOnDrag::Enabled,
            pan_on_scroll: false,
            pan_on_scroll_speed: 0.5,
            pan_on_scroll_mode: PanOnScrollMode::Free,
            prevent_scrolling: true,
            translate_extent: INFINITE_EXTENT,
            min_zoom: 0.5,
            max_zoom: 2.0,
            default_zoom: 1.0,
            default_position: Point::ZERO,
            zoom_activation_key: Key::Named(NamedKey::Meta),
            selection_key: Key::Named(NamedKey::Shift),
            no_wheel_class_name: "nowheel".into(),
            no_pan_class_name: "nopan".into(),
            on_move: None,
            on_move_start: None,
            on_move_end: None,
        }
    }
}

impl fmt::Debug for ZoomPaneConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn handler(h: &Option<Rc<MoveHandler>>) -> &'static str {
            if h.is_some() { "<function>" } else { "None" }
        }
        f.debug_struct("ZoomPaneConfig")
            .field("zoom_on_scroll", &self.zoom_on_scroll)
            .field("zoom_on_pinch", &self.zoom_on_pinch)
            .field("zoom_on_double_click", &self.zoom_on_double_click)
            .field("pan_on_drag", &self.pan_on_drag)
            .field("pan_on_scroll", &self.pan_on_scroll)
            .field("pan_on_scroll_speed", &self.pan_on_scroll_speed)
            .field("pan_on_scroll_mode", &self.pan_on_scroll_mode)
            .field("prevent_scrolling", &self.prevent_scrolling)
            .field("translate_extent", &self.translate_extent)
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .field("default_zoom", &self.default_zoom)
            .field("default_position", &self.default_position)
            .field("zoom_activation_key", &self.zoom_activation_key)
            .field("selection_key", &self.selection_key)
            .field("no_wheel_class_name", &self.no_wheel_class_name)
            .field("no_pan_class_name", &self.no_pan_class_name)
            .field("on_move", &handler(&self.on_move))
            .field("on_move_start", &handler(&self.on_move_start))
            .field("on_move_end", &handler(&self.on_move_end))
            .finish()
    }
}

impl ZoomPaneConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every numeric field and returns the resulting bounds.
    pub fn validate(&self) -> Result<ZoomBounds, ConfigError> {
        let bounds = ZoomBounds::new(self.translate_extent, self.min_zoom, self.max_zoom)?;
        if !self.default_zoom.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "default_zoom",
            });
        }
        if self.default_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveZoom {
                field: "default_zoom",
                value: self.default_zoom,
            });
        }
        if !(self.default_position.x.is_finite() && self.default_position.y.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "default_position",
            });
        }
        if !self.pan_on_scroll_speed.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "pan_on_scroll_speed",
            });
        }
        Ok(bounds)
    }

    /// Returns `true` when every kind of viewport interaction is turned off.
    ///
    /// `zoom_activation_key_pressed` counts as enabling scroll zoom.
    #[must_use]
    pub fn all_interactions_disabled(&self, zoom_activation_key_pressed: bool) -> bool {
        !self.pan_on_drag.is_enabled()
            && !(self.zoom_on_scroll || zoom_activation_key_pressed)
            && !self.pan_on_scroll
            && !self.zoom_on_double_click
            && !self.zoom_on_pinch
    }

    /// Sets [`Self::zoom_on_scroll`].
    #[must_use]
    pub fn with_zoom_on_scroll(mut self, enabled: bool) -> Self {
        self.zoom_on_scroll = enabled;
        self
    }

    /// Sets [`Self::zoom_on_pinch`].
    #[must_use]
    pub fn with_zoom_on_pinch(mut self, enabled: bool) -> Self {
        self.zoom_on_pinch = enabled;
        self
    }

    /// Sets [`Self::zoom_on_double_click`].
    #[must_use]
    pub fn with_zoom_on_double_click(mut self, enabled: bool) -> Self {
        self.zoom_on_double_click = enabled;
        self
    }

    /// Sets [`Self::pan_on_drag`]; accepts a `bool` or a [`PanOnDrag`].
    #[must_use]
    pub fn with_pan_on_drag(mut self, pan_on_drag: impl Into<PanOnDrag>) -> Self {
        self.pan_on_drag = pan_on_drag.into();
        self
    }

    /// Sets [`Self::pan_on_scroll`].
    #[must_use]
    pub fn with_pan_on_scroll(mut self, enabled: bool) -> Self {
        self.pan_on_scroll = enabled;
        self
    }

    /// Sets [`Self::pan_on_scroll_speed`].
    #[must_use]
    pub fn with_pan_on_scroll_speed(mut self, speed: f64) -> Self {
        self.pan_on_scroll_speed = speed;
        self
    }

    /// Sets [`Self::pan_on_scroll_mode`].
    #[must_use]
    pub fn with_pan_on_scroll_mode(mut self, mode: PanOnScrollMode) -> Self {
        self.pan_on_scroll_mode = mode;
        self
    }

    /// Sets [`Self::prevent_scrolling`].
    #[must_use]
    pub fn with_prevent_scrolling(mut self, enabled: bool) -> Self {
        self.prevent_scrolling = enabled;
        self
    }

    /// Sets [`Self::translate_extent`].
    #[must_use]
    pub fn with_translate_extent(mut self, extent: Rect) -> Self {
        self.translate_extent = extent;
        self
    }

    /// Sets [`Self::min_zoom`] and [`Self::max_zoom`].
    #[must_use]
    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets [`Self::default_zoom`].
    #[must_use]
    pub fn with_default_zoom(mut self, zoom: f64) -> Self {
        self.default_zoom = zoom;
        self
    }

    /// Sets [`Self::default_position`].
    #[must_use]
    pub fn with_default_position(mut self, position: impl Into<Point>) -> Self {
        self.default_position = position.into();
        self
    }

    /// Sets [`Self::zoom_activation_key`].
    #[must_use]
    pub fn with_zoom_activation_key(mut self, key: Key) -> Self {
        self.zoom_activation_key = key;
        self
    }

    /// Sets [`Self::selection_key`].
    #[must_use]
    pub fn with_selection_key(mut self, key: Key) -> Self {
        self.selection_key = key;
        self
    }

    /// Sets [`Self::no_wheel_class_name`].
    #[must_use]
    pub fn with_no_wheel_class_name(mut self, class: impl Into<String>) -> Self {
        self.no_wheel_class_name = class.into();
        self
    }

    /// Sets [`Self::no_pan_class_name`].
    #[must_use]
    pub fn with_no_pan_class_name(mut self, class: impl Into<String>) -> Self {
        self.no_pan_class_name = class.into();
        self
    }

    /// Sets [`Self::on_move`].
    #[must_use]
    pub fn on_move<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&InputEvent>, Viewport) + 'static,
    {
        self.on_move = Some(Rc::new(f));
        self
    }

    /// Sets [`Self::on_move_start`].
    #[must_use]
    pub fn on_move_start<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&InputEvent>, Viewport) + 'static,
    {
        self.on_move_start = Some(Rc::new(f));
        self
    }

    /// Sets [`Self::on_move_end`].
    #[must_use]
    pub fn on_move_end<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&InputEvent>, Viewport) + 'static,
    {
        self.on_move_end = Some(Rc::new(f));
        self
    }
}
