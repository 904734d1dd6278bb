// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-neutral raw input events.
//!
//! The pane does not own event routing or hit testing. Hosts translate their
//! native events into [`InputEvent`]s, attaching the class names found on the
//! event target and its ancestors so exclusion markers (`nowheel`, `nopan`)
//! can be honored.

use alloc::string::String;
use alloc::vec::Vec;

use ui_events::ScrollDelta;
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{PointerButton, PointerType};

use crate::coords::ScreenPoint;

/// Units of a wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    /// Pixels (most trackpads and high-resolution wheels).
    #[default]
    Pixel,
    /// Lines (classic notched wheels on some platforms).
    Line,
    /// Pages.
    Page,
}

/// A wheel displacement with its unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelDelta {
    /// Horizontal delta.
    pub x: f64,
    /// Vertical delta; positive scrolls content up (wheel towards the user).
    pub y: f64,
    /// Units of `x` and `y`.
    pub mode: DeltaMode,
}

impl WheelDelta {
    /// Creates a wheel delta. Non-finite components are treated as zero.
    #[must_use]
    pub fn new(x: f64, y: f64, mode: DeltaMode) -> Self {
        Self {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            mode,
        }
    }

    /// Pixel-mode delta.
    #[must_use]
    pub fn pixels(x: f64, y: f64) -> Self {
        Self::new(x, y, DeltaMode::Pixel)
    }

    /// Line-mode delta.
    #[must_use]
    pub fn lines(x: f64, y: f64) -> Self {
        Self::new(x, y, DeltaMode::Line)
    }

    /// Page-mode delta.
    #[must_use]
    pub fn pages(x: f64, y: f64) -> Self {
        Self::new(x, y, DeltaMode::Page)
    }
}

impl From<&ScrollDelta> for WheelDelta {
    fn from(delta: &ScrollDelta) -> Self {
        match delta {
            ScrollDelta::PixelDelta(pos) => Self::pixels(pos.x, pos.y),
            ScrollDelta::LineDelta(x, y) => Self::lines(f64::from(*x), f64::from(*y)),
            ScrollDelta::PageDelta(x, y) => Self::pages(f64::from(*x), f64::from(*y)),
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// What kind of raw input an [`InputEvent`] carries.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// Mouse button press, pen contact, or touch start.
    ///
    /// `button` is `None` for touch contacts.
    PointerDown {
        /// Pressed button, if any.
        button: Option<PointerButton>,
        /// Device class.
        pointer_type: PointerType,
    },
    /// Pointer motion.
    PointerMove,
    /// Button release or touch end.
    PointerUp,
    /// Double click.
    DoubleClick,
    /// Wheel or trackpad scroll.
    Wheel(WheelDelta),
    /// Platform-recognized pinch; `scale` is the incremental scale change
    /// (`0.1` means 10% larger).
    Pinch {
        /// Incremental scale change.
        scale: f64,
    },
}

/// A raw input event as seen by the pane.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// Event payload.
    pub kind: InputKind,
    /// Pointer position in pane-local screen pixels.
    pub position: ScreenPoint,
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
    /// Timestamp in milliseconds, used for wheel idle detection.
    pub time_ms: u64,
    /// Class names on the event target and all of its ancestors.
    pub target_classes: Vec<String>,
}

impl InputEvent {
    /// Creates an event at the origin with no modifiers.
    #[must_use]
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            position: ScreenPoint::default(),
            modifiers: Modifiers::empty(),
            time_ms: 0,
            target_classes: Vec::new(),
        }
    }

    /// Mouse button press.
    #[must_use]
    pub fn pointer_down(button: PointerButton) -> Self {
        Self::new(InputKind::PointerDown {
            button: Some(button),
            pointer_type: PointerType::Mouse,
        })
    }

    /// Touch start.
    #[must_use]
    pub fn touch_start() -> Self {
        Self::new(InputKind::PointerDown {
            button: None,
            pointer_type: PointerType::Touch,
        })
    }

    /// Pointer motion.
    #[must_use]
    pub fn pointer_move() -> Self {
        Self::new(InputKind::PointerMove)
    }

    /// Pointer release.
    #[must_use]
    pub fn pointer_up() -> Self {
        Self::new(InputKind::PointerUp)
    }

    /// Double click.
    #[must_use]
    pub fn double_click() -> Self {
        Self::new(InputKind::DoubleClick)
    }

    /// Wheel scroll.
    #[must_use]
    pub fn wheel(delta: WheelDelta) -> Self {
        Self::new(InputKind::Wheel(delta))
    }

    /// Platform pinch.
    #[must_use]
    pub fn pinch(scale: f64) -> Self {
        Self::new(InputKind::Pinch {
            scale: finite_or_zero(scale),
        })
    }

    /// Sets the pointer position.
    #[must_use]
    pub fn at(mut self, position: impl Into<ScreenPoint>) -> Self {
        self.position = position.into();
        self
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at_time(mut self, time_ms: u64) -> Self {
        self.time_ms = time_ms;
        self
    }

    /// Adds a class name found on the target or one of its ancestors.
    #[must_use]
    pub fn with_target_class(mut self, class: impl Into<String>) -> Self {
        self.target_classes.push(class.into());
        self
    }

    /// Returns `true` for wheel events.
    #[must_use]
    pub fn is_wheel(&self) -> bool {
        matches!(self.kind, InputKind::Wheel(_))
    }

    /// Returns `true` for pointer presses and touch starts.
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        matches!(self.kind, InputKind::PointerDown { .. })
    }

    /// Returns the pressed button for pointer presses.
    #[must_use]
    pub fn button(&self) -> Option<PointerButton> {
        match self.kind {
            InputKind::PointerDown { button, .. } => button,
            _ => None,
        }
    }

    /// Returns `true` when a non-primary mouse button is involved.
    #[must_use]
    pub fn is_secondary_button(&self) -> bool {
        self.button().is_some_and(|b| b != PointerButton::Primary)
    }

    /// Returns `true` while the zoom modifier (Control) is held.
    ///
    /// Trackpad pinches are reported by browsers as Control + wheel.
    #[must_use]
    pub fn zoom_modifier_held(&self) -> bool {
        self.modifiers.ctrl()
    }

    /// Returns `true` when the target or one of its ancestors carries `class`.
    ///
    /// An empty class name never matches.
    #[must_use]
    pub fn is_wrapped_with_class(&self, class: &str) -> bool {
        !class.is_empty() && self.target_classes.iter().any(|c| c == class)
    }
}
