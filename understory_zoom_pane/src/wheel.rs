// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel policy: what an admitted wheel event does to the viewport.
//!
//! The [`GestureFilter`](crate::GestureFilter) decides whether a wheel event
//! is seen at all; a [`WheelBinding`] decides what it becomes. The binding is
//! rebuilt whenever the flags it depends on change, and each rebuild fully
//! replaces the previous one.

use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::{PanOnScrollMode, ZoomPaneConfig};
use crate::coords::{CanvasVec, ScreenPoint, ScreenVec};
use crate::filter::AmbientInput;
use crate::input::{DeltaMode, InputEvent, WheelDelta};

/// Line-mode deltas are scaled by this before panning.
const LINE_DELTA_PIXELS: f64 = 20.0;

/// Multiplier applied to pinch (Control + wheel) deltas.
const PINCH_FACTOR: f64 = 10.0;

/// Per-unit zoom exponent for a wheel delta in the given mode.
#[must_use]
pub fn delta_mode_factor(mode: DeltaMode) -> f64 {
    match mode {
        DeltaMode::Pixel => 0.002,
        DeltaMode::Line => 0.05,
        DeltaMode::Page => 1.0,
    }
}

/// Zoom exponent of a pinch expressed as Control + wheel.
///
/// The new zoom is `current * 2^pinch_delta(delta)`.
#[must_use]
pub fn pinch_delta(delta: &WheelDelta) -> f64 {
    -delta.y * delta_mode_factor(delta.mode) * PINCH_FACTOR
}

/// Which wheel handler is installed; published to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WheelBindingKind {
    /// The gesture primitive's native wheel zoom.
    #[default]
    NativeZoom,
    /// Wheel pans the pane.
    PanOnScroll,
}

/// What the host should do with the native event after the pane handled it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventDisposition {
    /// Suppress the host's default action (page scroll).
    pub prevent_default: bool,
    /// Stop the event from reaching outer handlers.
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// Leave the event alone.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Suppress the default action and stop propagation.
    pub const CONSUME: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Transform change requested by a wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelAction {
    /// Translate by a canvas-space delta.
    PanBy(CanvasVec),
    /// Zoom to an absolute level keeping `anchor` fixed.
    ZoomTo {
        /// Target zoom before clamping.
        zoom: f64,
        /// Screen point that stays put.
        anchor: ScreenPoint,
    },
    /// Let the gesture primitive's native wheel handler run.
    Delegate,
}

/// A wheel event's resolved action plus how to treat the native event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelResolution {
    /// Requested change.
    pub action: WheelAction,
    /// Treatment of the native event.
    pub disposition: EventDisposition,
}

/// The installed wheel handler.
#[derive(Clone, Debug, PartialEq)]
pub enum WheelBinding {
    /// Wheel pans; Control + wheel pinch-zooms when `zoom_on_pinch` is set.
    PanOnScroll {
        /// Axes that may move.
        mode: PanOnScrollMode,
        /// Pan speed multiplier.
        speed: f64,
        /// Interpret Control + wheel as pinch zoom.
        zoom_on_pinch: bool,
    },
    /// Wheel goes to the native zoom handler.
    DefaultZoom {
        /// Suppress page scroll for wheel events over the pane.
        prevent_scrolling: bool,
        /// Marker class exempting a subtree from scroll suppression.
        no_wheel_class_name: String,
    },
}

impl WheelBinding {
    /// Selects the binding for the current configuration and key state.
    ///
    /// Pan-on-scroll applies only while the zoom activation key is up.
    #[must_use]
    pub fn new(config: &ZoomPaneConfig, ambient: AmbientInput) -> Self {
        if config.pan_on_scroll && !ambient.zoom_activation_key_pressed {
            Self::PanOnScroll {
                mode: config.pan_on_scroll_mode,
                speed: config.pan_on_scroll_speed,
                zoom_on_pinch: config.zoom_on_pinch,
            }
        } else {
            Self::DefaultZoom {
                prevent_scrolling: config.prevent_scrolling,
                no_wheel_class_name: config.no_wheel_class_name.clone(),
            }
        }
    }

    /// Returns the kind published to the store.
    #[must_use]
    pub fn kind(&self) -> WheelBindingKind {
        match self {
            Self::PanOnScroll { .. } => WheelBindingKind::PanOnScroll,
            Self::DefaultZoom { .. } => WheelBindingKind::NativeZoom,
        }
    }

    /// Resolves a wheel event at `current_zoom`.
    #[must_use]
    pub fn resolve(
        &self,
        event: &InputEvent,
        delta: &WheelDelta,
        current_zoom: f64,
    ) -> WheelResolution {
        match self {
            Self::PanOnScroll {
                mode,
                speed,
                zoom_on_pinch,
            } => {
                let action = if *zoom_on_pinch && event.zoom_modifier_held() {
                    WheelAction::ZoomTo {
                        zoom: current_zoom * 2.0_f64.powf(pinch_delta(delta)),
                        anchor: event.position,
                    }
                } else {
                    WheelAction::PanBy(pan_delta(delta, *mode, *speed, current_zoom))
                };
                WheelResolution {
                    action,
                    disposition: EventDisposition::CONSUME,
                }
            }
            Self::DefaultZoom {
                prevent_scrolling,
                no_wheel_class_name,
            } => WheelResolution {
                action: WheelAction::Delegate,
                disposition: EventDisposition {
                    prevent_default: *prevent_scrolling
                        && !event.is_wrapped_with_class(no_wheel_class_name),
                    stop_propagation: false,
                },
            },
        }
    }
}

fn pan_delta(delta: &WheelDelta, mode: PanOnScrollMode, speed: f64, zoom: f64) -> CanvasVec {
    let normalize = if delta.mode == DeltaMode::Line {
        LINE_DELTA_PIXELS
    } else {
        1.0
    };
    let dx = match mode {
        PanOnScrollMode::Vertical => 0.0,
        _ => delta.x * normalize,
    };
    let dy = match mode {
        PanOnScrollMode::Horizontal => 0.0,
        _ => delta.y * normalize,
    };
    let CanvasVec(v) = ScreenVec::new(-dx, -dy).to_canvas(zoom);
    CanvasVec(v * speed)
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use ui_events::keyboard::Modifiers;

    use super::*;

    fn pan_binding(mode: PanOnScrollMode) -> WheelBinding {
        let config = ZoomPaneConfig::new()
            .with_pan_on_scroll(true)
            .with_pan_on_scroll_mode(mode)
            .with_pan_on_scroll_speed(1.0);
        WheelBinding::new(&config, AmbientInput::default())
    }

    fn resolve(binding: &WheelBinding, event: &InputEvent, zoom: f64) -> WheelResolution {
        let crate::input::InputKind::Wheel(delta) = event.kind else {
            panic!("not a wheel event");
        };
        binding.resolve(event, &delta, zoom)
    }

    #[test]
    fn mode_selection_follows_activation_key() {
        let config = ZoomPaneConfig::new().with_pan_on_scroll(true);
        let binding = WheelBinding::new(&config, AmbientInput::default());
        assert_eq!(binding.kind(), WheelBindingKind::PanOnScroll);

        let held = AmbientInput {
            zoom_activation_key_pressed: true,
            ..AmbientInput::default()
        };
        assert_eq!(
            WheelBinding::new(&config, held).kind(),
            WheelBindingKind::NativeZoom
        );
        assert_eq!(
            WheelBinding::new(&ZoomPaneConfig::default(), AmbientInput::default()).kind(),
            WheelBindingKind::NativeZoom
        );
    }

    #[test]
    fn vertical_mode_discards_horizontal_delta() {
        let binding = pan_binding(PanOnScrollMode::Vertical);
        let ev = InputEvent::wheel(WheelDelta::pixels(10.0, 0.0));
        let res = resolve(&binding, &ev, 1.0);
        assert_eq!(res.action, WheelAction::PanBy(CanvasVec::new(0.0, 0.0)));
        assert_eq!(res.disposition, EventDisposition::CONSUME);
    }

    #[test]
    fn horizontal_mode_discards_vertical_delta() {
        let binding = pan_binding(PanOnScrollMode::Horizontal);
        let ev = InputEvent::wheel(WheelDelta::pixels(10.0, 30.0));
        let res = resolve(&binding, &ev, 1.0);
        assert_eq!(res.action, WheelAction::PanBy(CanvasVec::new(-10.0, 0.0)));
    }

    #[test]
    fn pan_scales_with_speed_zoom_and_line_mode() {
        let config = ZoomPaneConfig::new().with_pan_on_scroll(true);
        let binding = WheelBinding::new(&config, AmbientInput::default());
        // Default speed 0.5, zoom 2: -(40 / 2) * 0.5.
        let ev = InputEvent::wheel(WheelDelta::pixels(0.0, 40.0));
        let res = resolve(&binding, &ev, 2.0);
        assert_eq!(res.action, WheelAction::PanBy(CanvasVec::new(0.0, -10.0)));

        // Line mode is normalized to pixels: 3 lines * 20 = 60.
        let ev = InputEvent::wheel(WheelDelta::lines(3.0, 0.0));
        let res = resolve(&binding, &ev, 1.0);
        let WheelAction::PanBy(CanvasVec(v)) = res.action else {
            panic!("expected a pan");
        };
        assert_eq!(v, Vec2::new(-30.0, 0.0));
    }

    #[test]
    fn control_wheel_pinches_in_pan_mode() {
        let binding = pan_binding(PanOnScrollMode::Free);
        let ev = InputEvent::wheel(WheelDelta::pixels(0.0, -100.0))
            .with_modifiers(Modifiers::CONTROL)
            .at((40.0, 60.0));
        assert_eq!(pinch_delta(&WheelDelta::pixels(0.0, -100.0)), 2.0);
        let res = resolve(&binding, &ev, 1.0);
        assert_eq!(
            res.action,
            WheelAction::ZoomTo {
                zoom: 4.0,
                anchor: ScreenPoint::new(40.0, 60.0),
            }
        );
        assert_eq!(res.disposition, EventDisposition::CONSUME);

        // Without pinch zoom the modifier does not change anything.
        let config = ZoomPaneConfig::new()
            .with_pan_on_scroll(true)
            .with_zoom_on_pinch(false);
        let binding = WheelBinding::new(&config, AmbientInput::default());
        assert!(matches!(
            resolve(&binding, &ev, 1.0).action,
            WheelAction::PanBy(_)
        ));
    }

    #[test]
    fn default_zoom_delegates_and_respects_markers() {
        let binding = WheelBinding::new(&ZoomPaneConfig::default(), AmbientInput::default());
        let ev = InputEvent::wheel(WheelDelta::pixels(0.0, 5.0));
        let res = resolve(&binding, &ev, 1.0);
        assert_eq!(res.action, WheelAction::Delegate);
        assert!(res.disposition.prevent_default);
        assert!(!res.disposition.stop_propagation);

        let res = resolve(&binding, &ev.clone().with_target_class("nowheel"), 1.0);
        assert_eq!(res.disposition, EventDisposition::PASS);

        let relaxed = WheelBinding::new(
            &ZoomPaneConfig::new().with_prevent_scrolling(false),
            AmbientInput::default(),
        );
        assert_eq!(resolve(&relaxed, &ev, 1.0).disposition, EventDisposition::PASS);
    }
}
