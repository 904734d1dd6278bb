// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture primitive the pane drives.
//!
//! [`ZoomBehavior`] is the seam between the pane's policy and whatever turns
//! raw input into drag, wheel, and pinch motion. An implementation owns the
//! live transform, enforces the installed [`ZoomBounds`], and reports gesture
//! start/update/end as [`GestureSignal`]s instead of calling back into the
//! pane.
//!
//! [`PanZoomBehavior`] is a headless implementation with the usual pan/zoom
//! semantics:
//!
//! - Drag with a pressed pointer pans.
//! - Wheel zooms by `2^(-dy * f)` around the pointer, where `f` depends on
//!   the delta mode and is ten times larger with Control held.
//! - Wheel and platform pinch gestures end after [`WHEEL_IDLE_MS`] without
//!   further input.
//! - Double click zooms in by 2, or out by 2 with Shift held.
//! - Every transform is constrained so the visible region stays inside the
//!   translate extent.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::coords::{CanvasVec, ScreenPoint, ScreenVec};
use crate::input::{InputEvent, InputKind, WheelDelta};
use crate::store::PaneRoot;
use crate::transform::{Viewport, ZoomBounds};
use crate::wheel::delta_mode_factor;

/// Wheel and pinch gestures end after this many milliseconds without input.
pub const WHEEL_IDLE_MS: u64 = 150;

/// A lifecycle signal reported by a [`ZoomBehavior`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSignal {
    /// A gesture started at this transform.
    Start(Viewport),
    /// The transform changed during the gesture.
    Update(Viewport),
    /// The gesture ended at this transform.
    End(Viewport),
}

/// Signals emitted by a single call; three covers start, update, and end.
pub type GestureSignals = SmallVec<[GestureSignal; 3]>;

/// Low-level pan/zoom recognizer and transform holder.
pub trait ZoomBehavior {
    /// Returns the live transform.
    fn transform(&self) -> Viewport;

    /// Installs the translate extent and zoom range used by every later
    /// change.
    fn install_bounds(&mut self, bounds: ZoomBounds);

    /// Places the behavior at its mount-time transform.
    ///
    /// The zoom is clamped to the installed range but the offset is taken
    /// as given; the view is not fitted into the translate extent until the
    /// next change. Returns the transform now held.
    fn mount(&mut self, transform: Viewport) -> Viewport;

    /// Replaces the transform, constrained to the installed bounds.
    ///
    /// Returns the applied transform.
    fn set_transform(&mut self, transform: Viewport) -> Viewport;

    /// Zooms to `zoom` keeping `anchor` fixed, constrained to the installed
    /// bounds. Returns the applied transform.
    fn scale_to(&mut self, zoom: f64, anchor: ScreenPoint) -> Viewport;

    /// Translates by a canvas-space delta, constrained to the installed
    /// bounds. Returns the applied transform.
    fn translate_by(&mut self, delta: CanvasVec) -> Viewport;

    /// Returns `true` while a gesture recognized by this behavior is running.
    fn is_gesturing(&self) -> bool;

    /// Feeds an admitted event to the native recognizers.
    fn handle_input(&mut self, event: &InputEvent, signals: &mut GestureSignals);

    /// Ends time-bounded gestures that have been idle at `now_ms`.
    fn flush(&mut self, now_ms: u64, signals: &mut GestureSignals);

    /// Root element the behavior is bound to, if any.
    fn root(&self) -> Option<PaneRoot> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    Drag {
        last: Point,
    },
    /// Wheel or pinch; ends on idle.
    Timed {
        last_ms: u64,
    },
}

/// Headless [`ZoomBehavior`] for hosts without their own gesture library.
#[derive(Clone, Debug)]
pub struct PanZoomBehavior {
    transform: Viewport,
    bounds: ZoomBounds,
    view_rect: Rect,
    root: Option<PaneRoot>,
    gesture: Gesture,
}

impl PanZoomBehavior {
    /// Creates a behavior for a pane occupying `view_rect` in screen space.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self {
            transform: Viewport::IDENTITY,
            bounds: ZoomBounds::default(),
            view_rect,
            root: None,
            gesture: Gesture::Idle,
        }
    }

    /// Sets the root element reported to collaborators.
    #[must_use]
    pub fn with_root(mut self, root: PaneRoot) -> Self {
        self.root = Some(root);
        self
    }

    /// Returns the pane's screen rectangle.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Updates the pane's screen rectangle after a resize.
    ///
    /// The transform is not re-constrained until the next change.
    pub fn set_view_rect(&mut self, view_rect: Rect) {
        self.view_rect = view_rect;
    }

    /// Returns the installed bounds.
    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    fn constrain(&self, t: Viewport) -> Viewport {
        self.bounds.clamp_transform(t, self.view_rect)
    }

    fn apply(&mut self, t: Viewport) -> Viewport {
        self.transform = self.constrain(t);
        self.transform
    }

    fn begin(&mut self, gesture: Gesture, signals: &mut GestureSignals) {
        if self.gesture == Gesture::Idle {
            signals.push(GestureSignal::Start(self.transform));
        }
        self.gesture = gesture;
    }

    fn finish(&mut self, signals: &mut GestureSignals) {
        if self.gesture != Gesture::Idle {
            self.gesture = Gesture::Idle;
            signals.push(GestureSignal::End(self.transform));
        }
    }

    fn on_pointer_down(&mut self, position: Point, signals: &mut GestureSignals) {
        match self.gesture {
            Gesture::Drag { .. } => {}
            Gesture::Timed { .. } => {
                self.finish(signals);
                self.begin(Gesture::Drag { last: position }, signals);
            }
            Gesture::Idle => self.begin(Gesture::Drag { last: position }, signals),
        }
    }

    fn on_pointer_move(&mut self, position: Point, signals: &mut GestureSignals) {
        if let Gesture::Drag { last } = self.gesture {
            let t = self.apply(self.transform.pan_screen(ScreenVec(position - last)));
            self.gesture = Gesture::Drag { last: position };
            signals.push(GestureSignal::Update(t));
        }
    }

    fn on_wheel(&mut self, event: &InputEvent, delta: &WheelDelta, signals: &mut GestureSignals) {
        let modifier = if event.zoom_modifier_held() { 10.0 } else { 1.0 };
        let exponent = -delta.y * delta_mode_factor(delta.mode) * modifier;
        let zoom = self.bounds.clamp_zoom(self.transform.zoom * 2.0_f64.powf(exponent));
        // At a zoom limit a fresh wheel gesture does nothing.
        if self.gesture == Gesture::Idle && zoom == self.transform.zoom {
            return;
        }
        self.zoom_timed(zoom, event, signals);
    }

    fn zoom_timed(&mut self, zoom: f64, event: &InputEvent, signals: &mut GestureSignals) {
        match self.gesture {
            Gesture::Drag { .. } => {}
            _ => self.begin(
                Gesture::Timed {
                    last_ms: event.time_ms,
                },
                signals,
            ),
        }
        let t = self.apply(self.transform.scale_about(zoom, event.position));
        signals.push(GestureSignal::Update(t));
    }

    fn on_double_click(&mut self, event: &InputEvent, signals: &mut GestureSignals) {
        let factor = if event.modifiers.shift() { 0.5 } else { 2.0 };
        let zoom = self.bounds.clamp_zoom(self.transform.zoom * factor);
        let idle = self.gesture == Gesture::Idle;
        if idle {
            signals.push(GestureSignal::Start(self.transform));
        }
        let t = self.apply(self.transform.scale_about(zoom, event.position));
        signals.push(GestureSignal::Update(t));
        if idle {
            signals.push(GestureSignal::End(t));
        }
    }
}

impl ZoomBehavior for PanZoomBehavior {
    fn transform(&self) -> Viewport {
        self.transform
    }

    fn install_bounds(&mut self, bounds: ZoomBounds) {
        self.bounds = bounds;
    }

    fn mount(&mut self, transform: Viewport) -> Viewport {
        self.gesture = Gesture::Idle;
        self.transform = Viewport {
            zoom: self.bounds.clamp_zoom(transform.zoom),
            ..transform
        };
        self.transform
    }

    fn set_transform(&mut self, transform: Viewport) -> Viewport {
        self.apply(transform)
    }

    fn scale_to(&mut self, zoom: f64, anchor: ScreenPoint) -> Viewport {
        let zoom = self.bounds.clamp_zoom(zoom);
        self.apply(self.transform.scale_about(zoom, anchor))
    }

    fn translate_by(&mut self, delta: CanvasVec) -> Viewport {
        self.apply(self.transform.translate(delta))
    }

    fn is_gesturing(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    fn handle_input(&mut self, event: &InputEvent, signals: &mut GestureSignals) {
        let position = event.position.0;
        match &event.kind {
            InputKind::PointerDown { .. } => self.on_pointer_down(position, signals),
            InputKind::PointerMove => self.on_pointer_move(position, signals),
            InputKind::PointerUp => {
                if matches!(self.gesture, Gesture::Drag { .. }) {
                    self.finish(signals);
                }
            }
            InputKind::DoubleClick => self.on_double_click(event, signals),
            InputKind::Wheel(delta) => self.on_wheel(event, delta, signals),
            InputKind::Pinch { scale } => {
                let zoom = self.bounds.clamp_zoom(self.transform.zoom * (1.0 + scale));
                self.zoom_timed(zoom, event, signals);
            }
        }
        if let Gesture::Timed { .. } = self.gesture {
            self.gesture = Gesture::Timed {
                last_ms: event.time_ms,
            };
        }
    }

    fn flush(&mut self, now_ms: u64, signals: &mut GestureSignals) {
        if let Gesture::Timed { last_ms } = self.gesture
            && now_ms.saturating_sub(last_ms) >= WHEEL_IDLE_MS
        {
            self.finish(signals);
        }
    }

    fn root(&self) -> Option<PaneRoot> {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use ui_events::keyboard::Modifiers;
    use ui_events::pointer::PointerButton;

    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);

    fn behavior() -> PanZoomBehavior {
        let mut b = PanZoomBehavior::new(VIEW);
        b.install_bounds(ZoomBounds::new(crate::transform::INFINITE_EXTENT, 0.25, 4.0).unwrap());
        b
    }

    fn feed(b: &mut PanZoomBehavior, event: InputEvent) -> GestureSignals {
        let mut signals = GestureSignals::new();
        b.handle_input(&event, &mut signals);
        signals
    }

    #[test]
    fn drag_pans_in_screen_space() {
        let mut b = behavior();
        b.set_transform(Viewport::new(0.0, 0.0, 2.0));
        let s = feed(&mut b, InputEvent::pointer_down(PointerButton::Primary).at((10.0, 10.0)));
        assert_eq!(s.as_slice(), &[GestureSignal::Start(Viewport::new(0.0, 0.0, 2.0))]);

        let s = feed(&mut b, InputEvent::pointer_move().at((25.0, 5.0)));
        assert_eq!(s.as_slice(), &[GestureSignal::Update(Viewport::new(15.0, -5.0, 2.0))]);
        assert!(b.is_gesturing());

        let s = feed(&mut b, InputEvent::pointer_up().at((25.0, 5.0)));
        assert_eq!(s.as_slice(), &[GestureSignal::End(Viewport::new(15.0, -5.0, 2.0))]);
        assert!(!b.is_gesturing());
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut b = behavior();
        assert!(feed(&mut b, InputEvent::pointer_move().at((5.0, 5.0))).is_empty());
        assert!(feed(&mut b, InputEvent::pointer_up()).is_empty());
        assert_eq!(b.transform(), Viewport::IDENTITY);
    }

    #[test]
    fn wheel_zooms_around_pointer_and_ends_on_idle() {
        let mut b = behavior();
        // 500 px * 0.002 = 1 => zoom doubles.
        let ev = InputEvent::wheel(WheelDelta::pixels(0.0, -500.0))
            .at((100.0, 50.0))
            .at_time(1_000);
        let s = feed(&mut b, ev);
        let expected = Viewport::new(-100.0, -50.0, 2.0);
        assert_eq!(
            s.as_slice(),
            &[
                GestureSignal::Start(Viewport::IDENTITY),
                GestureSignal::Update(expected)
            ]
        );

        let mut signals = GestureSignals::new();
        b.flush(1_100, &mut signals);
        assert!(signals.is_empty());
        b.flush(1_150, &mut signals);
        assert_eq!(signals.as_slice(), &[GestureSignal::End(expected)]);
    }

    #[test]
    fn wheel_idle_restarts_from_latest_event() {
        let mut b = behavior();
        let ev = |t| InputEvent::wheel(WheelDelta::pixels(0.0, -10.0)).at_time(t);
        feed(&mut b, ev(0));
        let s = feed(&mut b, ev(100));
        assert!(matches!(s.as_slice(), [GestureSignal::Update(_)]));
        let mut signals = GestureSignals::new();
        b.flush(200, &mut signals);
        assert!(signals.is_empty());
        b.flush(250, &mut signals);
        assert_eq!(signals.len(), 1);
    }

    #[test]
    fn control_wheel_zooms_faster() {
        let mut b = behavior();
        // 50 px * 0.002 * 10 = 1 => zoom doubles.
        let ev =
            InputEvent::wheel(WheelDelta::pixels(0.0, -50.0)).with_modifiers(Modifiers::CONTROL);
        feed(&mut b, ev);
        assert_eq!(b.transform().zoom, 2.0);
    }

    #[test]
    fn wheel_at_zoom_limit_starts_nothing() {
        let mut b = behavior();
        b.set_transform(Viewport::new(0.0, 0.0, 4.0));
        let s = feed(&mut b, InputEvent::wheel(WheelDelta::lines(0.0, -3.0)));
        assert!(s.is_empty());
        assert!(!b.is_gesturing());
    }

    #[test]
    fn double_click_is_a_complete_gesture() {
        let mut b = behavior();
        let s = feed(&mut b, InputEvent::double_click().at((0.0, 0.0)));
        assert_eq!(
            s.as_slice(),
            &[
                GestureSignal::Start(Viewport::IDENTITY),
                GestureSignal::Update(Viewport::new(0.0, 0.0, 2.0)),
                GestureSignal::End(Viewport::new(0.0, 0.0, 2.0)),
            ]
        );

        let s = feed(
            &mut b,
            InputEvent::double_click().with_modifiers(Modifiers::SHIFT),
        );
        assert_eq!(s[1], GestureSignal::Update(Viewport::IDENTITY));
    }

    #[test]
    fn pinch_scales_incrementally() {
        let mut b = behavior();
        let s = feed(&mut b, InputEvent::pinch(0.5));
        assert_eq!(s.len(), 2);
        assert_eq!(b.transform().zoom, 1.5);
        feed(&mut b, InputEvent::pinch(-0.5));
        assert_eq!(b.transform().zoom, 0.75);
    }

    #[test]
    fn press_during_wheel_gesture_hands_over_to_drag() {
        let mut b = behavior();
        feed(&mut b, InputEvent::wheel(WheelDelta::pixels(0.0, -10.0)));
        let s = feed(&mut b, InputEvent::pointer_down(PointerButton::Primary));
        assert!(matches!(
            s.as_slice(),
            [GestureSignal::End(_), GestureSignal::Start(_)]
        ));
    }

    #[test]
    fn mount_keeps_offset_and_clamps_zoom() {
        let mut b = PanZoomBehavior::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        b.install_bounds(ZoomBounds::new(Rect::new(0.0, 0.0, 400.0, 400.0), 0.5, 2.0).unwrap());
        let t = b.mount(Viewport::new(400.0, 400.0, 8.0));
        assert_eq!(t, Viewport::new(400.0, 400.0, 2.0));
        assert_eq!(b.transform(), t);
        assert!(!b.is_gesturing());

        // The next change fits the view into the extent.
        let t = b.translate_by(CanvasVec::new(0.0, 0.0));
        assert_eq!(t, Viewport::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn bounded_setters_respect_extent() {
        let mut b = PanZoomBehavior::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        b.install_bounds(ZoomBounds::new(Rect::new(0.0, 0.0, 400.0, 400.0), 0.5, 2.0).unwrap());
        let t = b.translate_by(CanvasVec::new(50.0, 0.0));
        assert_eq!(t, Viewport::IDENTITY);
        let t = b.scale_to(10.0, ScreenPoint::new(0.0, 0.0));
        assert_eq!(t.zoom, 2.0);
        assert_eq!(b.root(), None);
        assert_eq!(b.clone().with_root(PaneRoot(3)).root(), Some(PaneRoot(3)));
    }
}
