// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_zoom_pane` crate.
//!
//! These drive a `ZoomPane` end to end through raw events and check what ends
//! up in the store and in the move callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use ui_events::keyboard::{Key, KeyState, Modifiers, NamedKey};
use ui_events::pointer::PointerButton;
use understory_zoom_pane::{
    AmbientInput, CanvasVec, FilterDecision, FilterRule, GestureFilter, InputEvent,
    PanOnScrollMode, PaneState, PanZoomBehavior, Viewport, WheelBindingKind, WheelDelta,
    ZoomPane, ZoomPaneConfig,
};

const VIEW: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

type Pane = ZoomPane<PanZoomBehavior, PaneState>;

fn mount(config: ZoomPaneConfig) -> Pane {
    ZoomPane::new(config, PanZoomBehavior::new(VIEW), PaneState::default()).unwrap()
}

#[derive(Default)]
struct Calls {
    start: Vec<Viewport>,
    moves: Vec<Viewport>,
    end: Vec<Viewport>,
}

fn with_callbacks(config: ZoomPaneConfig) -> (ZoomPaneConfig, Rc<RefCell<Calls>>) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let (a, b, c) = (calls.clone(), calls.clone(), calls.clone());
    let config = config
        .on_move_start(move |_, t| a.borrow_mut().start.push(t))
        .on_move(move |_, t| b.borrow_mut().moves.push(t))
        .on_move_end(move |_, t| c.borrow_mut().end.push(t));
    (config, calls)
}

fn sample_events() -> Vec<InputEvent> {
    vec![
        InputEvent::wheel(WheelDelta::pixels(0.0, -50.0)),
        InputEvent::wheel(WheelDelta::lines(2.0, 1.0)).with_modifiers(Modifiers::CONTROL),
        InputEvent::wheel(WheelDelta::pixels(0.0, 5.0)).with_target_class("nowheel"),
        InputEvent::pointer_down(PointerButton::Primary),
        InputEvent::pointer_down(PointerButton::Secondary),
        InputEvent::pointer_down(PointerButton::Primary).with_target_class("nopan"),
        InputEvent::touch_start(),
        InputEvent::pointer_move(),
        InputEvent::double_click(),
        InputEvent::pinch(0.2),
    ]
}

#[test]
fn initial_transform_is_clamped_into_bounds() {
    let extent = Rect::new(-100.0, -50.0, 1_000.0, 800.0);
    let cases = [
        (Point::new(-500.0, 10.0), 0.01),
        (Point::new(5_000.0, 5_000.0), 100.0),
        (Point::new(20.0, -60.0), 1.0),
    ];
    for (position, zoom) in cases {
        let pane = mount(
            ZoomPaneConfig::new()
                .with_translate_extent(extent)
                .with_zoom_range(0.5, 2.0)
                .with_default_position(position)
                .with_default_zoom(zoom),
        );
        let t = pane.store().transform;
        assert_eq!(t, pane.viewport(), "store and behavior disagree after mount");
        assert!((0.5..=2.0).contains(&t.zoom), "zoom {} out of range", t.zoom);
        assert!((extent.x0..=extent.x1).contains(&t.x), "x {} outside extent", t.x);
        assert!((extent.y0..=extent.y1).contains(&t.y), "y {} outside extent", t.y);
    }

    let pane = mount(
        ZoomPaneConfig::new()
            .with_translate_extent(extent)
            .with_default_position((-500.0, 10.0))
            .with_default_zoom(0.01),
    );
    assert_eq!(pane.store().transform, Viewport::new(-100.0, 10.0, 0.5));
}

#[test]
fn filter_is_a_pure_function_of_its_inputs() {
    let configs = [
        ZoomPaneConfig::default(),
        ZoomPaneConfig::new().with_pan_on_scroll(true),
        ZoomPaneConfig::new()
            .with_zoom_on_scroll(false)
            .with_zoom_on_pinch(false),
    ];
    let ambients = [
        AmbientInput::default(),
        AmbientInput {
            zoom_activation_key_pressed: true,
            ..AmbientInput::default()
        },
    ];
    for config in &configs {
        for ambient in ambients {
            let a = GestureFilter::new(config, ambient);
            let b = GestureFilter::new(config, ambient);
            for event in sample_events() {
                let first = a.evaluate(&event);
                assert_eq!(first, a.evaluate(&event));
                assert_eq!(first, b.evaluate(&event));
            }
        }
    }
}

#[test]
fn everything_disabled_rejects_every_event() {
    let (config, calls) = with_callbacks(
        ZoomPaneConfig::new()
            .with_pan_on_drag(false)
            .with_zoom_on_scroll(false)
            .with_pan_on_scroll(false)
            .with_zoom_on_double_click(false)
            .with_zoom_on_pinch(false),
    );
    let mut pane = mount(config);
    for event in sample_events() {
        let outcome = pane.handle_event(&event);
        assert_eq!(
            outcome.decision,
            FilterDecision::Reject(FilterRule::AllInteractionsDisabled)
        );
    }
    assert_eq!(pane.store().revision, 1);
    assert!(calls.borrow().start.is_empty());
}

#[test]
fn selection_key_blocks_every_event_and_update() {
    let (config, calls) = with_callbacks(ZoomPaneConfig::new().with_pan_on_scroll(true));
    let mut pane = mount(config);
    pane.handle_key(&Key::Named(NamedKey::Shift), KeyState::Down);
    for event in sample_events() {
        assert!(!pane.handle_event(&event).is_admitted());
    }
    pane.handle_event(&InputEvent::pointer_move().at((100.0, 100.0)));
    pane.handle_event(&InputEvent::pointer_up());
    assert_eq!(pane.store().transform, Viewport::IDENTITY);
    assert_eq!(pane.store().revision, 1);
    let calls = calls.borrow();
    assert!(calls.start.is_empty() && calls.moves.is_empty() && calls.end.is_empty());
}

#[test]
fn pinch_zoom_flag_gates_platform_pinch() {
    let mut pane = mount(ZoomPaneConfig::new().with_zoom_on_pinch(false));
    let outcome = pane.handle_event(&InputEvent::pinch(0.5));
    assert_eq!(
        outcome.decision,
        FilterDecision::Reject(FilterRule::PinchZoomDisabled)
    );
    assert_eq!(pane.viewport().zoom, 1.0);

    pane.set_config(ZoomPaneConfig::default()).unwrap();
    assert!(pane.handle_event(&InputEvent::pinch(0.5)).is_admitted());
    assert_eq!(pane.viewport().zoom, 1.5);
    assert_eq!(pane.store().transform.zoom, 1.5);
}

#[test]
fn vertical_pan_on_scroll_discards_horizontal_delta() {
    let mut pane = mount(
        ZoomPaneConfig::new()
            .with_pan_on_scroll(true)
            .with_pan_on_scroll_mode(PanOnScrollMode::Vertical),
    );
    pane.handle_event(&InputEvent::wheel(WheelDelta::pixels(10.0, 0.0)));
    assert_eq!(pane.store().transform.x, 0.0);
    assert_eq!(pane.store().transform.y, 0.0);
}

#[test]
fn control_wheel_in_pan_mode_pinch_zooms() {
    let mut pane = mount(
        ZoomPaneConfig::new()
            .with_pan_on_scroll(true)
            .with_zoom_range(0.25, 8.0),
    );
    let event = InputEvent::wheel(WheelDelta::pixels(0.0, -100.0))
        .with_modifiers(Modifiers::CONTROL)
        .at((0.0, 0.0));
    let outcome = pane.handle_event(&event);
    assert!(outcome.is_admitted());
    assert!(outcome.disposition.prevent_default && outcome.disposition.stop_propagation);
    assert_eq!(pane.store().transform, Viewport::new(0.0, 0.0, 4.0));
}

#[test]
fn move_end_fires_only_for_changed_gestures() {
    let (config, calls) = with_callbacks(ZoomPaneConfig::default());
    let mut pane = mount(config);

    // Press and release in place.
    pane.handle_event(&InputEvent::pointer_down(PointerButton::Primary).at((50.0, 50.0)));
    pane.handle_event(&InputEvent::pointer_up().at((50.0, 50.0)));
    assert_eq!(calls.borrow().start.len(), 1);
    assert!(calls.borrow().end.is_empty());

    // Drag away and back: moves fire, the end transform equals the start.
    pane.handle_event(&InputEvent::pointer_down(PointerButton::Primary).at((50.0, 50.0)));
    pane.handle_event(&InputEvent::pointer_move().at((80.0, 50.0)));
    pane.handle_event(&InputEvent::pointer_move().at((50.0, 50.0)));
    pane.handle_event(&InputEvent::pointer_up().at((50.0, 50.0)));
    assert_eq!(calls.borrow().moves.len(), 2);
    assert!(calls.borrow().end.is_empty());

    // A real drag.
    pane.handle_event(&InputEvent::pointer_down(PointerButton::Primary).at((50.0, 50.0)));
    pane.handle_event(&InputEvent::pointer_move().at((60.0, 70.0)));
    pane.handle_event(&InputEvent::pointer_up().at((60.0, 70.0)));
    assert_eq!(calls.borrow().end, [Viewport::new(10.0, 20.0, 1.0)]);
}

#[test]
fn changing_pan_on_scroll_mode_rebinds_the_wheel() {
    let base = ZoomPaneConfig::new()
        .with_pan_on_scroll(true)
        .with_pan_on_scroll_speed(1.0);
    let mut pane = mount(base.clone().with_pan_on_scroll_mode(PanOnScrollMode::Vertical));
    let wheel = InputEvent::wheel(WheelDelta::pixels(10.0, 10.0));

    pane.handle_event(&wheel);
    assert_eq!(pane.store().transform, Viewport::new(0.0, -10.0, 1.0));

    pane.set_config(base.clone().with_pan_on_scroll_mode(PanOnScrollMode::Horizontal))
        .unwrap();
    pane.handle_event(&wheel);
    assert_eq!(pane.store().transform, Viewport::new(-10.0, -10.0, 1.0));

    pane.set_config(base.with_pan_on_scroll(false)).unwrap();
    assert_eq!(pane.store().handles.wheel, WheelBindingKind::NativeZoom);
    let before = pane.store().transform;
    pane.handle_event(&wheel);
    assert_eq!(pane.store().transform.x, before.x * pane.store().transform.zoom / before.zoom);
    assert!(pane.store().transform.zoom < 1.0);
}

#[test]
fn exclusion_markers_are_honored_end_to_end() {
    let mut pane = mount(ZoomPaneConfig::default());
    let outcome = pane.handle_event(
        &InputEvent::wheel(WheelDelta::pixels(0.0, -100.0)).with_target_class("nowheel"),
    );
    assert_eq!(
        outcome.decision,
        FilterDecision::Reject(FilterRule::NoWheelTarget)
    );
    assert!(!outcome.disposition.prevent_default);

    let outcome = pane.handle_event(
        &InputEvent::pointer_down(PointerButton::Primary).with_target_class("nopan"),
    );
    assert_eq!(outcome.decision, FilterDecision::Reject(FilterRule::NoPanTarget));
    assert!(!pane.is_gesture_active());
}

#[test]
fn translate_extent_holds_while_dragging() {
    let mut pane = mount(
        ZoomPaneConfig::new().with_translate_extent(Rect::new(0.0, 0.0, 1_000.0, 1_000.0)),
    );
    pane.handle_event(&InputEvent::pointer_down(PointerButton::Primary).at((0.0, 0.0)));
    pane.handle_event(&InputEvent::pointer_move().at((250.0, 250.0)));
    assert_eq!(pane.store().transform, Viewport::IDENTITY);
    pane.handle_event(&InputEvent::pointer_move().at((-5_000.0, -5_000.0)));
    // The visible 400x300 region may not leave the 1000x1000 extent.
    assert_eq!(pane.store().transform, Viewport::new(-600.0, -700.0, 1.0));
    pane.handle_event(&InputEvent::pointer_up());
}

#[test]
fn shared_store_is_visible_to_siblings() {
    let shared = Rc::new(RefCell::new(PaneState::default()));
    let mut pane = ZoomPane::new(
        ZoomPaneConfig::default(),
        PanZoomBehavior::new(VIEW),
        Rc::clone(&shared),
    )
    .unwrap();
    pane.pan_by(CanvasVec::new(12.0, -4.0));
    assert_eq!(shared.borrow().transform, Viewport::new(12.0, -4.0, 1.0));
    assert!(!shared.borrow().gesture_active);
}
