// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pane controller.

use log::{debug, trace, warn};
use ui_events::keyboard::{Key, KeyState};

use crate::behavior::{GestureSignal, GestureSignals, ZoomBehavior};
use crate::config::ZoomPaneConfig;
use crate::coords::{CanvasVec, ScreenPoint};
use crate::error::ConfigError;
use crate::filter::{AmbientInput, FilterDecision, GestureFilter};
use crate::input::{InputEvent, InputKind};
use crate::keys::KeyPressState;
use crate::lifecycle::{GesturePhase, GestureSession, LifecycleEffect};
use crate::store::{PaneHandles, ViewportStore};
use crate::transform::{Viewport, ZoomBounds};
use crate::wheel::{EventDisposition, WheelAction, WheelBinding};

/// Result of [`ZoomPane::handle_event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventOutcome {
    /// Admission decision.
    pub decision: FilterDecision,
    /// What the host should do with the native event.
    pub disposition: EventDisposition,
}

impl EventOutcome {
    /// Returns `true` if the event reached the gesture primitive or wheel
    /// policy.
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        self.decision.is_admitted()
    }
}

/// Viewport interaction controller.
///
/// Routes raw input through the [`GestureFilter`], then either the
/// [`WheelBinding`] (wheel events) or the behavior's native recognizers,
/// runs the resulting signals through the [`GestureSession`], and publishes
/// into the store. Filter and wheel binding are rebuilt whenever the
/// configuration or ambient key state changes.
///
/// Pointer moves and releases that belong to a running gesture are not
/// re-filtered; the filter gates what may start a gesture.
#[derive(Debug)]
pub struct ZoomPane<Z: ZoomBehavior, S: ViewportStore> {
    config: ZoomPaneConfig,
    bounds: ZoomBounds,
    /// Host-supplied ambient flags.
    ambient: AmbientInput,
    /// Ambient flags after merging tracked keys and store selection.
    effective: AmbientInput,
    keys: KeyPressState,
    filter: GestureFilter,
    wheel: WheelBinding,
    session: GestureSession,
    behavior: Z,
    store: S,
}

impl<Z: ZoomBehavior, S: ViewportStore> ZoomPane<Z, S> {
    /// Validates `config`, initializes the viewport, installs bounds on the
    /// behavior, and publishes the initial transform and handles.
    pub fn new(config: ZoomPaneConfig, mut behavior: Z, mut store: S) -> Result<Self, ConfigError> {
        let bounds = config.validate()?;
        behavior.install_bounds(bounds);
        let initial =
            behavior.mount(bounds.initialize(config.default_position, config.default_zoom));

        let effective = AmbientInput {
            user_selection_active: store.user_selection_active(),
            ..AmbientInput::default()
        };
        let filter = GestureFilter::new(&config, effective);
        let wheel = WheelBinding::new(&config, effective);
        let mut session = GestureSession::new(initial);
        session.set_suppressed(effective.selection_in_progress());

        store.set_transform(initial);
        store.set_handles(PaneHandles::new(wheel.kind(), &bounds, behavior.root()));
        debug!(
            "zoom pane mounted at {initial:?}, zoom range {}..={}, wheel {:?}",
            bounds.min_zoom(),
            bounds.max_zoom(),
            wheel.kind()
        );

        Ok(Self {
            config,
            bounds,
            ambient: AmbientInput::default(),
            effective,
            keys: KeyPressState::new(),
            filter,
            wheel,
            session,
            behavior,
            store,
        })
    }

    /// Replaces the configuration and rebinds what depends on it.
    ///
    /// Changed bounds are installed on the behavior. On error nothing
    /// changes.
    pub fn set_config(&mut self, config: ZoomPaneConfig) -> Result<(), ConfigError> {
        let bounds = config.validate()?;
        self.config = config;
        if bounds != self.bounds {
            debug!(
                "zoom bounds changed: extent {:?}, zoom {}..={}",
                bounds.translate_extent(),
                bounds.min_zoom(),
                bounds.max_zoom()
            );
            self.bounds = bounds;
            self.behavior.install_bounds(bounds);
            self.publish_handles();
        }
        self.effective = self.compute_ambient();
        self.rebind();
        Ok(())
    }

    /// Sets host-tracked ambient flags.
    ///
    /// Keys tracked through [`ZoomPane::handle_key`] and a selection reported
    /// by the store are merged in.
    pub fn set_ambient(&mut self, ambient: AmbientInput) {
        self.ambient = ambient;
        self.refresh_ambient();
    }

    /// Feeds a key transition. Returns `true` if the held key set changed.
    pub fn handle_key(&mut self, key: &Key, state: KeyState) -> bool {
        let changed = self.keys.update(key, state);
        if changed {
            self.refresh_ambient();
        }
        changed
    }

    /// Forgets held keys, for example when the host window loses focus.
    pub fn release_keys(&mut self) {
        self.keys.clear();
        self.refresh_ambient();
    }

    /// Processes one raw input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventOutcome {
        self.refresh_ambient();
        self.tick(event.time_ms);

        let continuing = matches!(event.kind, InputKind::PointerMove | InputKind::PointerUp)
            && self.behavior.is_gesturing();
        let decision = if continuing {
            FilterDecision::Admit
        } else {
            self.filter.evaluate(event)
        };
        if let FilterDecision::Reject(rule) = decision {
            trace!("rejected {:?}: {rule:?}", event.kind);
            return EventOutcome {
                decision,
                disposition: EventDisposition::PASS,
            };
        }

        let mut signals = GestureSignals::new();
        let disposition = match &event.kind {
            InputKind::Wheel(delta) => {
                let resolution = self.wheel.resolve(event, delta, self.behavior.transform().zoom);
                trace!("wheel {delta:?} resolved to {:?}", resolution.action);
                match resolution.action {
                    WheelAction::PanBy(d) => {
                        self.drive(&mut signals, |b| b.translate_by(d));
                    }
                    WheelAction::ZoomTo { zoom, anchor } => {
                        self.drive(&mut signals, |b| b.scale_to(zoom, anchor));
                    }
                    WheelAction::Delegate => self.behavior.handle_input(event, &mut signals),
                }
                resolution.disposition
            }
            _ => {
                self.behavior.handle_input(event, &mut signals);
                EventDisposition::PASS
            }
        };
        self.dispatch(&signals, Some(event));
        EventOutcome {
            decision,
            disposition,
        }
    }

    /// Advances time, ending wheel and pinch gestures idle at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        let mut signals = GestureSignals::new();
        self.behavior.flush(now_ms, &mut signals);
        self.dispatch(&signals, None);
    }

    /// Sets the viewport programmatically, within bounds.
    ///
    /// Like the other programmatic setters, a non-finite argument is ignored
    /// and the current viewport is returned.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Viewport {
        if !viewport.is_finite() {
            return self.ignore_non_finite("set_viewport");
        }
        self.programmatic(|b| b.set_transform(viewport))
    }

    /// Zooms to `zoom` keeping `anchor` fixed.
    pub fn zoom_to(&mut self, zoom: f64, anchor: ScreenPoint) -> Viewport {
        if !zoom.is_finite() || !anchor.0.is_finite() {
            return self.ignore_non_finite("zoom_to");
        }
        self.programmatic(|b| b.scale_to(zoom, anchor))
    }

    /// Multiplies the zoom by `factor` keeping `anchor` fixed.
    pub fn zoom_by(&mut self, factor: f64, anchor: ScreenPoint) -> Viewport {
        let zoom = self.behavior.transform().zoom * factor;
        self.zoom_to(zoom, anchor)
    }

    /// Pans by a canvas-space delta.
    pub fn pan_by(&mut self, delta: CanvasVec) -> Viewport {
        if !delta.0.is_finite() {
            return self.ignore_non_finite("pan_by");
        }
        self.programmatic(|b| b.translate_by(delta))
    }

    /// Returns the live transform held by the behavior.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.behavior.transform()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomPaneConfig {
        &self.config
    }

    /// Returns the installed bounds.
    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Returns the ambient flags in effect.
    #[must_use]
    pub fn ambient(&self) -> AmbientInput {
        self.effective
    }

    /// Returns the installed filter.
    #[must_use]
    pub fn filter(&self) -> &GestureFilter {
        &self.filter
    }

    /// Returns the installed wheel binding.
    #[must_use]
    pub fn wheel_binding(&self) -> &WheelBinding {
        &self.wheel
    }

    /// Returns the gesture phase.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.session.phase()
    }

    /// Returns `true` while a gesture runs.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.session.is_active()
    }

    /// Returns the handles currently published.
    #[must_use]
    pub fn handles(&self) -> PaneHandles {
        PaneHandles::new(self.wheel.kind(), &self.bounds, self.behavior.root())
    }

    /// Returns the behavior.
    #[must_use]
    pub fn behavior(&self) -> &Z {
        &self.behavior
    }

    /// Returns the behavior mutably, for example to resize it.
    pub fn behavior_mut(&mut self) -> &mut Z {
        &mut self.behavior
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the pane, returning the behavior and store.
    pub fn into_parts(self) -> (Z, S) {
        (self.behavior, self.store)
    }

    fn ignore_non_finite(&self, op: &str) -> Viewport {
        warn!("{op}: ignoring non-finite argument");
        self.behavior.transform()
    }

    fn programmatic(&mut self, op: impl FnOnce(&mut Z) -> Viewport) -> Viewport {
        let mut signals = GestureSignals::new();
        let applied = self.drive(&mut signals, op);
        self.dispatch(&signals, None);
        applied
    }

    /// Applies a bounded change as a gesture of its own, or as an update of
    /// the running one.
    fn drive(
        &mut self,
        signals: &mut GestureSignals,
        op: impl FnOnce(&mut Z) -> Viewport,
    ) -> Viewport {
        let running = self.session.is_active();
        if !running {
            signals.push(GestureSignal::Start(self.behavior.transform()));
        }
        let applied = op(&mut self.behavior);
        signals.push(GestureSignal::Update(applied));
        if !running {
            signals.push(GestureSignal::End(applied));
        }
        applied
    }

    fn dispatch(&mut self, signals: &[GestureSignal], source: Option<&InputEvent>) {
        for signal in signals {
            let effect = match *signal {
                GestureSignal::Start(t) => self.session.start(t),
                GestureSignal::Update(t) => self.session.update(t),
                GestureSignal::End(t) => self.session.end(t),
            };
            match effect {
                LifecycleEffect::Started(snapshot) => {
                    debug!("gesture started at {snapshot:?}");
                    self.store.set_gesture_active(true);
                    if let Some(on_move_start) = &self.config.on_move_start {
                        on_move_start(source, snapshot);
                    }
                }
                LifecycleEffect::Moved(t) => {
                    self.store.set_transform(t);
                    if let Some(on_move) = &self.config.on_move {
                        on_move(source, t);
                    }
                }
                LifecycleEffect::Ended { transform, changed } => {
                    debug!("gesture ended at {transform:?} (changed: {changed})");
                    self.store.set_gesture_active(false);
                    if changed && let Some(on_move_end) = &self.config.on_move_end {
                        on_move_end(source, transform);
                    }
                }
                LifecycleEffect::Ignored => {}
            }
        }
    }

    fn compute_ambient(&self) -> AmbientInput {
        AmbientInput {
            selection_key_pressed: self.ambient.selection_key_pressed
                || self.keys.is_pressed(&self.config.selection_key),
            zoom_activation_key_pressed: self.ambient.zoom_activation_key_pressed
                || self.keys.is_pressed(&self.config.zoom_activation_key),
            user_selection_active: self.ambient.user_selection_active
                || self.store.user_selection_active(),
        }
    }

    fn refresh_ambient(&mut self) {
        let effective = self.compute_ambient();
        if effective != self.effective {
            trace!("ambient input changed: {effective:?}");
            self.effective = effective;
            self.rebind();
        }
    }

    fn rebind(&mut self) {
        let filter = GestureFilter::new(&self.config, self.effective);
        if filter != self.filter {
            debug!("gesture filter rebound");
            self.filter = filter;
        }
        let wheel = WheelBinding::new(&self.config, self.effective);
        if wheel != self.wheel {
            debug!("wheel handler rebound: {:?}", wheel.kind());
            let kind_changed = wheel.kind() != self.wheel.kind();
            self.wheel = wheel;
            if kind_changed {
                self.publish_handles();
            }
        }
        self.session
            .set_suppressed(self.effective.selection_in_progress());
    }

    fn publish_handles(&mut self) {
        let handles = self.handles();
        self.store.set_handles(handles);
    }
}
