// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture admission filter.
//!
//! [`GestureFilter`] decides, per raw event, whether the gesture primitive may
//! see the event at all. It is rebuilt from the current configuration and
//! ambient key state whenever either changes, so it never holds a stale
//! view of either.
//!
//! Rules are checked in order and the first matching one rejects:
//!
//! 1. Every interaction is disabled.
//! 2. A selection is in progress.
//! 3. Double click with `zoom_on_double_click` off.
//! 4. Wheel event inside a `no_wheel_class_name` subtree.
//! 5. Non-wheel event inside a `no_pan_class_name` subtree.
//! 6. Platform pinch, or Control + wheel, with `zoom_on_pinch` off.
//! 7. Wheel event when no wheel handling (zoom, pan, or pinch) applies.
//! 8. Pointer press with `pan_on_drag` off, or with a button not listed in
//!    [`PanOnDrag::Buttons`].
//! 9. Control held on a non-wheel event, or a non-primary button pressed
//!    that `pan_on_drag` does not list.

use alloc::string::String;

use crate::config::{PanOnDrag, ZoomPaneConfig};
use crate::input::{InputEvent, InputKind};

/// Key and selection state owned by collaborators and read by the pane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmbientInput {
    /// The selection key is held.
    pub selection_key_pressed: bool,
    /// The zoom activation key is held.
    pub zoom_activation_key_pressed: bool,
    /// A box selection is running (reported by the store).
    pub user_selection_active: bool,
}

impl AmbientInput {
    /// Returns `true` while selection owns pointer input.
    #[must_use]
    pub fn selection_in_progress(&self) -> bool {
        self.selection_key_pressed || self.user_selection_active
    }
}

/// The rule that rejected an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterRule {
    /// Every interaction is disabled.
    AllInteractionsDisabled,
    /// A selection is in progress.
    SelectionInProgress,
    /// Double click zoom is disabled.
    DoubleClickDisabled,
    /// Wheel event inside a wheel-excluded subtree.
    NoWheelTarget,
    /// Non-wheel event inside a pan-excluded subtree.
    NoPanTarget,
    /// Pinch (platform or Control + wheel) with pinch zoom disabled.
    PinchZoomDisabled,
    /// Wheel event with no wheel handling enabled.
    WheelDisabled,
    /// Pointer press with drag panning disabled.
    PanOnDragDisabled,
    /// Pointer press with a button not allowed to pan.
    ButtonNotAllowed,
    /// Control held on a non-wheel event.
    ZoomModifierHeld,
}

/// Outcome of [`GestureFilter::evaluate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterDecision {
    /// The event may start or continue a gesture.
    Admit,
    /// The event is dropped.
    Reject(FilterRule),
}

impl FilterDecision {
    /// Returns `true` for [`FilterDecision::Admit`].
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Admission predicate derived from configuration and ambient input.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureFilter {
    all_disabled: bool,
    selection_in_progress: bool,
    zoom_scroll: bool,
    zoom_on_pinch: bool,
    zoom_on_double_click: bool,
    pan_on_scroll: bool,
    pan_on_drag: PanOnDrag,
    no_wheel_class_name: String,
    no_pan_class_name: String,
}

impl GestureFilter {
    /// Builds the filter for the given configuration and ambient state.
    #[must_use]
    pub fn new(config: &ZoomPaneConfig, ambient: AmbientInput) -> Self {
        Self {
            all_disabled: config.all_interactions_disabled(ambient.zoom_activation_key_pressed),
            selection_in_progress: ambient.selection_in_progress(),
            zoom_scroll: config.zoom_on_scroll || ambient.zoom_activation_key_pressed,
            zoom_on_pinch: config.zoom_on_pinch,
            zoom_on_double_click: config.zoom_on_double_click,
            pan_on_scroll: config.pan_on_scroll,
            pan_on_drag: config.pan_on_drag.clone(),
            no_wheel_class_name: config.no_wheel_class_name.clone(),
            no_pan_class_name: config.no_pan_class_name.clone(),
        }
    }

    /// Returns `true` if `event` is admitted.
    #[must_use]
    pub fn admits(&self, event: &InputEvent) -> bool {
        self.evaluate(event).is_admitted()
    }

    /// Runs the rules in order and reports the first one that rejects.
    #[must_use]
    pub fn evaluate(&self, event: &InputEvent) -> FilterDecision {
        use FilterRule::*;

        let is_wheel = event.is_wheel();
        let modifier = event.zoom_modifier_held();

        if self.all_disabled {
            return FilterDecision::Reject(AllInteractionsDisabled);
        }
        if self.selection_in_progress {
            return FilterDecision::Reject(SelectionInProgress);
        }
        if !self.zoom_on_double_click && matches!(event.kind, InputKind::DoubleClick) {
            return FilterDecision::Reject(DoubleClickDisabled);
        }
        if is_wheel && event.is_wrapped_with_class(&self.no_wheel_class_name) {
            return FilterDecision::Reject(NoWheelTarget);
        }
        if !is_wheel && event.is_wrapped_with_class(&self.no_pan_class_name) {
            return FilterDecision::Reject(NoPanTarget);
        }
        let is_pinch = matches!(event.kind, InputKind::Pinch { .. }) || (modifier && is_wheel);
        if !self.zoom_on_pinch && is_pinch {
            return FilterDecision::Reject(PinchZoomDisabled);
        }
        let pinch_zoom = self.zoom_on_pinch && modifier;
        if is_wheel && !self.zoom_scroll && !self.pan_on_scroll && !pinch_zoom {
            return FilterDecision::Reject(WheelDisabled);
        }
        if event.is_pointer_down() {
            match &self.pan_on_drag {
                PanOnDrag::Disabled => return FilterDecision::Reject(PanOnDragDisabled),
                PanOnDrag::Buttons(_) => {
                    let listed = event.button().is_some_and(|b| self.pan_on_drag.lists(b));
                    if !listed && event.button().is_some() {
                        return FilterDecision::Reject(ButtonNotAllowed);
                    }
                }
                PanOnDrag::Enabled => {}
            }
        }
        if modifier && !is_wheel {
            return FilterDecision::Reject(ZoomModifierHeld);
        }
        let button_listed = event.button().is_some_and(|b| self.pan_on_drag.lists(b));
        if event.is_secondary_button() && !button_listed {
            return FilterDecision::Reject(ButtonNotAllowed);
        }
        FilterDecision::Admit
    }
}
