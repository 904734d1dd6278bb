// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_pane --heading-base-level=0

//! Understory Zoom Pane: a headless pan/zoom controller for infinite canvases.
//!
//! The crate turns raw pointer, wheel, touch, and key input into a viewport
//! transform `{x, y, zoom}` while enforcing a configurable policy about which
//! gestures are allowed and how they combine. It is organized as a pipeline:
//!
//! - [`GestureFilter`]: a pure admission predicate rebuilt from
//!   [`ZoomPaneConfig`] and [`AmbientInput`] whenever either changes.
//! - [`WheelBinding`]: decides whether an admitted wheel event pans, pinch
//!   zooms, or goes to the native wheel zoom.
//! - [`ZoomBehavior`]: the gesture primitive holding the live transform and
//!   reporting start/update/end. [`PanZoomBehavior`] is a ready-made one.
//! - [`GestureSession`]: the `Idle`/`Active`/`Suppressed` lifecycle deciding
//!   which updates reach the store and which callbacks fire.
//! - [`ViewportStore`]: the shared state the pane publishes into.
//!
//! [`ZoomPane`] wires these together.
//!
//! It does **not** do rendering, hit testing, or selection. Hosts translate
//! their native events into [`InputEvent`]s, including the class names found
//! on the event target's ancestry so `nowheel`/`nopan` markers work.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_zoom_pane::{
//!     InputEvent, PanOnScrollMode, PaneState, PanZoomBehavior, Viewport, WheelDelta,
//!     ZoomPane, ZoomPaneConfig,
//! };
//!
//! let config = ZoomPaneConfig::new()
//!     .with_pan_on_scroll(true)
//!     .with_pan_on_scroll_mode(PanOnScrollMode::Vertical);
//! let behavior = PanZoomBehavior::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut pane = ZoomPane::new(config, behavior, PaneState::default()).unwrap();
//!
//! // Scrolling pans; the horizontal component is discarded in vertical mode.
//! let outcome = pane.handle_event(&InputEvent::wheel(WheelDelta::pixels(30.0, 40.0)));
//! assert!(outcome.disposition.prevent_default);
//! assert_eq!(pane.store().transform, Viewport::new(0.0, -20.0, 1.0));
//! ```
//!
//! ## Admission
//!
//! ```rust
//! use ui_events::pointer::PointerButton;
//! use understory_zoom_pane::{
//!     AmbientInput, FilterDecision, FilterRule, GestureFilter, InputEvent, ZoomPaneConfig,
//! };
//!
//! let config = ZoomPaneConfig::new().with_pan_on_drag(false);
//! let filter = GestureFilter::new(&config, AmbientInput::default());
//! assert_eq!(
//!     filter.evaluate(&InputEvent::pointer_down(PointerButton::Primary)),
//!     FilterDecision::Reject(FilterRule::PanOnDragDisabled),
//! );
//! assert!(filter.admits(&InputEvent::double_click()));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod behavior;
mod config;
mod coords;
mod error;
mod filter;
mod input;
mod keys;
mod lifecycle;
mod pane;
mod store;
mod transform;
mod wheel;

pub use behavior::{GestureSignal, GestureSignals, PanZoomBehavior, WHEEL_IDLE_MS, ZoomBehavior};
pub use config::{MoveHandler, PanOnDrag, PanOnScrollMode, ZoomPaneConfig};
pub use coords::{CanvasPoint, CanvasVec, ScreenPoint, ScreenVec};
pub use error::ConfigError;
pub use filter::{AmbientInput, FilterDecision, FilterRule, GestureFilter};
pub use input::{DeltaMode, InputEvent, InputKind, WheelDelta};
pub use keys::KeyPressState;
pub use lifecycle::{GesturePhase, GestureSession, LifecycleEffect};
pub use pane::{EventOutcome, ZoomPane};
pub use store::{PaneHandles, PaneRoot, PaneState, ViewportStore};
pub use transform::{INFINITE_EXTENT, Viewport, ZoomBounds};
pub use wheel::{
    EventDisposition, WheelAction, WheelBinding, WheelBindingKind, WheelResolution,
    delta_mode_factor, pinch_delta,
};
