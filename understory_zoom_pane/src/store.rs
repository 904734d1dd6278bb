// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared application state the pane writes into.
//!
//! The pane never owns application state. It is handed a [`ViewportStore`] at
//! construction and writes synchronously, within the same call as the event
//! that caused the change. [`PaneState`] is a plain implementation; wrap it in
//! `Rc<RefCell<_>>` to share it with sibling components.

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Rect;

use crate::transform::{INFINITE_EXTENT, Viewport, ZoomBounds};
use crate::wheel::WheelBindingKind;

/// Opaque identifier of the element the pane is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaneRoot(pub u64);

/// Handles published for collaborators doing coordinate conversion and hit
/// testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaneHandles {
    /// Installed wheel handler.
    pub wheel: WheelBindingKind,
    /// Installed translate extent.
    pub translate_extent: Rect,
    /// Installed minimum zoom.
    pub min_zoom: f64,
    /// Installed maximum zoom.
    pub max_zoom: f64,
    /// Root element of the gesture primitive's binding, if it has one.
    pub root: Option<PaneRoot>,
}

impl PaneHandles {
    /// Builds handles from installed bounds.
    #[must_use]
    pub fn new(wheel: WheelBindingKind, bounds: &ZoomBounds, root: Option<PaneRoot>) -> Self {
        Self {
            wheel,
            translate_extent: bounds.translate_extent(),
            min_zoom: bounds.min_zoom(),
            max_zoom: bounds.max_zoom(),
            root,
        }
    }
}

impl Default for PaneHandles {
    fn default() -> Self {
        Self {
            wheel: WheelBindingKind::default(),
            translate_extent: INFINITE_EXTENT,
            min_zoom: 0.5,
            max_zoom: 2.0,
            root: None,
        }
    }
}

/// Narrow read/write contract between the pane and application state.
pub trait ViewportStore {
    /// Publishes the current viewport.
    fn set_transform(&mut self, transform: Viewport);

    /// Publishes whether a pan/zoom gesture is running.
    fn set_gesture_active(&mut self, active: bool);

    /// Publishes the installed handles.
    fn set_handles(&mut self, handles: PaneHandles);

    /// Returns `true` while a box selection is running elsewhere.
    fn user_selection_active(&self) -> bool {
        false
    }
}

/// Plain owned store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaneState {
    /// Last published viewport.
    pub transform: Viewport,
    /// A gesture is running.
    pub gesture_active: bool,
    /// Last published handles.
    pub handles: PaneHandles,
    /// Set by a selection tool while a box selection runs.
    pub user_selection_active: bool,
    /// Incremented on every transform write.
    pub revision: u64,
}

impl ViewportStore for PaneState {
    fn set_transform(&mut self, transform: Viewport) {
        self.transform = transform;
        self.revision = self.revision.wrapping_add(1);
    }

    fn set_gesture_active(&mut self, active: bool) {
        self.gesture_active = active;
    }

    fn set_handles(&mut self, handles: PaneHandles) {
        self.handles = handles;
    }

    fn user_selection_active(&self) -> bool {
        self.user_selection_active
    }
}

impl<S: ViewportStore + ?Sized> ViewportStore for &mut S {
    fn set_transform(&mut self, transform: Viewport) {
        (**self).set_transform(transform);
    }

    fn set_gesture_active(&mut self, active: bool) {
        (**self).set_gesture_active(active);
    }

    fn set_handles(&mut self, handles: PaneHandles) {
        (**self).set_handles(handles);
    }

    fn user_selection_active(&self) -> bool {
        (**self).user_selection_active()
    }
}

/// Shared store; each call borrows for its own duration only.
impl<S: ViewportStore + ?Sized> ViewportStore for Rc<RefCell<S>> {
    fn set_transform(&mut self, transform: Viewport) {
        self.borrow_mut().set_transform(transform);
    }

    fn set_gesture_active(&mut self, active: bool) {
        self.borrow_mut().set_gesture_active(active);
    }

    fn set_handles(&mut self, handles: PaneHandles) {
        self.borrow_mut().set_handles(handles);
    }

    fn user_selection_active(&self) -> bool {
        self.borrow().user_selection_active()
    }
}
