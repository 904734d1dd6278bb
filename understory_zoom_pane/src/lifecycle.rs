// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture lifecycle state machine.
//!
//! ```text
//!            start                 end
//!   Idle ───────────▶ Active ───────────▶ Idle
//!                     │  ▲ ↺ update
//!    selection begins │  │ selection ends
//!                     ▼  │
//!                  Suppressed ──end──▶ Idle
//! ```
//!
//! Updates are applied only in `Active`. In `Suppressed` the gesture keeps
//! running inside the gesture primitive but its updates are dropped, so a
//! selection that starts mid-gesture pauses the viewport. Signals that make no
//! sense for the current phase (update or end while `Idle`) are logged and
//! ignored.

use log::{trace, warn};

use crate::transform::Viewport;

/// Phase of the current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture.
    #[default]
    Idle,
    /// A gesture is running and its updates are applied.
    Active,
    /// A gesture is running but selection owns input; updates are dropped.
    Suppressed,
}

/// What the pane should do in response to a lifecycle signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifecycleEffect {
    /// A gesture began; carries the pre-gesture snapshot.
    Started(Viewport),
    /// Apply the new transform.
    Moved(Viewport),
    /// The gesture finished at `transform`.
    Ended {
        /// End-of-gesture transform.
        transform: Viewport,
        /// `transform` differs from the start snapshot.
        changed: bool,
    },
    /// Nothing to do.
    Ignored,
}

/// Tracks one gesture at a time and the transform it started from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSession {
    phase: GesturePhase,
    snapshot: Viewport,
    suppressed: bool,
}

impl GestureSession {
    /// Creates an idle session whose snapshot is `initial`.
    #[must_use]
    pub fn new(initial: Viewport) -> Self {
        Self {
            phase: GesturePhase::Idle,
            snapshot: initial,
            suppressed: false,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Returns `true` while a gesture runs, suppressed or not.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// Returns the transform recorded at the last start or end.
    #[must_use]
    pub fn snapshot(&self) -> Viewport {
        self.snapshot
    }

    /// Enables or disables update suppression (selection in progress).
    ///
    /// Takes effect immediately for a running gesture and is remembered for
    /// gestures that start later.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
        self.phase = match (self.phase, suppressed) {
            (GesturePhase::Active, true) => GesturePhase::Suppressed,
            (GesturePhase::Suppressed, false) => GesturePhase::Active,
            (phase, _) => phase,
        };
    }

    /// Handles a gesture start at `transform`.
    pub fn start(&mut self, transform: Viewport) -> LifecycleEffect {
        if self.is_active() {
            warn!("gesture start while a gesture is already running; ignored");
            return LifecycleEffect::Ignored;
        }
        self.phase = if self.suppressed {
            GesturePhase::Suppressed
        } else {
            GesturePhase::Active
        };
        self.snapshot = transform;
        LifecycleEffect::Started(transform)
    }

    /// Handles a gesture update to `transform`.
    pub fn update(&mut self, transform: Viewport) -> LifecycleEffect {
        match self.phase {
            GesturePhase::Active => LifecycleEffect::Moved(transform),
            GesturePhase::Suppressed => {
                trace!("gesture update dropped while selection is in progress");
                LifecycleEffect::Ignored
            }
            GesturePhase::Idle => {
                warn!("gesture update without a running gesture; ignored");
                LifecycleEffect::Ignored
            }
        }
    }

    /// Handles a gesture end at `transform`.
    pub fn end(&mut self, transform: Viewport) -> LifecycleEffect {
        if !self.is_active() {
            warn!("gesture end without a running gesture; ignored");
            return LifecycleEffect::Ignored;
        }
        self.phase = GesturePhase::Idle;
        let changed = transform != self.snapshot;
        self.snapshot = transform;
        LifecycleEffect::Ended { transform, changed }
    }
}
