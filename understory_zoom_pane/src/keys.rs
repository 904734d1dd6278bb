// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal held-key tracking for the selection and zoom activation keys.

use smallvec::SmallVec;
use ui_events::keyboard::{Key, KeyState};

/// Set of currently held keys.
///
/// Only a handful of keys are ever held at once, so this is a small inline
/// list rather than a hash set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyPressState {
    held: SmallVec<[Key; 4]>,
}

impl KeyPressState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition. Returns `true` if the held set changed.
    pub fn update(&mut self, key: &Key, state: KeyState) -> bool {
        match state {
            KeyState::Down => self.key_down(key),
            KeyState::Up => self.key_up(key),
        }
    }

    /// Records a key press. Auto-repeat presses change nothing.
    pub fn key_down(&mut self, key: &Key) -> bool {
        if self.is_pressed(key) {
            return false;
        }
        self.held.push(key.clone());
        true
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: &Key) -> bool {
        let before = self.held.len();
        self.held.retain(|k| k != key);
        self.held.len() != before
    }

    /// Returns `true` while `key` is held.
    #[must_use]
    pub fn is_pressed(&self, key: &Key) -> bool {
        self.held.iter().any(|k| k == key)
    }

    /// Forgets every held key (for example on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
