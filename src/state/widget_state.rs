// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-card mutable state.

use crate::types::DisplayedValue;

/// The state owned by one card instance.
///
/// Only the [`Reconciler`](super::Reconciler) and the
/// [`Debouncer`](crate::debounce::Debouncer) mutate it.
///
/// # Invariants
///
/// - `dirty` implies `displayed` was set by a local edit more recently than
///   the last applied snapshot.
/// - `pending_command_value` holds at most one value; a newer edit replaces it.
/// - `displayed` is always defined, see [`DisplayedValue::Placeholder`].
///
/// # Examples
///
/// ```
/// use thermostat_card::state::WidgetState;
/// use thermostat_card::types::DisplayedValue;
///
/// let state = WidgetState::new();
/// assert_eq!(state.displayed(), DisplayedValue::Placeholder);
/// assert!(!state.is_dirty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub(crate) displayed: DisplayedValue,
    pub(crate) dirty: bool,
    pub(crate) pending_command_value: Option<f64>,
    /// Incremented on every local edit; lets a late completion tell whether
    /// it is still the latest.
    pub(crate) generation: u64,
}

impl WidgetState {
    /// Creates a clean state showing the placeholder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value rendered to the user.
    #[must_use]
    pub fn displayed(&self) -> DisplayedValue {
        self.displayed
    }

    /// Returns `true` while a local edit awaits host confirmation.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the value queued for transmission, if a timer is armed.
    #[must_use]
    pub fn pending_command_value(&self) -> Option<f64> {
        self.pending_command_value
    }

    /// Returns the edit generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clears the dirty flag if no edit happened after `generation`.
    ///
    /// Returns `true` if the flag was cleared by this call. A stale
    /// generation, or a flag already cleared by a confirming snapshot, makes
    /// this a no-op.
    pub(crate) fn settle(&mut self, generation: u64) -> bool {
        if self.generation != generation || !self.dirty {
            return false;
        }
        self.dirty = false;
        true
    }
}
