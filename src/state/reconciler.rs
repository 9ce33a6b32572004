// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pending-edit reconciliation.
//!
//! The reconciler decides, for every snapshot, whether the displayed value
//! follows the host or keeps the user's unconfirmed edit.
//!
//! ```text
//!            snapshot (adopt)                 edit (+delta)
//!           ┌───────────────┐            ┌───────────────┐
//!           ▼               │            ▼               │
//!       ┌───────┐ ──────────┘  edit  ┌───────┐ ──────────┘
//!       │ Clean │ ─────────────────▶ │ Dirty │
//!       └───────┘ ◀───────────────── └───────┘ ──┐
//!                  snapshot == shown      ▲       │ snapshot != shown
//!                                         └───────┘ (keep local)
//! ```
//!
//! A dirty state is never overwritten by a mismatching report, so a stale
//! snapshot arriving between a tap and the host catching up does not make the
//! value jump back. An unavailable report never confirms an edit.

use crate::types::{DisplayedValue, Reported, snap};

use super::WidgetState;

/// Outcome of applying a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Clean and the report equals what is shown: nothing to do.
    Unchanged,
    /// Clean and the shown value now mirrors the new report.
    Mirrored(DisplayedValue),
    /// The host caught up with the pending edit; the state is clean again.
    Confirmed,
    /// Dirty and the report does not match; the local value is kept.
    KeptLocal,
}

impl Transition {
    /// Returns `true` if the widget state changed.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Mirrored(_) | Self::Confirmed)
    }
}

/// The Clean/Dirty state machine.
///
/// Stateless itself; all state lives in [`WidgetState`].
///
/// # Examples
///
/// ```
/// use thermostat_card::state::{Reconciler, Transition, WidgetState};
/// use thermostat_card::types::{DisplayedValue, Reported};
///
/// let mut state = WidgetState::new();
/// Reconciler::apply_snapshot(&mut state, Reported::Known(20.0));
///
/// // optimistic local edit
/// assert_eq!(Reconciler::apply_edit(&mut state, 1.0), Some(21.0));
/// assert!(state.is_dirty());
///
/// // stale snapshot does not snap back
/// assert_eq!(Reconciler::apply_snapshot(&mut state, Reported::Known(20.0)), Transition::KeptLocal);
/// assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
///
/// // host catches up
/// assert_eq!(Reconciler::apply_snapshot(&mut state, Reported::Known(21.0)), Transition::Confirmed);
/// assert!(!state.is_dirty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler;

impl Reconciler {
    /// Applies the target's reported value from a new snapshot.
    pub fn apply_snapshot(state: &mut WidgetState, reported: Reported) -> Transition {
        if state.dirty {
            if state.displayed.matches(reported) {
                state.dirty = false;
                return Transition::Confirmed;
            }
            return Transition::KeptLocal;
        }

        let next = DisplayedValue::from(reported);
        if same_display(state.displayed, next) {
            return Transition::Unchanged;
        }
        state.displayed = next;
        Transition::Mirrored(next)
    }

    /// Applies a local increment or decrement.
    ///
    /// Returns the new displayed value, or `None` when there is no number to
    /// edit (the placeholder is shown).
    pub fn apply_edit(state: &mut WidgetState, delta: f64) -> Option<f64> {
        let current = state.displayed.value()?;
        let next = snap(current + delta);
        state.displayed = DisplayedValue::Value(next);
        state.dirty = true;
        state.generation = state.generation.wrapping_add(1);
        Some(next)
    }
}

fn same_display(a: DisplayedValue, b: DisplayedValue) -> bool {
    match (a, b) {
        (DisplayedValue::Placeholder, DisplayedValue::Placeholder) => true,
        (DisplayedValue::Value(x), DisplayedValue::Value(y)) => crate::types::approx_eq(x, y),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_at(value: f64) -> WidgetState {
        let mut state = WidgetState::new();
        Reconciler::apply_snapshot(&mut state, Reported::Known(value));
        state
    }

    #[test]
    fn clean_state_mirrors_every_snapshot() {
        let mut state = WidgetState::new();
        for v in [20.0, 20.5, 18.0, 25.0] {
            let t = Reconciler::apply_snapshot(&mut state, Reported::Known(v));
            assert_eq!(t, Transition::Mirrored(DisplayedValue::Value(v)));
            assert_eq!(state.displayed(), DisplayedValue::Value(v));
            assert!(!state.is_dirty());
        }
    }

    #[test]
    fn repeated_snapshot_is_unchanged() {
        let mut state = clean_at(20.0);
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Known(20.0)),
            Transition::Unchanged
        );
        assert!(!Transition::Unchanged.is_change());
    }

    #[test]
    fn clean_unavailable_shows_placeholder() {
        let mut state = clean_at(20.0);
        let t = Reconciler::apply_snapshot(&mut state, Reported::Unavailable);
        assert_eq!(t, Transition::Mirrored(DisplayedValue::Placeholder));
        assert_eq!(state.displayed(), DisplayedValue::Placeholder);
    }

    #[test]
    fn edit_is_optimistic() {
        let mut state = clean_at(20.0);
        assert_eq!(Reconciler::apply_edit(&mut state, 1.0), Some(21.0));
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
        assert!(state.is_dirty());
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn edits_accumulate_while_dirty() {
        let mut state = clean_at(20.0);
        Reconciler::apply_edit(&mut state, 0.5);
        Reconciler::apply_edit(&mut state, 0.5);
        assert_eq!(Reconciler::apply_edit(&mut state, -0.5), Some(20.5));
        assert_eq!(state.generation(), 3);
    }

    #[test]
    fn stale_snapshot_does_not_snap_back() {
        let mut state = clean_at(20.0);
        Reconciler::apply_edit(&mut state, 1.0);
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Known(20.0)),
            Transition::KeptLocal
        );
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
        assert!(state.is_dirty());
    }

    #[test]
    fn matching_snapshot_confirms() {
        let mut state = clean_at(20.0);
        Reconciler::apply_edit(&mut state, 1.0);
        Reconciler::apply_snapshot(&mut state, Reported::Known(20.0));
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Known(21.0)),
            Transition::Confirmed
        );
        assert!(!state.is_dirty());

        // mirroring resumes
        Reconciler::apply_snapshot(&mut state, Reported::Known(19.0));
        assert_eq!(state.displayed(), DisplayedValue::Value(19.0));
    }

    #[test]
    fn unavailable_never_confirms() {
        let mut state = clean_at(20.0);
        Reconciler::apply_edit(&mut state, 1.0);
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Unavailable),
            Transition::KeptLocal
        );
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
    }

    #[test]
    fn zero_delta_resolves_on_next_snapshot() {
        let mut state = clean_at(20.0);
        Reconciler::apply_edit(&mut state, 0.0);
        assert!(state.is_dirty());
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Known(20.0)),
            Transition::Confirmed
        );
    }

    #[test]
    fn edit_on_placeholder_is_ignored() {
        let mut state = WidgetState::new();
        assert_eq!(Reconciler::apply_edit(&mut state, 1.0), None);
        assert!(!state.is_dirty());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn fractional_steps_confirm() {
        let mut state = clean_at(20.0);
        for _ in 0..3 {
            Reconciler::apply_edit(&mut state, 0.1);
        }
        assert_eq!(
            Reconciler::apply_snapshot(&mut state, Reported::Known(20.3)),
            Transition::Confirmed
        );
    }
}
