// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Widget state and its reconciliation against host snapshots.
//!
//! [`WidgetState`] holds the displayed value and the dirty flag of one card.
//! [`Reconciler`] is the state machine that applies snapshots and local
//! edits to it, reporting each step as a [`Transition`].

mod reconciler;
mod widget_state;

pub use reconciler::{Reconciler, Transition};
pub use widget_state::WidgetState;
