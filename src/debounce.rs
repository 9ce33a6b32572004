// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coalescing of rapid temperature edits.
//!
//! Every tap on the step buttons re-arms a single timer. Only when the user
//! has been idle for the quiet period is one command, carrying the latest
//! value, handed to the sink. Arming always cancels the previous timer, so at
//! most one temperature command is ever pending.
//!
//! After a successful hand-off the dirty flag is cleared, unless a newer edit
//! happened meanwhile or a confirming snapshot already cleared it. The
//! generation stored in [`WidgetState`] tells the two paths apart. The state
//! lock is never held across the call into the sink.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::command::ServiceCall;
use crate::sink::CommandSink;
use crate::state::WidgetState;
use crate::subscription::CallbackRegistry;
use crate::types::CardId;

/// Idle time after the last edit before the command is sent.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Single-slot debounce timer for outbound temperature commands.
///
/// The armed timer is a spawned Tokio task. Dropping the debouncer aborts
/// it.
pub struct Debouncer<S: CommandSink> {
    card: CardId,
    quiet: Duration,
    state: Arc<Mutex<WidgetState>>,
    sink: Arc<S>,
    callbacks: Arc<CallbackRegistry>,
    timer: Option<JoinHandle<()>>,
}

impl<S: CommandSink> Debouncer<S> {
    /// Creates an idle debouncer sharing the card's state, sink and
    /// subscriptions.
    #[must_use]
    pub fn new(
        card: CardId,
        quiet: Duration,
        state: Arc<Mutex<WidgetState>>,
        sink: Arc<S>,
        callbacks: Arc<CallbackRegistry>,
    ) -> Self {
        Self {
            card,
            quiet,
            state,
            sink,
            callbacks,
            timer: None,
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Records `value` as pending and (re)arms the timer for `call`.
    ///
    /// Any previously armed timer is cancelled; its command is never sent.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn request(&mut self, call: ServiceCall, value: f64) {
        self.abort_timer();

        let generation = {
            let mut state = self.state.lock();
            state.pending_command_value = Some(value);
            state.generation
        };

        tracing::debug!(
            card = %self.card,
            value,
            generation,
            quiet_ms = u64::try_from(self.quiet.as_millis()).unwrap_or(u64::MAX),
            "Debounce timer armed"
        );

        let card = self.card;
        let quiet = self.quiet;
        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);
        let callbacks = Arc::clone(&self.callbacks);

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            fire(card, &state, sink.as_ref(), &callbacks, call, generation);
        }));
    }

    /// Cancels the armed timer, if any, and forgets the pending value.
    ///
    /// Returns `true` if a timer was still waiting.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.abort_timer();
        self.state.lock().pending_command_value = None;
        if was_armed {
            tracing::debug!(card = %self.card, "Debounce timer cancelled");
        }
        was_armed
    }

    /// Returns `true` while a timer is waiting to fire.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<S: CommandSink> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.abort_timer();
    }
}

impl<S: CommandSink> std::fmt::Debug for Debouncer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("card", &self.card)
            .field("quiet", &self.quiet)
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}

/// Runs when the quiet period elapses.
///
/// The sink is called without holding the state lock, so it may read the
/// card. Whether dirty is cleared is decided afterwards against the
/// generation: an edit that slipped in during the hand-off keeps it set.
fn fire<S: CommandSink>(
    card: CardId,
    state: &Mutex<WidgetState>,
    sink: &S,
    callbacks: &CallbackRegistry,
    call: ServiceCall,
    generation: u64,
) {
    {
        let mut guard = state.lock();
        if guard.generation != generation {
            // superseded; the newer request owns the slot
            return;
        }
        guard.pending_command_value = None;
    }

    if let Err(e) = sink.issue_command(call.clone()) {
        tracing::warn!(card = %card, call = %call, error = %e, "Failed to hand off command");
        return;
    }

    let settled = {
        let mut guard = state.lock();
        guard.settle(generation).then(|| guard.clone())
    };

    tracing::debug!(card = %card, call = %call, settled = settled.is_some(), "Debounced command sent");
    callbacks.dispatch_command_issued(&call);
    if let Some(state) = settled {
        callbacks.dispatch_state_changed(&state);
    }
}
