// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for card subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::card::CardStatus;
use crate::command::ServiceCall;
use crate::state::WidgetState;

/// Unique identifier for a subscription.
///
/// IDs are unique within a card's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type StateChangedCallback = Arc<dyn Fn(&WidgetState) + Send + Sync>;

type CommandIssuedCallback = Arc<dyn Fn(&ServiceCall) + Send + Sync>;

type StatusChangedCallback = Arc<dyn Fn(&CardStatus) + Send + Sync>;

/// Registry for card subscription callbacks.
///
/// Shared between the card and its debounce timer through an `Arc`, since
/// the timer may change state after the user's last interaction. Callbacks
/// are cloned out of the lock before being called, so a callback may
/// subscribe or unsubscribe without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    state_changed: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
    command_issued: RwLock<HashMap<SubscriptionId, CommandIssuedCallback>>,
    status_changed: RwLock<HashMap<SubscriptionId, StatusChangedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_changed: RwLock::new(HashMap::new()),
            command_issued: RwLock::new(HashMap::new()),
            status_changed: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for widget state changes.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WidgetState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every service call handed to the sink.
    pub fn on_command_issued<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ServiceCall) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.command_issued.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for card status changes.
    pub fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CardStatus) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.status_changed.write().insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state_changed.write().remove(&id).is_some()
            || self.command_issued.write().remove(&id).is_some()
            || self.status_changed.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.state_changed.write().clear();
        self.command_issued.write().clear();
        self.status_changed.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Notifies state subscribers.
    pub fn dispatch_state_changed(&self, state: &WidgetState) {
        let callbacks: Vec<_> = self.state_changed.read().values().cloned().collect();
        for callback in callbacks {
            callback(state);
        }
    }

    /// Notifies command subscribers.
    pub fn dispatch_command_issued(&self, call: &ServiceCall) {
        let callbacks: Vec<_> = self.command_issued.read().values().cloned().collect();
        for callback in callbacks {
            callback(call);
        }
    }

    /// Notifies status subscribers.
    pub fn dispatch_status_changed(&self, status: &CardStatus) {
        let callbacks: Vec<_> = self.status_changed.read().values().cloned().collect();
        for callback in callbacks {
            callback(status);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.state_changed.read().len()
            + self.command_issued.read().len()
            + self.status_changed.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
