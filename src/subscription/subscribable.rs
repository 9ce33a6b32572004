// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that emit card events.

use crate::card::CardStatus;
use crate::command::ServiceCall;
use crate::state::WidgetState;
use crate::subscription::SubscriptionId;

/// Trait for types that support event subscriptions.
///
/// Hosts typically subscribe to state changes to know when to re-render:
/// the debounce timer clears the dirty flag on its own schedule, after the
/// user's last interaction.
///
/// # Examples
///
/// ```
/// use thermostat_card::ThermostatCard;
/// use thermostat_card::subscription::Subscribable;
///
/// let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
/// let card = ThermostatCard::new(tx);
///
/// let id = card.on_state_changed(|state| {
///     println!("now showing {}", state.displayed());
/// });
/// assert!(card.unsubscribe(id));
/// ```
pub trait Subscribable {
    /// Subscribes to widget state changes (displayed value, dirty flag).
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WidgetState) + Send + Sync + 'static;

    /// Subscribes to outbound service calls.
    ///
    /// Called after each successful hand-off to the sink.
    fn on_command_issued<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ServiceCall) + Send + Sync + 'static;

    /// Subscribes to card status changes (configured, entity found or lost).
    fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CardStatus) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
