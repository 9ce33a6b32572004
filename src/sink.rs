// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The boundary between the card and the host transport.
//!
//! The card never waits for a command's outcome. A [`CommandSink`] accepts a
//! [`ServiceCall`] and is responsible for delivering it; success or failure
//! only becomes visible through later snapshots. An `Err` from the sink means
//! the hand-off itself failed, and the card does not retry.
//!
//! # Examples
//!
//! ```
//! use thermostat_card::command::{Command, ToggleCommand};
//! use thermostat_card::sink::CommandSink;
//!
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! tx.issue_command(ToggleCommand::new("switch.fan".parse().unwrap()).to_service_call())
//!     .unwrap();
//!
//! assert_eq!(rx.try_recv().unwrap().service, "toggle");
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::command::{Command, ServiceCall, ToggleCommand};
use crate::error::TransportError;
use crate::types::EntityId;

/// Receives outbound commands.
///
/// Implementations must not block: the call happens on the host's thread or
/// on the card's timer task. No card lock is held during the call, so a sink
/// may read the card's state.
pub trait CommandSink: Send + Sync + 'static {
    /// Hands a service call to the host.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the call could not be handed off.
    fn issue_command(&self, call: ServiceCall) -> Result<(), TransportError>;

    /// Toggles an entity through the host's generic toggle service.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the call could not be handed off.
    fn toggle(&self, entity_id: &EntityId) -> Result<(), TransportError> {
        self.issue_command(ToggleCommand::new(entity_id.clone()).to_service_call())
    }
}

impl CommandSink for mpsc::UnboundedSender<ServiceCall> {
    fn issue_command(&self, call: ServiceCall) -> Result<(), TransportError> {
        tracing::debug!(call = %call, entity = ?call.entity_id(), "Handing off service call");
        self.send(call)
            .map_err(|e| TransportError::ChannelClosed(e.0.to_string()))
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Arc<S> {
    fn issue_command(&self, call: ServiceCall) -> Result<(), TransportError> {
        (**self).issue_command(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id: EntityId = "switch.ac_quiet".parse().unwrap();
        tx.toggle(&id).unwrap();

        let call = rx.try_recv().unwrap();
        assert_eq!(call.to_string(), "homeassistant.toggle");
        assert_eq!(call.entity_id(), Some("switch.ac_quiet"));
    }

    #[test]
    fn closed_channel_is_transport_error() {
        let (tx, rx) = mpsc::unbounded_channel::<ServiceCall>();
        drop(rx);
        let err = tx.toggle(&"switch.fan".parse().unwrap()).unwrap_err();
        assert!(matches!(err, TransportError::ChannelClosed(_)));
    }

    #[test]
    fn arc_sink_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shared = Arc::new(tx);
        shared.toggle(&"switch.fan".parse().unwrap()).unwrap();
        assert!(rx.try_recv().is_ok());
    }
}
