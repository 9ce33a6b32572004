// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound command definitions.
//!
//! Every user action ends up as a [`ServiceCall`] handed to the
//! [`CommandSink`](crate::sink::CommandSink).
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`SetTemperatureCommand`] | Change the target temperature | `climate.set_temperature` |
//! | [`ModeCommand`] | Select an hvac/operation/preset/fan/swing/away mode | `climate.set_hvac_mode` |
//! | [`ToggleCommand`] | Flip a related switch | `homeassistant.toggle` |
//!
//! Mode verbs depend on the entity domain; see [`mode_verb`].
//!
//! # Examples
//!
//! ```
//! use thermostat_card::command::{Command, SetTemperatureCommand};
//!
//! let cmd = SetTemperatureCommand::new("climate.office".parse().unwrap(), 21.0).unwrap();
//! let call = cmd.to_service_call();
//!
//! assert_eq!(call.domain, "climate");
//! assert_eq!(call.service, "set_temperature");
//! assert_eq!(call.entity_id(), Some("climate.office"));
//! ```

mod dispatcher;
mod mode;
mod service_call;
mod temperature;
mod toggle;

pub use dispatcher::ModeDispatcher;
pub use mode::{ModeCommand, ModeVerb, mode_verb};
pub use service_call::ServiceCall;
pub(crate) use service_call::data_with_entity;
pub use temperature::SetTemperatureCommand;
pub use toggle::ToggleCommand;

use serde_json::Value;

/// A command that can be sent to the host.
pub trait Command {
    /// Returns the service domain.
    fn domain(&self) -> &'static str;

    /// Returns the service name.
    fn service(&self) -> &'static str;

    /// Returns the service data, always including `entity_id`.
    fn data(&self) -> Value;

    /// Packs the command into a [`ServiceCall`].
    fn to_service_call(&self) -> ServiceCall {
        ServiceCall::new(self.domain(), self.service(), self.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_call_round_trips_through_json() {
        let call = ToggleCommand::new("switch.fan".parse().unwrap()).to_service_call();
        let json = serde_json::to_string(&call).unwrap();
        let back: ServiceCall = serde_json::from_str(&json).unwrap();
        assert_eq!(back, call);
    }
}
