// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature command.

use serde_json::Value;

use crate::types::{Domain, EntityId};

use super::{Command, data_with_entity};

/// Sets the target temperature of a climate or water heater entity.
///
/// The service lives in the entity's own domain.
///
/// # Examples
///
/// ```
/// use thermostat_card::command::{Command, SetTemperatureCommand};
///
/// let cmd = SetTemperatureCommand::new("water_heater.boiler".parse().unwrap(), 55.0).unwrap();
/// assert_eq!(cmd.domain(), "water_heater");
/// assert_eq!(cmd.service(), "set_temperature");
/// assert_eq!(cmd.data()["temperature"], 55.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SetTemperatureCommand {
    entity_id: EntityId,
    domain: Domain,
    temperature: f64,
}

impl SetTemperatureCommand {
    /// Creates the command, or `None` if the entity is not controllable.
    #[must_use]
    pub fn new(entity_id: EntityId, temperature: f64) -> Option<Self> {
        let domain = entity_id.domain()?;
        Some(Self {
            entity_id,
            domain,
            temperature,
        })
    }

    /// Returns the requested temperature.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Command for SetTemperatureCommand {
    fn domain(&self) -> &'static str {
        self.domain.as_str()
    }

    fn service(&self) -> &'static str {
        "set_temperature"
    }

    fn data(&self) -> Value {
        data_with_entity(
            self.entity_id.as_str(),
            "temperature",
            Value::from(self.temperature),
        )
    }
}
