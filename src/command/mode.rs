// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode selection commands.

use serde_json::Value;

use crate::types::{Domain, EntityId, ModeCategory};

use super::{Command, data_with_entity};

/// Service and data field used for a mode category in a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeVerb {
    /// The service name.
    pub service: &'static str,
    /// The data field carrying the value.
    pub field: &'static str,
}

impl ModeVerb {
    const fn new(service: &'static str, field: &'static str) -> Self {
        Self { service, field }
    }
}

/// Returns the verb for a category, or `None` if the domain has no such
/// command.
///
/// # Examples
///
/// ```
/// use thermostat_card::command::mode_verb;
/// use thermostat_card::types::{Domain, ModeCategory};
///
/// assert_eq!(mode_verb(Domain::Climate, ModeCategory::Primary).unwrap().service, "set_hvac_mode");
/// assert_eq!(mode_verb(Domain::WaterHeater, ModeCategory::Primary).unwrap().field, "operation_mode");
/// assert!(mode_verb(Domain::WaterHeater, ModeCategory::Fan).is_none());
/// ```
#[must_use]
pub const fn mode_verb(domain: Domain, category: ModeCategory) -> Option<ModeVerb> {
    match (domain, category) {
        (Domain::Climate, ModeCategory::Primary) => {
            Some(ModeVerb::new("set_hvac_mode", "hvac_mode"))
        }
        (Domain::Climate, ModeCategory::Preset) => {
            Some(ModeVerb::new("set_preset_mode", "preset_mode"))
        }
        (Domain::Climate, ModeCategory::Fan) => Some(ModeVerb::new("set_fan_mode", "fan_mode")),
        (Domain::Climate, ModeCategory::Swing) => {
            Some(ModeVerb::new("set_swing_mode", "swing_mode"))
        }
        (Domain::WaterHeater, ModeCategory::Primary) => {
            Some(ModeVerb::new("set_operation_mode", "operation_mode"))
        }
        (Domain::WaterHeater, ModeCategory::Away) => {
            Some(ModeVerb::new("set_away_mode", "away_mode"))
        }
        (Domain::Climate, ModeCategory::Away)
        | (
            Domain::WaterHeater,
            ModeCategory::Preset | ModeCategory::Fan | ModeCategory::Swing,
        ) => None,
    }
}

/// Selects a mode on an entity.
///
/// Built by the [`ModeDispatcher`](super::ModeDispatcher), which performs the
/// support and no-op checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeCommand {
    entity_id: EntityId,
    domain: Domain,
    category: ModeCategory,
    verb: ModeVerb,
    value: String,
}

impl ModeCommand {
    pub(crate) fn new(
        entity_id: EntityId,
        domain: Domain,
        category: ModeCategory,
        verb: ModeVerb,
        value: String,
    ) -> Self {
        Self {
            entity_id,
            domain,
            category,
            verb,
            value,
        }
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> ModeCategory {
        self.category
    }

    /// Returns the selected value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Command for ModeCommand {
    fn domain(&self) -> &'static str {
        self.domain.as_str()
    }

    fn service(&self) -> &'static str {
        self.verb.service
    }

    fn data(&self) -> Value {
        // away_mode is a boolean on the wire
        let value = match self.category {
            ModeCategory::Away => Value::Bool(self.value == "on"),
            _ => Value::String(self.value.clone()),
        };
        data_with_entity(self.entity_id.as_str(), self.verb.field, value)
    }
}
