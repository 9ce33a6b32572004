// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The outbound request handed to the host.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request to change entity state, in the host's `domain.service` form.
///
/// `data` always contains `entity_id` plus the verb-specific field.
///
/// # Examples
///
/// ```
/// use thermostat_card::command::ServiceCall;
///
/// let call = ServiceCall::new(
///     "climate",
///     "set_hvac_mode",
///     serde_json::json!({"entity_id": "climate.office", "hvac_mode": "heat"}),
/// );
/// assert_eq!(call.to_string(), "climate.set_hvac_mode");
/// assert_eq!(call.entity_id(), Some("climate.office"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    /// Service domain, e.g. `climate`.
    pub domain: String,
    /// Service name, e.g. `set_temperature`.
    pub service: String,
    /// Service data.
    pub data: Value,
}

impl ServiceCall {
    /// Creates a service call.
    #[must_use]
    pub fn new(domain: impl Into<String>, service: impl Into<String>, data: Value) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            data,
        }
    }

    /// Returns the `entity_id` field of the data.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.field("entity_id").and_then(Value::as_str)
    }

    /// Returns a data field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

impl fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.service)
    }
}

/// Builds the data object for a service call.
pub(crate) fn data_with_entity(entity_id: &str, field: &str, value: Value) -> Value {
    let mut data = Map::new();
    data.insert("entity_id".to_string(), Value::String(entity_id.to_string()));
    data.insert(field.to_string(), value);
    Value::Object(data)
}
