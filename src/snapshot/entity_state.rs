// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-entity state records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::EntityId;

/// State strings the host uses for entities it cannot reach.
const UNAVAILABLE_STATES: [&str; 2] = ["unavailable", "unknown"];

/// One entity's state as reported by the host.
///
/// Attributes are kept as raw JSON; the typed accessors below read the few
/// the card cares about.
///
/// # Examples
///
/// ```
/// use thermostat_card::snapshot::EntityState;
///
/// let state = EntityState::new("climate.office".parse().unwrap(), "heat")
///     .with_attribute("temperature", 21.0)
///     .with_attribute("friendly_name", "Office");
///
/// assert_eq!(state.friendly_name(), Some("Office"));
/// assert_eq!(state.f64_attribute("temperature"), Some(21.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// The entity id.
    pub entity_id: EntityId,
    /// The state string (`heat`, `off`, `on`, `unavailable`, ...).
    pub state: String,
    /// Raw attributes.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// When the state string last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,
    /// When the state or any attribute last changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
    /// Creates a state record with no attributes.
    #[must_use]
    pub fn new(entity_id: EntityId, state: impl Into<String>) -> Self {
        Self {
            entity_id,
            state: state.into(),
            attributes: Map::new(),
            last_changed: None,
            last_updated: None,
        }
    }

    /// Adds or replaces an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the last-updated timestamp.
    #[must_use]
    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    /// Returns a raw attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns a string attribute.
    #[must_use]
    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_str)
    }

    /// Returns a numeric attribute.
    #[must_use]
    pub fn f64_attribute(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(Value::as_f64)
    }

    /// Returns a list-of-strings attribute, skipping non-string items.
    #[must_use]
    pub fn list_attribute(&self, name: &str) -> Option<Vec<String>> {
        self.attribute(name).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    /// Returns the `friendly_name` attribute.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.str_attribute("friendly_name")
    }

    /// Returns the `supported_features` bitmask, `0` when absent.
    #[must_use]
    pub fn supported_features(&self) -> u32 {
        self.attribute("supported_features")
            .and_then(Value::as_u64)
            .and_then(|bits| u32::try_from(bits).ok())
            .unwrap_or(0)
    }

    /// Returns `true` when every bit of `feature` is set.
    #[must_use]
    pub fn supports_feature(&self, feature: u32) -> bool {
        self.supported_features() & feature == feature
    }

    /// Returns `true` when the host cannot reach the entity.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        UNAVAILABLE_STATES.contains(&self.state.as_str())
    }
}
