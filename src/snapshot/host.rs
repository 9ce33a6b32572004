// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The full host snapshot.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;
use crate::types::EntityId;

use super::{EntityState, RegistryEntry, TargetEntity};

/// Host-level configuration carried by the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// The unit system selected by the user.
    #[serde(default)]
    pub unit_system: UnitSystem,
}

/// Units used by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UnitSystem {
    /// Temperature unit, e.g. `°C`.
    #[serde(default)]
    pub temperature: Option<String>,
}

/// A complete, point-in-time copy of every entity known to the host.
///
/// Snapshots are passed by reference into the card on every update and are
/// never mutated by it. Entity order is the host's own iteration order; the
/// JSON form keys `states` and `entities` by entity id and that order is kept.
///
/// # Examples
///
/// ```
/// use thermostat_card::snapshot::{EntityState, Snapshot};
///
/// let id = "climate.office".parse().unwrap();
/// let snapshot = Snapshot::new()
///     .with_state(EntityState::new(id, "heat").with_attribute("temperature", 20.0));
///
/// let target = snapshot.read_target(&"climate.office".parse().unwrap()).unwrap();
/// assert_eq!(target.reported.value(), Some(20.0));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// Entity states, in host order.
    #[serde(default, deserialize_with = "ordered_values")]
    pub states: Vec<EntityState>,
    /// Registry entries, in host order.
    #[serde(default, deserialize_with = "ordered_values")]
    pub entities: Vec<RegistryEntry>,
    /// Host configuration.
    #[serde(default)]
    pub config: HostConfig,
    /// Language of the host UI.
    #[serde(default)]
    pub language: Option<String>,
    /// Language explicitly selected by the user, preferred over `language`.
    #[serde(default, rename = "selectedLanguage", alias = "selected_language")]
    pub selected_language: Option<String>,
    /// Translation tables keyed by language.
    #[serde(default)]
    pub resources: HashMap<String, HashMap<String, String>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from the host's JSON representation.
    ///
    /// Individual malformed entries are skipped rather than failing the
    /// whole snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the document itself is not valid.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Appends an entity state.
    #[must_use]
    pub fn with_state(mut self, state: EntityState) -> Self {
        self.states.push(state);
        self
    }

    /// Appends a registry entry.
    #[must_use]
    pub fn with_registry_entry(mut self, entry: RegistryEntry) -> Self {
        self.entities.push(entry);
        self
    }

    /// Sets the host temperature unit.
    #[must_use]
    pub fn with_temperature_unit(mut self, unit: impl Into<String>) -> Self {
        self.config.unit_system.temperature = Some(unit.into());
        self
    }

    /// Looks up an entity state.
    #[must_use]
    pub fn entity(&self, entity_id: &EntityId) -> Option<&EntityState> {
        self.states.iter().find(|s| &s.entity_id == entity_id)
    }

    /// Looks up a registry entry.
    #[must_use]
    pub fn registry_entry(&self, entity_id: &EntityId) -> Option<&RegistryEntry> {
        self.entities.iter().find(|e| &e.entity_id == entity_id)
    }

    /// Reads the card's target entity.
    ///
    /// Returns `None` when the entity is absent or not in a controllable
    /// domain; the caller must then render a fallback and skip
    /// reconciliation.
    #[must_use]
    pub fn read_target(&self, entity_id: &EntityId) -> Option<TargetEntity> {
        let state = self.entity(entity_id)?;
        let Some(domain) = entity_id.domain() else {
            tracing::debug!(entity = %entity_id, "Entity is not in a controllable domain");
            return None;
        };
        Some(TargetEntity::from_state(
            domain,
            state.clone(),
            self.related_entities(entity_id),
        ))
    }

    /// Returns the entities sharing a device with `entity_id`, excluding it.
    ///
    /// Order follows the registry order of this snapshot. An entity with no
    /// registry entry has no related entities.
    #[must_use]
    pub fn related_entities(&self, entity_id: &EntityId) -> Vec<EntityId> {
        let Some(own) = self.registry_entry(entity_id) else {
            tracing::debug!(entity = %entity_id, "No registry entry, skipping related entities");
            return Vec::new();
        };
        self.entities
            .iter()
            .filter(|entry| &entry.entity_id != entity_id && entry.shares_device_with(own))
            .map(|entry| entry.entity_id.clone())
            .collect()
    }

    /// Lists the entities a card can be configured for, sorted by friendly
    /// name.
    #[must_use]
    pub fn candidate_entities(&self) -> Vec<(EntityId, String)> {
        let mut candidates: Vec<(EntityId, String)> = self
            .states
            .iter()
            .filter(|s| s.entity_id.domain().is_some())
            .map(|s| {
                let name = s
                    .friendly_name()
                    .map_or_else(|| s.entity_id.to_string(), str::to_string);
                (s.entity_id.clone(), name)
            })
            .collect();
        candidates.sort_by(|a, b| a.1.cmp(&b.1));
        candidates
    }

    /// Returns the host temperature unit.
    #[must_use]
    pub fn temperature_unit(&self) -> Option<&str> {
        self.config.unit_system.temperature.as_deref()
    }

    /// Returns the translation table for the active language.
    #[must_use]
    pub fn translations(&self) -> Option<&HashMap<String, String>> {
        let lang = self
            .selected_language
            .as_deref()
            .filter(|l| !l.is_empty())
            .or(self.language.as_deref())?;
        self.resources.get(lang)
    }
}

/// Deserializes a JSON object keyed by entity id into its values, in
/// document order.
///
/// Entries that fail to parse are logged and dropped. Values missing an
/// `entity_id` field get it from their key.
fn ordered_values<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    struct OrderedValues<T>(PhantomData<T>);

    impl<'de, T: DeserializeOwned> Visitor<'de> for OrderedValues<T> {
        type Value = Vec<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by entity id")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, mut value)) = map.next_entry::<String, Value>()? {
                if let Value::Object(object) = &mut value {
                    object
                        .entry("entity_id")
                        .or_insert_with(|| Value::String(key.clone()));
                }
                match serde_json::from_value(value) {
                    Ok(parsed) => values.push(parsed),
                    Err(e) => {
                        tracing::debug!(entity = %key, error = %e, "Skipping malformed snapshot entry");
                    }
                }
            }
            Ok(values)
        }
    }

    deserializer.deserialize_map(OrderedValues(PhantomData))
}
