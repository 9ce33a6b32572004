// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The card's view of its target entity.

use crate::capabilities::SupportedModes;
use crate::types::{Domain, EntityId, Reported};

use super::EntityState;

/// Everything the card needs from the target entity in one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntity {
    /// The controllable domain.
    pub domain: Domain,
    /// The raw state record.
    pub state: EntityState,
    /// The host's target temperature.
    pub reported: Reported,
    /// The measured temperature, display only.
    pub current_measurement: Option<f64>,
    /// Mode categories the entity offers.
    pub supported_modes: SupportedModes,
    /// Entities on the same device, excluding this one.
    pub related: Vec<EntityId>,
}

impl TargetEntity {
    /// Builds the target view from a state record.
    #[must_use]
    pub fn from_state(domain: Domain, state: EntityState, related: Vec<EntityId>) -> Self {
        let reported = if state.is_unavailable() {
            Reported::Unavailable
        } else {
            state
                .attribute("temperature")
                .map_or(Reported::Unavailable, Reported::from_json)
        };
        let current_measurement = state.f64_attribute("current_temperature");
        let supported_modes = SupportedModes::from_state(domain, &state);

        Self {
            domain,
            state,
            reported,
            current_measurement,
            supported_modes,
            related,
        }
    }

    /// Returns the entity id.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.state.entity_id
    }

    /// Returns the operating state string.
    #[must_use]
    pub fn operating_state(&self) -> &str {
        &self.state.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target(state: EntityState) -> TargetEntity {
        TargetEntity::from_state(Domain::Climate, state, Vec::new())
    }

    fn office(state: &str) -> EntityState {
        EntityState::new("climate.office".parse().unwrap(), state)
    }

    #[test]
    fn reads_reported_and_measurement() {
        let t = target(
            office("heat")
                .with_attribute("temperature", 21.5)
                .with_attribute("current_temperature", 19.8),
        );
        assert_eq!(t.reported, Reported::Known(21.5));
        assert_eq!(t.current_measurement, Some(19.8));
        assert_eq!(t.operating_state(), "heat");
        assert_eq!(t.entity_id().as_str(), "climate.office");
    }

    #[test]
    fn missing_temperature_is_unavailable() {
        assert_eq!(target(office("heat")).reported, Reported::Unavailable);
        assert_eq!(
            target(office("heat").with_attribute("temperature", json!(null))).reported,
            Reported::Unavailable
        );
    }

    #[test]
    fn unavailable_entity_hides_stale_temperature() {
        let t = target(office("unavailable").with_attribute("temperature", 22));
        assert_eq!(t.reported, Reported::Unavailable);
    }
}
