// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode selection dispatch.

use crate::error::ModeError;
use crate::snapshot::TargetEntity;
use crate::types::ModeCategory;

use super::{ModeCommand, mode_verb};

/// Turns a user's mode selection into at most one command.
///
/// Mode changes are discrete, so nothing is debounced: each distinct
/// selection yields its own command immediately. Selecting the value the
/// host already reports yields nothing.
///
/// # Examples
///
/// ```
/// use thermostat_card::command::{Command, ModeDispatcher};
/// use thermostat_card::snapshot::{EntityState, TargetEntity};
/// use thermostat_card::types::{Domain, ModeCategory};
///
/// let state = EntityState::new("climate.office".parse().unwrap(), "heat")
///     .with_attribute("hvac_modes", serde_json::json!(["off", "heat"]));
/// let target = TargetEntity::from_state(Domain::Climate, state, Vec::new());
///
/// // already selected: no command
/// assert!(ModeDispatcher::build(&target, ModeCategory::Primary, "heat").unwrap().is_none());
///
/// let cmd = ModeDispatcher::build(&target, ModeCategory::Primary, "off").unwrap().unwrap();
/// assert_eq!(cmd.service(), "set_hvac_mode");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeDispatcher;

impl ModeDispatcher {
    /// Builds the command for a selection.
    ///
    /// Returns `Ok(None)` when `value` is already the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::UnsupportedCategory`] if the domain has no
    /// command for `category`, [`ModeError::NotSupportedByEntity`] if the
    /// entity does not offer it, and [`ModeError::ValueNotAllowed`] if
    /// `value` is not in the entity's list.
    pub fn build(
        target: &TargetEntity,
        category: ModeCategory,
        value: &str,
    ) -> Result<Option<ModeCommand>, ModeError> {
        let verb =
            mode_verb(target.domain, category).ok_or(ModeError::UnsupportedCategory {
                category: category.label(),
                domain: target.domain.as_str(),
            })?;

        let modes = target
            .supported_modes
            .get(category)
            .ok_or(ModeError::NotSupportedByEntity(category.label()))?;

        if !modes.allows(value) {
            return Err(ModeError::ValueNotAllowed {
                category: category.label(),
                value: value.to_string(),
            });
        }

        if modes.is_current(value) {
            tracing::debug!(
                entity = %target.entity_id(),
                %category,
                value,
                "Mode already active, not sending"
            );
            return Ok(None);
        }

        Ok(Some(ModeCommand::new(
            target.entity_id().clone(),
            target.domain,
            category,
            verb,
            value.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{climate_feature, water_heater_feature};
    use crate::command::Command;
    use crate::snapshot::EntityState;
    use crate::types::Domain;
    use serde_json::json;

    fn ac() -> TargetEntity {
        let state = EntityState::new("climate.ac".parse().unwrap(), "cool")
            .with_attribute(
                "supported_features",
                climate_feature::PRESET_MODE | climate_feature::FAN_MODE,
            )
            .with_attribute("hvac_modes", json!(["off", "cool", "heat"]))
            .with_attribute("preset_modes", json!(["none", "eco"]))
            .with_attribute("preset_mode", "none")
            .with_attribute("fan_modes", json!(["auto", "low"]))
            .with_attribute("fan_mode", "auto");
        TargetEntity::from_state(Domain::Climate, state, Vec::new())
    }

    fn boiler() -> TargetEntity {
        let state = EntityState::new("water_heater.boiler".parse().unwrap(), "eco")
            .with_attribute(
                "supported_features",
                water_heater_feature::OPERATION_MODE | water_heater_feature::AWAY_MODE,
            )
            .with_attribute("operation_list", json!(["eco", "performance"]))
            .with_attribute("operation_mode", "eco")
            .with_attribute("away_mode", "off");
        TargetEntity::from_state(Domain::WaterHeater, state, Vec::new())
    }

    #[test]
    fn selecting_current_mode_is_noop() {
        for (category, value) in [
            (ModeCategory::Primary, "cool"),
            (ModeCategory::Preset, "none"),
            (ModeCategory::Fan, "auto"),
        ] {
            assert_eq!(ModeDispatcher::build(&ac(), category, value), Ok(None));
        }
        assert_eq!(
            ModeDispatcher::build(&boiler(), ModeCategory::Away, "off"),
            Ok(None)
        );
    }

    #[test]
    fn climate_verbs() {
        let cmd = ModeDispatcher::build(&ac(), ModeCategory::Primary, "heat")
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd.to_service_call().data,
            json!({"entity_id": "climate.ac", "hvac_mode": "heat"})
        );

        let cmd = ModeDispatcher::build(&ac(), ModeCategory::Preset, "eco")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.service(), "set_preset_mode");
    }

    #[test]
    fn water_heater_verbs() {
        let cmd = ModeDispatcher::build(&boiler(), ModeCategory::Primary, "performance")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.domain(), "water_heater");
        assert_eq!(cmd.service(), "set_operation_mode");

        let cmd = ModeDispatcher::build(&boiler(), ModeCategory::Away, "on")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.data()["away_mode"], json!(true));
    }

    #[test]
    fn category_without_domain_verb() {
        assert_eq!(
            ModeDispatcher::build(&boiler(), ModeCategory::Swing, "off"),
            Err(ModeError::UnsupportedCategory {
                category: "swing mode",
                domain: "water_heater",
            })
        );
    }

    #[test]
    fn category_not_offered_by_entity() {
        assert_eq!(
            ModeDispatcher::build(&ac(), ModeCategory::Swing, "off"),
            Err(ModeError::NotSupportedByEntity("swing mode"))
        );
    }

    #[test]
    fn value_outside_allowed_list() {
        assert_eq!(
            ModeDispatcher::build(&ac(), ModeCategory::Primary, "dry"),
            Err(ModeError::ValueNotAllowed {
                category: "operating mode",
                value: "dry".to_string(),
            })
        );
    }
}
