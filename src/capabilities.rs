// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode support detection.
//!
//! Which mode rows an entity offers is derived from two sources: the
//! `supported_features` bitmask and the presence of the matching value-list
//! attribute. Both must agree for an optional category to be offered. The
//! primary category only needs its value list.

use crate::snapshot::EntityState;
use crate::types::{Domain, ModeCategory};

/// `supported_features` bits of climate entities.
pub mod climate_feature {
    /// Fan modes are available.
    pub const FAN_MODE: u32 = 8;
    /// Preset modes are available.
    pub const PRESET_MODE: u32 = 16;
    /// Swing modes are available.
    pub const SWING_MODE: u32 = 32;
}

/// `supported_features` bits of water heater entities.
pub mod water_heater_feature {
    /// Operation modes are available.
    pub const OPERATION_MODE: u32 = 2;
    /// Away mode is available.
    pub const AWAY_MODE: u32 = 4;
}

/// Values a water heater's away mode can take.
const AWAY_VALUES: [&str; 2] = ["on", "off"];

/// The allowed values of one mode category and the currently active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSet {
    /// Allowed values, in host order.
    pub values: Vec<String>,
    /// The value the host currently reports, if any.
    pub current: Option<String>,
}

impl ModeSet {
    /// Creates a mode set.
    #[must_use]
    pub fn new(values: Vec<String>, current: Option<String>) -> Self {
        Self { values, current }
    }

    /// Returns `true` if `value` is one of the allowed values.
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Returns `true` if `value` is the active one.
    #[must_use]
    pub fn is_current(&self, value: &str) -> bool {
        self.current.as_deref() == Some(value)
    }
}

/// Mode categories offered by an entity.
///
/// Each field is independently optional.
///
/// # Examples
///
/// ```
/// use thermostat_card::capabilities::SupportedModes;
/// use thermostat_card::snapshot::EntityState;
/// use thermostat_card::types::{Domain, ModeCategory};
///
/// let state = EntityState::new("climate.ac".parse().unwrap(), "cool")
///     .with_attribute("hvac_modes", serde_json::json!(["off", "cool"]))
///     .with_attribute("fan_modes", serde_json::json!(["low", "high"]))
///     .with_attribute("fan_mode", "low")
///     .with_attribute("supported_features", 8);
///
/// let modes = SupportedModes::from_state(Domain::Climate, &state);
/// assert!(modes.get(ModeCategory::Primary).unwrap().is_current("cool"));
/// assert!(modes.get(ModeCategory::Fan).unwrap().is_current("low"));
/// assert!(modes.get(ModeCategory::Preset).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedModes {
    /// HVAC modes or water heater operation modes.
    pub primary: Option<ModeSet>,
    /// Preset modes.
    pub preset: Option<ModeSet>,
    /// Fan modes.
    pub fan: Option<ModeSet>,
    /// Swing modes.
    pub swing: Option<ModeSet>,
    /// Away mode.
    pub away: Option<ModeSet>,
}

impl SupportedModes {
    /// Detects the supported modes of an entity.
    #[must_use]
    pub fn from_state(domain: Domain, state: &EntityState) -> Self {
        match domain {
            Domain::Climate => Self {
                primary: listed(state, "hvac_modes", Some(state.state.clone())),
                preset: gated(state, climate_feature::PRESET_MODE, "preset_modes", "preset_mode"),
                fan: gated(state, climate_feature::FAN_MODE, "fan_modes", "fan_mode"),
                swing: gated(state, climate_feature::SWING_MODE, "swing_modes", "swing_mode"),
                away: None,
            },
            Domain::WaterHeater => {
                let current = state
                    .str_attribute("operation_mode")
                    .map_or_else(|| state.state.clone(), str::to_string);
                Self {
                    primary: listed(state, "operation_list", Some(current)),
                    preset: None,
                    fan: None,
                    swing: None,
                    away: state
                        .supports_feature(water_heater_feature::AWAY_MODE)
                        .then(|| {
                            ModeSet::new(
                                AWAY_VALUES.iter().map(|v| (*v).to_string()).collect(),
                                state.str_attribute("away_mode").map(str::to_string),
                            )
                        }),
                }
            }
        }
    }

    /// Returns the mode set of a category.
    #[must_use]
    pub fn get(&self, category: ModeCategory) -> Option<&ModeSet> {
        match category {
            ModeCategory::Primary => self.primary.as_ref(),
            ModeCategory::Preset => self.preset.as_ref(),
            ModeCategory::Fan => self.fan.as_ref(),
            ModeCategory::Swing => self.swing.as_ref(),
            ModeCategory::Away => self.away.as_ref(),
        }
    }

    /// Returns `true` if the category is offered.
    #[must_use]
    pub fn supports(&self, category: ModeCategory) -> bool {
        self.get(category).is_some()
    }
}

fn listed(state: &EntityState, list: &str, current: Option<String>) -> Option<ModeSet> {
    state
        .list_attribute(list)
        .map(|values| ModeSet::new(values, current))
}

fn gated(state: &EntityState, feature: u32, list: &str, current: &str) -> Option<ModeSet> {
    if !state.supports_feature(feature) {
        return None;
    }
    listed(state, list, state.str_attribute(current).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn climate(features: u32) -> EntityState {
        EntityState::new("climate.ac".parse().unwrap(), "heat")
            .with_attribute("supported_features", features)
            .with_attribute("hvac_modes", json!(["off", "heat", "cool"]))
            .with_attribute("preset_modes", json!(["eco", "comfort"]))
            .with_attribute("preset_mode", "eco")
            .with_attribute("swing_modes", json!(["off", "vertical"]))
            .with_attribute("swing_mode", "off")
    }

    #[test]
    fn climate_primary_tracks_state() {
        let modes = SupportedModes::from_state(Domain::Climate, &climate(0));
        let primary = modes.primary.unwrap();
        assert_eq!(primary.values, ["off", "heat", "cool"]);
        assert!(primary.is_current("heat"));
    }

    #[test]
    fn optional_categories_need_feature_bit() {
        let modes = SupportedModes::from_state(Domain::Climate, &climate(0));
        assert!(!modes.supports(ModeCategory::Preset));
        assert!(!modes.supports(ModeCategory::Swing));

        let features = climate_feature::PRESET_MODE | climate_feature::SWING_MODE;
        let modes = SupportedModes::from_state(Domain::Climate, &climate(features));
        assert!(modes.get(ModeCategory::Preset).unwrap().is_current("eco"));
        assert!(modes.supports(ModeCategory::Swing));
    }

    #[test]
    fn optional_categories_need_value_list() {
        // fan bit set but no fan_modes attribute
        let modes = SupportedModes::from_state(Domain::Climate, &climate(climate_feature::FAN_MODE));
        assert!(!modes.supports(ModeCategory::Fan));
    }

    #[test]
    fn climate_never_offers_away() {
        let modes = SupportedModes::from_state(Domain::Climate, &climate(u32::MAX));
        assert!(!modes.supports(ModeCategory::Away));
    }

    #[test]
    fn water_heater_modes() {
        let state = EntityState::new("water_heater.boiler".parse().unwrap(), "eco")
            .with_attribute(
                "supported_features",
                water_heater_feature::OPERATION_MODE | water_heater_feature::AWAY_MODE,
            )
            .with_attribute("operation_list", json!(["eco", "electric", "off"]))
            .with_attribute("operation_mode", "electric")
            .with_attribute("away_mode", "off");

        let modes = SupportedModes::from_state(Domain::WaterHeater, &state);
        assert!(modes.get(ModeCategory::Primary).unwrap().is_current("electric"));
        let away = modes.get(ModeCategory::Away).unwrap();
        assert!(away.allows("on"));
        assert!(away.is_current("off"));
        assert!(!modes.supports(ModeCategory::Fan));
    }
}
