// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controllable entity domains.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A domain whose entities the card knows how to control.
///
/// Every per-domain decision in the crate is an exhaustive `match` on this
/// enum, so adding a domain forces each verb table to be revisited.
///
/// # Examples
///
/// ```
/// use thermostat_card::types::Domain;
///
/// let domain: Domain = "water_heater".parse().unwrap();
/// assert_eq!(domain, Domain::WaterHeater);
/// assert_eq!(domain.as_str(), "water_heater");
/// assert!("light".parse::<Domain>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Thermostats and air conditioners.
    Climate,
    /// Boilers and water heaters.
    WaterHeater,
}

impl Domain {
    /// All supported domains.
    pub const ALL: [Self; 2] = [Self::Climate, Self::WaterHeater];

    /// Returns the host's domain string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::WaterHeater => "water_heater",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "climate" => Ok(Self::Climate),
            "water_heater" => Ok(Self::WaterHeater),
            other => Err(ConfigError::UnsupportedDomain {
                domain: other.to_string(),
            }),
        }
    }
}
