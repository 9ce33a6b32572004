// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Card configuration.
//!
//! The host hands the card a JSON object written by the user or by the
//! visual editor. Everything except `entity` is optional.
//!
//! ```json
//! {
//!   "entity": "climate.living_room",
//!   "layout": "col",
//!   "step_size": 0.5,
//!   "temp_unit": false,
//!   "show_related_entities": true
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{ConfigError, ParseError};
use crate::types::{Domain, EntityId, ModeCategory};

/// Placement of the step buttons around the displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Layout {
    /// Plus and minus buttons left and right of the value.
    #[default]
    Row,
    /// Up and down chevrons above and below the value.
    Col,
}

impl Layout {
    /// Returns the configuration keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Col => "col",
        }
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "col" => Ok(Self::Col),
            other => Err(ConfigError::InvalidOption {
                option: "layout",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Layout {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How mode rows are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DisplayMode {
    /// One icon button per value.
    #[default]
    Buttons,
    /// A single drop-down list per category.
    Dropdown,
}

impl DisplayMode {
    /// Returns the configuration keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buttons => "buttons",
            Self::Dropdown => "dropdown",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buttons" => Ok(Self::Buttons),
            "dropdown" => Ok(Self::Dropdown),
            other => Err(ConfigError::InvalidOption {
                option: "display_mode",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for DisplayMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The `temp_unit` option.
///
/// In JSON the option is either absent (use the host's unit), `false`
/// (hide the unit) or a string (show that string instead).
///
/// # Examples
///
/// ```
/// use thermostat_card::config::TempUnit;
///
/// assert_eq!(TempUnit::Default.resolve(Some("°C")), Some("°C"));
/// assert_eq!(TempUnit::Hidden.resolve(Some("°C")), None);
/// assert_eq!(TempUnit::Custom("K".into()).resolve(Some("°C")), Some("K"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTempUnit", into = "RawTempUnit")]
pub enum TempUnit {
    /// Follow the host's unit system.
    #[default]
    Default,
    /// Show no unit.
    Hidden,
    /// Show a fixed string.
    Custom(String),
}

impl TempUnit {
    /// Returns the editor mode keyword: `default`, `hidden` or `custom`.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hidden => "hidden",
            Self::Custom(_) => "custom",
        }
    }

    /// Returns `true` for [`TempUnit::Default`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns the unit to display given the host's unit, or `None` when no
    /// unit should be shown.
    #[must_use]
    pub fn resolve<'a>(&'a self, host_unit: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::Default => host_unit,
            Self::Hidden => None,
            Self::Custom(unit) => Some(unit.as_str()),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTempUnit {
    Flag(bool),
    Text(String),
}

impl From<RawTempUnit> for TempUnit {
    fn from(raw: RawTempUnit) -> Self {
        match raw {
            RawTempUnit::Flag(false) => Self::Hidden,
            // `true` carries no unit; the host's one is used
            RawTempUnit::Flag(true) => Self::Default,
            RawTempUnit::Text(text) if text.is_empty() => Self::Default,
            RawTempUnit::Text(text) => Self::Custom(text),
        }
    }
}

impl From<TempUnit> for RawTempUnit {
    fn from(unit: TempUnit) -> Self {
        match unit {
            TempUnit::Default => Self::Flag(true),
            TempUnit::Hidden => Self::Flag(false),
            TempUnit::Custom(text) => Self::Text(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => Ok(n),
        RawNumber::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got \"{text}\""))),
    }
}

/// User configuration of one card.
///
/// Deserialization is lenient about missing fields; call
/// [`CardConfig::validate`] (or let
/// [`ThermostatCard::set_config`](crate::ThermostatCard::set_config) do it)
/// before use.
///
/// # Examples
///
/// ```
/// use thermostat_card::config::{CardConfig, Layout};
///
/// let config = CardConfig::from_json(r#"{"entity": "climate.office", "layout": "col"}"#).unwrap();
/// assert_eq!(config.layout, Layout::Col);
/// assert_eq!(config.step_size, 1.0);
/// assert!(config.show_name);
/// assert!(config.validate().is_ok());
///
/// let config = CardConfig::new("climate.office").with_step_size(0.5);
/// assert_eq!(config.step_size, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Target entity id. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Title override; the entity's friendly name is used otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Step button layout.
    pub layout: Layout,
    /// Mode row presentation.
    pub display_mode: DisplayMode,
    /// Unit shown next to temperatures.
    #[serde(skip_serializing_if = "TempUnit::is_default")]
    pub temp_unit: TempUnit,
    /// Amount added or subtracted by one tap.
    ///
    /// Accepts a number or a numeric string such as `"0.5"`.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub step_size: f64,
    /// Show the title.
    pub show_name: bool,
    /// Show headings next to the sensor values.
    pub show_sensor_labels: bool,
    /// Show the primary (hvac / operation) mode row.
    #[serde(alias = "show_hvac_modes")]
    pub show_modes: bool,
    /// Show the preset mode row.
    pub show_preset_modes: bool,
    /// Show the fan mode row.
    pub show_fan_modes: bool,
    /// Show the swing mode row.
    pub show_swing_modes: bool,
    /// Show the away mode row.
    pub show_away_mode: bool,
    /// Show toggles for entities of the same device.
    pub show_related_entities: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: None,
            name: None,
            layout: Layout::default(),
            display_mode: DisplayMode::default(),
            temp_unit: TempUnit::default(),
            step_size: 1.0,
            show_name: true,
            show_sensor_labels: true,
            show_modes: true,
            show_preset_modes: false,
            show_fan_modes: false,
            show_swing_modes: false,
            show_away_mode: false,
            show_related_entities: false,
        }
    }
}

impl CardConfig {
    /// Creates a configuration for `entity` with default options.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Self::default()
        }
    }

    /// Parses a configuration from the host's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the JSON is malformed or an option has the
    /// wrong type or an unknown keyword. Semantic checks are left to
    /// [`CardConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the step size.
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Sets the temperature unit option.
    #[must_use]
    pub fn with_temp_unit(mut self, temp_unit: TempUnit) -> Self {
        self.temp_unit = temp_unit;
        self
    }

    /// Shows or hides the row of a mode category.
    #[must_use]
    pub fn with_mode_row(mut self, category: ModeCategory, shown: bool) -> Self {
        *self.mode_row_flag(category) = shown;
        self
    }

    /// Shows or hides the related entity toggles.
    #[must_use]
    pub fn with_related_entities(mut self, shown: bool) -> Self {
        self.show_related_entities = shown;
        self
    }

    /// Returns `true` if the row of `category` should be rendered.
    #[must_use]
    pub fn shows_mode_row(&self, category: ModeCategory) -> bool {
        match category {
            ModeCategory::Primary => self.show_modes,
            ModeCategory::Preset => self.show_preset_modes,
            ModeCategory::Fan => self.show_fan_modes,
            ModeCategory::Swing => self.show_swing_modes,
            ModeCategory::Away => self.show_away_mode,
        }
    }

    fn mode_row_flag(&mut self, category: ModeCategory) -> &mut bool {
        match category {
            ModeCategory::Primary => &mut self.show_modes,
            ModeCategory::Preset => &mut self.show_preset_modes,
            ModeCategory::Fan => &mut self.show_fan_modes,
            ModeCategory::Swing => &mut self.show_swing_modes,
            ModeCategory::Away => &mut self.show_away_mode,
        }
    }

    /// Checks the configuration and returns the target entity id.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingEntity`] if `entity` is absent or empty
    /// - [`ConfigError::InvalidEntityId`] if it is not `<domain>.<object_id>`
    /// - [`ConfigError::UnsupportedDomain`] if the domain is neither
    ///   `climate` nor `water_heater`
    /// - [`ConfigError::InvalidStepSize`] if `step_size` is not a finite
    ///   positive number
    pub fn validate(&self) -> Result<EntityId, ConfigError> {
        let raw = self
            .entity
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEntity)?;

        let entity_id = EntityId::new(raw)?;
        let _: Domain = entity_id.domain_str().parse()?;

        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(ConfigError::InvalidStepSize(self.step_size.to_string()));
        }

        Ok(entity_id)
    }

    /// Returns the card height in dashboard rows.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        match (self.layout, self.show_related_entities) {
            (Layout::Row, false) => 2,
            (Layout::Row, true) | (Layout::Col, false) => 3,
            (Layout::Col, true) => 4,
        }
    }
}
