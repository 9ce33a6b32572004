// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation lookup.

use std::collections::HashMap;

use crate::snapshot::Snapshot;
use crate::types::Domain;

/// Heading of the measured temperature.
pub const CURRENTLY_KEY: &str = "ui.card.climate.currently";

/// Heading of the operating state.
pub const STATE_HEADING_KEY: &str = "ui.panel.lovelace.editor.card.generic.state";

/// Returns the key prefix for translated entity states of `domain`.
#[must_use]
pub fn state_prefix(domain: Domain) -> String {
    format!("component.{domain}.entity_component._.state.")
}

/// Returns the key prefix for translated values of a state attribute such
/// as `preset_mode`.
#[must_use]
pub fn attribute_prefix(domain: Domain, attribute: &str) -> String {
    format!("component.{domain}.entity_component._.state_attributes.{attribute}.state.")
}

/// Source of translated UI strings.
///
/// Lookups never fail: a missing key falls back to the raw label.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use thermostat_card::view::Localize;
///
/// let mut table = HashMap::new();
/// table.insert("component.climate.entity_component._.state.heat".to_string(), "Fűtés".to_string());
///
/// let prefix = "component.climate.entity_component._.state.";
/// assert_eq!(table.localize("heat", prefix), "Fűtés");
/// assert_eq!(table.localize("cool", prefix), "cool");
/// ```
pub trait Localize {
    /// Returns the translation stored under `key`.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Translates `label` looked up as `prefix + label`.
    fn localize(&self, label: &str, prefix: &str) -> String {
        self.lookup(&format!("{prefix}{label}"))
            .unwrap_or(label)
            .to_string()
    }
}

impl Localize for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Uses the table of the snapshot's active language.
impl Localize for Snapshot {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.translations()?.lookup(key)
    }
}

/// A translator that knows nothing; every label is shown as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Localize for NoTranslations {
    fn lookup(&self, _key: &str) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefixes() {
        assert_eq!(
            state_prefix(Domain::WaterHeater),
            "component.water_heater.entity_component._.state."
        );
        assert_eq!(
            attribute_prefix(Domain::Climate, "fan_mode"),
            "component.climate.entity_component._.state_attributes.fan_mode.state."
        );
    }

    #[test]
    fn snapshot_prefers_selected_language() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "language": "en",
            "selectedLanguage": "de",
            "resources": {
                "en": {"ui.card.climate.currently": "Currently"},
                "de": {"ui.card.climate.currently": "Aktuell"}
            }
        }))
        .unwrap();
        assert_eq!(snapshot.localize(CURRENTLY_KEY, ""), "Aktuell");
    }

    #[test]
    fn missing_language_falls_back_to_label() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot.localize("heat", "x."), "heat");
        assert_eq!(NoTranslations.localize("off", "y."), "off");
    }
}
