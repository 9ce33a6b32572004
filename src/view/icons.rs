// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Icon tables.

use crate::config::Layout;
use crate::snapshot::EntityState;

/// Increase button, row layout.
pub const PLUS: &str = "mdi:plus";
/// Decrease button, row layout.
pub const MINUS: &str = "mdi:minus";
/// Increase button, column layout.
pub const UP: &str = "hass:chevron-up";
/// Decrease button, column layout.
pub const DOWN: &str = "hass:chevron-down";

/// Returns the `(increase, decrease)` button icons of a layout.
#[must_use]
pub const fn step_icons(layout: Layout) -> (&'static str, &'static str) {
    match layout {
        Layout::Row => (PLUS, MINUS),
        Layout::Col => (UP, DOWN),
    }
}

/// Returns the icon of an operating mode value.
#[must_use]
pub fn mode_icon(mode: &str) -> Option<&'static str> {
    match mode {
        "auto" => Some("mdi:calendar-sync"),
        "heat_cool" => Some("mdi:autorenew"),
        "heat" => Some("mdi:fire"),
        "cool" => Some("mdi:snowflake"),
        "off" => Some("mdi:power"),
        "fan_only" => Some("mdi:fan"),
        "dry" => Some("mdi:water-percent"),
        _ => None,
    }
}

/// `(object id fragment, on icon, off icon)`, first match wins.
const SWITCH_ICONS: [(&str, &str, &str); 4] = [
    ("fresh_air", "mdi:air-filter", "mdi:air-filter"),
    ("quiet", "mdi:headphones", "mdi:headphones-off"),
    ("fan", "mdi:fan", "mdi:fan-off"),
    ("panel_light", "mdi:lightbulb", "mdi:lightbulb-outline"),
];

const SWITCH_DEFAULT: (&str, &str) = ("mdi:light-switch", "mdi:light-switch-off");

/// Picks the icon of a related entity.
///
/// An explicit `icon` attribute wins. Switches get an icon guessed from
/// their id, in its on or off variant. Anything else has no icon.
///
/// # Examples
///
/// ```
/// use thermostat_card::snapshot::EntityState;
/// use thermostat_card::view::icons::related_icon;
///
/// let quiet = EntityState::new("switch.ac_quiet".parse().unwrap(), "off")
///     .with_attribute("device_class", "switch");
/// assert_eq!(related_icon(&quiet).as_deref(), Some("mdi:headphones-off"));
/// ```
#[must_use]
pub fn related_icon(state: &EntityState) -> Option<String> {
    if let Some(icon) = state.str_attribute("icon") {
        return Some(icon.to_string());
    }
    if state.str_attribute("device_class") != Some("switch") {
        return None;
    }

    let id = state.entity_id.as_str();
    let (on, off) = SWITCH_ICONS
        .iter()
        .find(|(fragment, _, _)| id.contains(fragment))
        .map_or(SWITCH_DEFAULT, |&(_, on, off)| (on, off));

    let icon = if state.state == "on" { on } else { off };
    Some(icon.to_string())
}
