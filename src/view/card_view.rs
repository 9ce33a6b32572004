// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The render model.

use serde::Serialize;

use crate::config::{CardConfig, DisplayMode, Layout};
use crate::snapshot::{EntityState, TargetEntity};
use crate::state::WidgetState;
use crate::types::{Domain, EntityId, ModeCategory, PLACEHOLDER};

use super::icons;
use super::localize::{self, Localize};

/// A heading and value pair in the sensor column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorItem {
    /// Translated heading, absent when sensor labels are hidden.
    pub heading: Option<String>,
    /// The value text.
    pub value: String,
}

/// One selectable value of a mode row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeOption {
    /// Value sent back through
    /// [`ThermostatCard::select_mode`](crate::ThermostatCard::select_mode).
    pub value: String,
    /// Translated label.
    pub label: String,
    /// Icon, known for primary climate modes only.
    pub icon: Option<&'static str>,
    /// `true` for the value the host reports as active.
    pub selected: bool,
}

/// A row of mode options for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeRow {
    /// The category the row controls.
    pub category: ModeCategory,
    /// Options in host order.
    pub options: Vec<ModeOption>,
}

impl ModeRow {
    /// Returns the selected option, if the host reports one.
    #[must_use]
    pub fn selected(&self) -> Option<&ModeOption> {
        self.options.iter().find(|o| o.selected)
    }
}

/// A toggle for an entity on the same device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedItem {
    /// The related entity.
    pub entity_id: EntityId,
    /// Cleaned display name.
    pub name: String,
    /// Icon, see [`icons::related_icon`].
    pub icon: Option<String>,
    /// `true` unless the entity is `off`.
    pub active: bool,
}

/// Everything a renderer needs to draw a ready card.
///
/// Built fresh on every request; holding one never affects the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Card title, absent when names are hidden.
    pub title: Option<String>,
    /// CSS class of the card, the entity's raw state.
    pub css_class: String,
    /// Measured temperature with unit.
    pub current: SensorItem,
    /// Translated operating state.
    pub operating_state: SensorItem,
    /// The displayed target value, or the placeholder.
    pub value_text: String,
    /// Unit next to the target value.
    pub unit: Option<String>,
    /// `true` while an edit is unconfirmed.
    pub updating: bool,
    /// Step button layout.
    pub layout: Layout,
    /// Icon of the increase button.
    pub increase_icon: &'static str,
    /// Icon of the decrease button.
    pub decrease_icon: &'static str,
    /// How mode rows are drawn.
    pub display_mode: DisplayMode,
    /// Mode rows, in [`ModeCategory::ALL`] order.
    pub mode_rows: Vec<ModeRow>,
    /// Related entity toggles; empty when disabled.
    pub related: Vec<RelatedItem>,
    /// Output of the debug renderer, if one is installed.
    pub debug: Option<String>,
}

impl CardView {
    /// Projects the card state into a render model.
    ///
    /// `related` are the states of the target's related entities, in
    /// registry order; ids missing from the snapshot are simply absent.
    #[must_use]
    pub fn build(
        config: &CardConfig,
        state: &WidgetState,
        target: &TargetEntity,
        related: &[EntityState],
        host_unit: Option<&str>,
        localize: &dyn Localize,
    ) -> Self {
        let unit = config.temp_unit.resolve(host_unit).map(str::to_string);

        let title = config.show_name.then(|| {
            config
                .name
                .clone()
                .or_else(|| target.state.friendly_name().map(str::to_string))
                .unwrap_or_default()
        });

        let heading = |key: &str| {
            config
                .show_sensor_labels
                .then(|| localize.localize(key, ""))
        };

        let measured = target
            .current_measurement
            .map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string());
        let current = SensorItem {
            heading: heading(localize::CURRENTLY_KEY),
            value: match &unit {
                Some(unit) => format!("{measured} {unit}"),
                None => measured,
            },
        };

        let operating_state = SensorItem {
            heading: heading(localize::STATE_HEADING_KEY),
            value: localize.localize(
                target.operating_state(),
                &localize::state_prefix(target.domain),
            ),
        };

        let (increase_icon, decrease_icon) = icons::step_icons(config.layout);

        let mode_rows = ModeCategory::ALL
            .into_iter()
            .filter(|c| config.shows_mode_row(*c))
            .filter_map(|c| mode_row(target, c, localize))
            .collect();

        let related = if config.show_related_entities {
            related.iter().map(related_item).collect()
        } else {
            Vec::new()
        };

        Self {
            title,
            css_class: target.operating_state().to_string(),
            current,
            operating_state,
            value_text: state.displayed().to_string(),
            unit,
            updating: state.is_dirty(),
            layout: config.layout,
            increase_icon,
            decrease_icon,
            display_mode: config.display_mode,
            mode_rows,
            related,
            debug: None,
        }
    }

    /// Attaches debug output.
    #[must_use]
    pub fn with_debug(mut self, debug: Option<String>) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the row of a category, if shown.
    #[must_use]
    pub fn mode_row(&self, category: ModeCategory) -> Option<&ModeRow> {
        self.mode_rows.iter().find(|r| r.category == category)
    }
}

/// What the card renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderState {
    /// Not configured yet: render nothing.
    Empty,
    /// The configured entity is missing from the latest snapshot.
    NotFound {
        /// The configured id.
        entity_id: EntityId,
    },
    /// The full card.
    Card(Box<CardView>),
}

impl RenderState {
    /// Returns the card model, if ready.
    #[must_use]
    pub fn card(&self) -> Option<&CardView> {
        match self {
            Self::Card(view) => Some(view),
            Self::Empty | Self::NotFound { .. } => None,
        }
    }
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::NotFound { entity_id } => write!(f, "Entity not found: {entity_id}"),
            Self::Card(view) => f.write_str(view.title.as_deref().unwrap_or_default()),
        }
    }
}

fn mode_row(target: &TargetEntity, category: ModeCategory, localize: &dyn Localize) -> Option<ModeRow> {
    let modes = target.supported_modes.get(category)?;
    let prefix = label_prefix(target.domain, category);

    let options = modes
        .values
        .iter()
        .map(|value| ModeOption {
            value: value.clone(),
            label: match &prefix {
                Some(prefix) => localize.localize(value, prefix),
                None => value.clone(),
            },
            icon: match (target.domain, category) {
                (Domain::Climate, ModeCategory::Primary) => icons::mode_icon(value),
                _ => None,
            },
            selected: modes.is_current(value),
        })
        .collect();

    Some(ModeRow { category, options })
}

fn label_prefix(domain: Domain, category: ModeCategory) -> Option<String> {
    match category {
        ModeCategory::Primary => Some(localize::state_prefix(domain)),
        ModeCategory::Preset => Some(localize::attribute_prefix(domain, "preset_mode")),
        ModeCategory::Fan => Some(localize::attribute_prefix(domain, "fan_mode")),
        ModeCategory::Swing => Some(localize::attribute_prefix(domain, "swing_mode")),
        ModeCategory::Away => None,
    }
}

fn related_item(state: &EntityState) -> RelatedItem {
    let raw = state
        .friendly_name()
        .unwrap_or_else(|| state.entity_id.object_id());
    RelatedItem {
        entity_id: state.entity_id.clone(),
        name: clean_name(raw),
        icon: icons::related_icon(state),
        active: state.state != "off",
    }
}

/// Strips integration noise from a related entity's name.
///
/// Removes a leading hex device id of at least 12 digits followed by
/// whitespace, and a trailing parenthesized suffix.
///
/// # Examples
///
/// ```
/// use thermostat_card::view::clean_name;
///
/// assert_eq!(clean_name("502cc6c52f2d Panel fény"), "Panel fény");
/// assert_eq!(clean_name("Panel Light (switch.ac_panel_light)"), "Panel Light");
/// assert_eq!(clean_name("Quiet"), "Quiet");
/// ```
#[must_use]
pub fn clean_name(name: &str) -> String {
    let mut name = strip_hex_prefix(name);

    let tail = name.trim_end();
    if tail.ends_with(')')
        && let Some(open) = tail.find('(')
    {
        name = &tail[..open];
    }

    name.trim().to_string()
}

fn strip_hex_prefix(name: &str) -> &str {
    let hex_len = name
        .bytes()
        .take_while(u8::is_ascii_hexdigit)
        .count();
    if hex_len < 12 {
        return name;
    }
    let rest = &name[hex_len..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        // no separating whitespace
        return name;
    }
    trimmed
}
