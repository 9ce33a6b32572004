// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mode categories.

use std::fmt;

/// A family of discrete modes the user can pick from.
///
/// The primary category is `hvac_mode` for climate entities and
/// `operation_mode` for water heaters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeCategory {
    /// HVAC mode or water heater operation mode.
    Primary,
    /// Preset (eco, comfort, ...).
    Preset,
    /// Fan speed.
    Fan,
    /// Swing direction.
    Swing,
    /// Water heater away mode (`on` / `off`).
    Away,
}

impl ModeCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Primary,
        Self::Preset,
        Self::Fan,
        Self::Swing,
        Self::Away,
    ];

    /// Returns a human-readable name, used in errors and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Primary => "operating mode",
            Self::Preset => "preset mode",
            Self::Fan => "fan mode",
            Self::Swing => "swing mode",
            Self::Away => "away mode",
        }
    }
}

impl fmt::Display for ModeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
