// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reported and displayed temperature values.

use std::fmt;

/// Text shown in place of a value the host cannot report.
pub const PLACEHOLDER: &str = "---";

/// Resolution that edited values are snapped to.
const RESOLUTION: f64 = 1000.0;

/// Tolerance used when comparing a reported value against a displayed one.
const TOLERANCE: f64 = 1e-6;

/// The host's last known value of the controllable quantity.
///
/// # Examples
///
/// ```
/// use thermostat_card::types::Reported;
///
/// assert_eq!(Reported::from_json(&serde_json::json!(21.5)), Reported::Known(21.5));
/// assert_eq!(Reported::from_json(&serde_json::json!(null)), Reported::Unavailable);
/// assert_eq!(Reported::from_json(&serde_json::json!("unknown")), Reported::Unavailable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reported {
    /// A numeric value.
    Known(f64),
    /// Missing, null, non-numeric, or the entity itself is unavailable.
    Unavailable,
}

impl Reported {
    /// Reads a value from a JSON attribute.
    ///
    /// Numeric strings are accepted since some integrations report them.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let number = match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number
            .filter(|n| n.is_finite())
            .map_or(Self::Unavailable, Self::Known)
    }

    /// Returns the numeric value, if known.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unavailable => None,
        }
    }
}

/// The value rendered to the user.
///
/// Never undefined: when nothing is known the card shows [`PLACEHOLDER`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayedValue {
    /// A number, either mirrored from the host or edited locally.
    Value(f64),
    /// Nothing to show.
    #[default]
    Placeholder,
}

impl DisplayedValue {
    /// Returns the numeric value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Placeholder => None,
        }
    }

    /// Returns `true` when this value equals a known report.
    ///
    /// An unavailable report is never comparable.
    #[must_use]
    pub fn matches(&self, reported: Reported) -> bool {
        match (self, reported) {
            (Self::Value(shown), Reported::Known(host)) => approx_eq(*shown, host),
            _ => false,
        }
    }
}

impl From<Reported> for DisplayedValue {
    fn from(reported: Reported) -> Self {
        match reported {
            Reported::Known(v) => Self::Value(v),
            Reported::Unavailable => Self::Placeholder,
        }
    }
}

impl fmt::Display for DisplayedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Snaps a value to the edit resolution, removing float noise from repeated
/// fractional steps (`20.1 + 0.1 + 0.1`).
#[must_use]
pub fn snap(value: f64) -> f64 {
    (value * RESOLUTION).round() / RESOLUTION
}

/// Compares two temperatures within [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}
