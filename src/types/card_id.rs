// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Card instance identifier.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of one card instance.
///
/// Two cards showing the same entity reconcile independently; this id tells
/// them apart in logs.
///
/// # Examples
///
/// ```
/// use thermostat_card::types::CardId;
///
/// let id = CardId::new();
/// assert_ne!(id, CardId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(Uuid);

impl CardId {
    /// Creates a new unique card identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "CardId({short}...)")
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Logs only need to tell instances apart
        f.write_str(&self.0.to_string()[..8])
    }
}
