// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity registry entries.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// The host's registry record for an entity.
///
/// The registry ties entities to the physical device that exposes them.
/// Entities with the same `device_id` and `platform` are considered related.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The entity id.
    pub entity_id: EntityId,
    /// The integration that provides the entity.
    #[serde(default)]
    pub platform: String,
    /// The owning device, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// `config`, `diagnostic`, or absent for primary entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<String>,
    /// User-assigned name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Translation key of the entity name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_key: Option<String>,
}

impl RegistryEntry {
    /// Creates a registry entry attached to a device.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        platform: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            entity_id,
            platform: platform.into(),
            device_id: Some(device_id.into()),
            entity_category: None,
            name: None,
            translation_key: None,
        }
    }

    /// Returns `true` when both entries belong to the same device and
    /// platform. Entries without a device are never grouped.
    #[must_use]
    pub fn shares_device_with(&self, other: &Self) -> bool {
        self.device_id.is_some() && self.device_id == other.device_id && self.platform == other.platform
    }
}
