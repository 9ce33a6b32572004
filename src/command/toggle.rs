// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic toggle command for related entities.

use serde_json::{Value, json};

use crate::types::EntityId;

use super::Command;

/// Toggles any entity through the host's generic `homeassistant.toggle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleCommand {
    entity_id: EntityId,
}

impl ToggleCommand {
    /// Creates a toggle command.
    #[must_use]
    pub fn new(entity_id: EntityId) -> Self {
        Self { entity_id }
    }
}

impl Command for ToggleCommand {
    fn domain(&self) -> &'static str {
        "homeassistant"
    }

    fn service(&self) -> &'static str {
        "toggle"
    }

    fn data(&self) -> Value {
        json!({ "entity_id": self.entity_id.as_str() })
    }
}
