// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

use super::Domain;

/// Identifier of a host entity, in `<domain>.<object_id>` form.
///
/// Both halves must be non-empty and made of ASCII alphanumerics and
/// underscores. The domain is not restricted here: related entities such as
/// `switch.*` or `sensor.*` share this type. Use [`EntityId::domain`] to find
/// out whether the entity is controllable by the card.
///
/// # Examples
///
/// ```
/// use thermostat_card::types::{Domain, EntityId};
///
/// let id: EntityId = "climate.living_room".parse().unwrap();
/// assert_eq!(id.domain_str(), "climate");
/// assert_eq!(id.object_id(), "living_room");
/// assert_eq!(id.domain(), Some(Domain::Climate));
///
/// assert!("living_room".parse::<EntityId>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parses and validates an entity id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntityId`] when the id is not of the
    /// form `<domain>.<object_id>`.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let valid = id.split_once('.').is_some_and(|(domain, object_id)| {
            is_slug(domain) && is_slug(object_id)
        });
        if valid {
            Ok(Self(id))
        } else {
            Err(ConfigError::InvalidEntityId(id))
        }
    }

    /// Returns the full id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the substring before the first `.`.
    #[must_use]
    pub fn domain_str(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// Returns the substring after the first `.`.
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, object_id)| object_id)
    }

    /// Returns the controllable domain, if this entity has one.
    #[must_use]
    pub fn domain(&self) -> Option<Domain> {
        self.domain_str().parse().ok()
    }
}

fn is_slug(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
