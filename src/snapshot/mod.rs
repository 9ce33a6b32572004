// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host snapshots and target extraction.
//!
//! The host hands the card a complete [`Snapshot`] of every entity on each
//! update. [`Snapshot::read_target`] extracts the configured entity as a
//! [`TargetEntity`], including its reported value, supported modes, and the
//! related entities that share its physical device.
//!
//! # Examples
//!
//! ```
//! use thermostat_card::snapshot::{EntityState, RegistryEntry, Snapshot};
//!
//! let ac = "climate.ac".parse().unwrap();
//! let light = "switch.ac_panel_light".parse().unwrap();
//!
//! let snapshot = Snapshot::new()
//!     .with_state(EntityState::new(ac, "cool").with_attribute("temperature", 24))
//!     .with_registry_entry(RegistryEntry::new("climate.ac".parse().unwrap(), "midea", "dev1"))
//!     .with_registry_entry(RegistryEntry::new(light, "midea", "dev1"));
//!
//! let target = snapshot.read_target(&"climate.ac".parse().unwrap()).unwrap();
//! assert_eq!(target.related.len(), 1);
//! ```

mod entity_state;
mod host;
mod registry;
mod target;

pub use entity_state::EntityState;
pub use host::{HostConfig, Snapshot, UnitSystem};
pub use registry::RegistryEntry;
pub use target::TargetEntity;
