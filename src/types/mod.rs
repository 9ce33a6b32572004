// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the card.
//!
//! # Types
//!
//! - [`EntityId`] - Validated `<domain>.<object_id>` identifier
//! - [`Domain`] - Closed set of controllable domains
//! - [`Reported`] - Host reported value, possibly unavailable
//! - [`DisplayedValue`] - Value shown to the user, never undefined
//! - [`ModeCategory`] - Families of selectable modes
//! - [`CardId`] - Per-instance identifier used in logs

mod card_id;
mod domain;
mod entity_id;
mod mode;
mod temperature;

pub use card_id::CardId;
pub use domain::Domain;
pub use entity_id::EntityId;
pub use mode::ModeCategory;
pub use temperature::{DisplayedValue, PLACEHOLDER, Reported, approx_eq, snap};
