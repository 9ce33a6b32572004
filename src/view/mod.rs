// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation model.
//!
//! Nothing here mutates card state. [`CardView::build`] projects the
//! configuration, the widget state and the latest target entity into a
//! serializable model a renderer can draw directly:
//!
//! - [`CardView`] - title, sensor values, step buttons, mode rows and
//!   related entity toggles
//! - [`RenderState`] - the card, the not-found fallback, or nothing
//! - [`Localize`] - translation lookup with fallback to the raw label
//! - [`icons`] - step, mode and related switch icons

mod card_view;
pub mod icons;
mod localize;

pub use card_view::{
    CardView, ModeOption, ModeRow, RelatedItem, RenderState, SensorItem, clean_name,
};
pub use localize::{
    CURRENTLY_KEY, Localize, NoTranslations, STATE_HEADING_KEY, attribute_prefix, state_prefix,
};
