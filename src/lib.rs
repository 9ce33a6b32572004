// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `thermostat_card` - Controller core of a compact thermostat dashboard card.
//!
//! The card shows and controls one `climate` or `water_heater` entity. The
//! host dashboard pushes a full snapshot of every entity on each update;
//! the card renders a small view model and sends service calls back when
//! the user interacts with it.
//!
//! # Features
//!
//! - **Optimistic edits**: the displayed target temperature changes on tap
//!   and is not overwritten by stale snapshots until the host catches up
//! - **Debounced commands**: bursts of taps become one `set_temperature`
//!   call after a quiet period (1 s by default)
//! - **Mode rows**: hvac / operation, preset, fan, swing and away modes,
//!   with no-op selections suppressed
//! - **Related entities**: toggles for the switches of the same device
//! - **View model**: a serializable render model with icons and
//!   translations
//!
//! # Quick Start
//!
//! ```
//! use thermostat_card::{CardConfig, ThermostatCard};
//! use thermostat_card::snapshot::Snapshot;
//! use thermostat_card::subscription::Subscribable;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> thermostat_card::Result<()> {
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut card = ThermostatCard::new(tx);
//! card.set_config(CardConfig::from_json(r#"{"entity": "climate.office", "step_size": 0.5}"#)?)?;
//!
//! card.on_command_issued(|call| println!("sent {call}"));
//!
//! let snapshot = Snapshot::from_json(r#"{
//!     "states": {
//!         "climate.office": {
//!             "state": "heat",
//!             "attributes": {"temperature": 20.5, "hvac_modes": ["off", "heat"]}
//!         }
//!     },
//!     "config": {"unit_system": {"temperature": "°C"}}
//! }"#)?;
//! card.apply_snapshot(&snapshot);
//!
//! card.increment()?;
//! card.increment()?;
//! assert_eq!(card.view(&snapshot).card().unwrap().value_text, "21.5");
//!
//! // one call, one second after the last tap
//! tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
//! let call = rx.recv().await.unwrap();
//! assert_eq!(call.field("temperature"), Some(&serde_json::json!(21.5)));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`snapshot`] - reads the target entity and its related entities
//! - [`state`] - the Clean/Dirty reconciler
//! - [`debounce`] - the single-slot command timer
//! - [`command`] - service calls and the mode dispatcher
//! - [`view`] - the render model
//! - [`sink`] - the outbound boundary
//!
//! The library logs through [`tracing`] and installs no subscriber.

pub mod capabilities;
mod card;
pub mod command;
pub mod config;
pub mod debounce;
pub mod error;
pub mod sink;
pub mod snapshot;
pub mod state;
pub mod subscription;
pub mod types;
pub mod view;

pub use card::{CardStatus, ThermostatCard};
pub use command::{Command, ModeDispatcher, ServiceCall};
pub use config::{CardConfig, DisplayMode, Layout, TempUnit};
pub use error::{ConfigError, Error, ModeError, ParseError, Result, TransportError};
pub use sink::CommandSink;
pub use snapshot::{EntityState, Snapshot, TargetEntity};
pub use state::{Reconciler, WidgetState};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{CardId, DisplayedValue, Domain, EntityId, ModeCategory, Reported};
pub use view::{CardView, Localize, RenderState};
