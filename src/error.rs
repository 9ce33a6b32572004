// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the thermostat card.
//!
//! Configuration problems are fatal and surface synchronously from
//! [`ThermostatCard::set_config`](crate::ThermostatCard::set_config). Mode
//! selection errors and transport failures are reported per call and never
//! poison the card state.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The card configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A mode selection could not be turned into a command.
    #[error("mode error: {0}")]
    Mode(#[from] ModeError),

    /// The command sink refused the hand-off.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Host supplied JSON could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The card has no configuration or its entity is missing from the
    /// latest snapshot, so no command can be issued.
    #[error("card is not ready: no configured entity in the current snapshot")]
    NotReady,

    /// A related entity targeted by a toggle is not part of the snapshot.
    #[error("related entity not found: {0}")]
    RelatedNotFound(String),
}

/// Errors raised while validating a card configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No `entity` was supplied.
    #[error("you need to define an entity")]
    MissingEntity,

    /// The entity id is not of the form `<domain>.<object_id>`.
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),

    /// The entity belongs to a domain this card cannot control.
    #[error("unsupported entity domain '{domain}' (expected climate or water_heater)")]
    UnsupportedDomain {
        /// The domain prefix that was found.
        domain: String,
    },

    /// The step size is not a finite positive number.
    #[error("invalid step size: {0}")]
    InvalidStepSize(String),

    /// An enumerated option had an unknown value.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidOption {
        /// The option name.
        option: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised by the mode dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// The entity's domain has no command for this mode category.
    #[error("{category} is not available for {domain} entities")]
    UnsupportedCategory {
        /// The requested category.
        category: &'static str,
        /// The entity domain.
        domain: &'static str,
    },

    /// The entity does not advertise this mode category.
    #[error("entity does not support {0}")]
    NotSupportedByEntity(&'static str),

    /// The selected value is not one of the entity's allowed values.
    #[error("'{value}' is not an allowed {category}")]
    ValueNotAllowed {
        /// The requested category.
        category: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors reported by a [`CommandSink`](crate::sink::CommandSink).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The receiving side of the channel is gone.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The host rejected the service call outright.
    #[error("call rejected: {0}")]
    Rejected(String),
}

/// Errors raised while parsing host JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
