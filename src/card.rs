// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The card controller.
//!
//! [`ThermostatCard`] ties the pieces together for one widget instance:
//! it reads each snapshot, reconciles the displayed value, debounces
//! temperature edits, dispatches mode selections and builds the view.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::command::{Command, ModeDispatcher, ServiceCall, SetTemperatureCommand, ToggleCommand};
use crate::config::CardConfig;
use crate::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::error::{Error, Result};
use crate::sink::CommandSink;
use crate::snapshot::{EntityState, Snapshot, TargetEntity};
use crate::state::{Reconciler, WidgetState};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{CardId, EntityId, ModeCategory};
use crate::view::{CardView, Localize, RenderState};

/// Where the card is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    /// Nothing to show yet: no configuration, or no snapshot applied since
    /// the configuration was set.
    Unconfigured,
    /// The configured entity is missing from the latest snapshot.
    NotFound(EntityId),
    /// The entity was found; the card can be rendered and controlled.
    Ready,
}

impl CardStatus {
    /// Returns `true` for [`CardStatus::Ready`].
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => f.write_str("unconfigured"),
            Self::NotFound(id) => write!(f, "not found: {id}"),
            Self::Ready => f.write_str("ready"),
        }
    }
}

type DebugRenderer = Box<dyn Fn(&WidgetState) -> String + Send + Sync>;

/// One thermostat card instance.
///
/// The host drives the card: it calls [`set_config`](Self::set_config)
/// once, [`apply_snapshot`](Self::apply_snapshot) on every update and the
/// interaction methods in response to user input. Commands go out through
/// the [`CommandSink`]; their effect only becomes visible through later
/// snapshots.
///
/// Temperature edits are optimistic: the displayed value changes at once
/// and is protected from stale snapshots until the host reports it or the
/// debounced command has been handed off.
///
/// Methods that edit the temperature spawn the debounce timer and must be
/// called inside a Tokio runtime.
///
/// # Examples
///
/// ```
/// use thermostat_card::{CardConfig, ThermostatCard};
/// use thermostat_card::snapshot::{EntityState, Snapshot};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> thermostat_card::Result<()> {
/// let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
/// let mut card = ThermostatCard::new(tx);
/// card.set_config(CardConfig::new("climate.office").with_step_size(0.5))?;
///
/// let snapshot = Snapshot::new().with_state(
///     EntityState::new("climate.office".parse()?, "heat").with_attribute("temperature", 20.0),
/// );
/// card.apply_snapshot(&snapshot);
///
/// assert_eq!(card.increment()?, Some(20.5));
/// assert!(card.state().is_dirty());
/// # Ok(())
/// # }
/// ```
pub struct ThermostatCard<S: CommandSink> {
    id: CardId,
    sink: Arc<S>,
    state: Arc<Mutex<WidgetState>>,
    callbacks: Arc<CallbackRegistry>,
    debouncer: Debouncer<S>,
    config: Option<CardConfig>,
    entity_id: Option<EntityId>,
    status: CardStatus,
    target: Option<TargetEntity>,
    related: Vec<EntityState>,
    host_unit: Option<String>,
    debug_renderer: Option<DebugRenderer>,
    // an edit whose command was withheld while the entity was missing
    suspended_edit: bool,
}

impl<S: CommandSink> ThermostatCard<S> {
    /// Creates an unconfigured card issuing commands through `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        let id = CardId::new();
        let sink = Arc::new(sink);
        let state = Arc::new(Mutex::new(WidgetState::new()));
        let callbacks = Arc::new(CallbackRegistry::new());
        let debouncer = Debouncer::new(
            id,
            DEFAULT_QUIET_PERIOD,
            Arc::clone(&state),
            Arc::clone(&sink),
            Arc::clone(&callbacks),
        );

        Self {
            id,
            sink,
            state,
            callbacks,
            debouncer,
            config: None,
            entity_id: None,
            status: CardStatus::Unconfigured,
            target: None,
            related: Vec::new(),
            host_unit: None,
            debug_renderer: None,
            suspended_edit: false,
        }
    }

    /// Sets the idle time before a temperature edit is sent.
    #[must_use]
    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        self.debouncer.cancel();
        self.debouncer = Debouncer::new(
            self.id,
            quiet,
            Arc::clone(&self.state),
            Arc::clone(&self.sink),
            Arc::clone(&self.callbacks),
        );
        self
    }

    /// Installs a renderer whose output is attached to every view.
    #[must_use]
    pub fn with_debug_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&WidgetState) -> String + Send + Sync + 'static,
    {
        self.debug_renderer = Some(Box::new(renderer));
        self
    }

    /// Returns the instance id.
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> &CardStatus {
        &self.status
    }

    /// Returns a copy of the widget state.
    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state.lock().clone()
    }

    /// Returns the target entity of the latest snapshot, if found.
    #[must_use]
    pub fn target(&self) -> Option<&TargetEntity> {
        self.target.as_ref()
    }

    /// Returns `true` while a temperature command waits for the quiet
    /// period.
    #[must_use]
    pub fn has_pending_command(&self) -> bool {
        self.debouncer.is_armed()
    }

    /// Applies a new configuration.
    ///
    /// If the entity is unchanged only the display options are replaced;
    /// a pending edit and its command survive. Switching to another entity
    /// drops any pending temperature command and starts the widget state
    /// over; the next snapshot brings the card back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid. The card
    /// then keeps its previous configuration.
    pub fn set_config(&mut self, config: CardConfig) -> Result<()> {
        let entity_id = config.validate()?;

        if self.entity_id.as_ref() == Some(&entity_id) {
            tracing::debug!(
                card = %self.id,
                entity = %entity_id,
                layout = %config.layout,
                step_size = config.step_size,
                "Card options updated"
            );
            self.config = Some(config);
            return Ok(());
        }

        self.debouncer.cancel();
        self.suspended_edit = false;
        {
            let mut state = self.state.lock();
            let generation = state.generation.wrapping_add(1);
            *state = WidgetState {
                generation,
                ..WidgetState::new()
            };
        }

        tracing::debug!(
            card = %self.id,
            entity = %entity_id,
            layout = %config.layout,
            step_size = config.step_size,
            "Card configured"
        );

        self.entity_id = Some(entity_id);
        self.config = Some(config);
        self.target = None;
        self.related.clear();
        self.set_status(CardStatus::Unconfigured);
        Ok(())
    }

    /// Applies a host snapshot and returns the resulting status.
    ///
    /// Never fails: a missing entity yields [`CardStatus::NotFound`], which
    /// suppresses reconciliation and commands until it reappears.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> CardStatus {
        let Some(entity_id) = self.entity_id.clone() else {
            tracing::debug!(card = %self.id, "Snapshot ignored, card not configured");
            return self.status.clone();
        };

        let Some(target) = snapshot.read_target(&entity_id) else {
            if !matches!(self.status, CardStatus::NotFound(_)) {
                tracing::warn!(card = %self.id, entity = %entity_id, "Entity not found");
            }
            if self.debouncer.cancel() {
                tracing::debug!(card = %self.id, entity = %entity_id, "Pending command withheld");
                self.suspended_edit = true;
            }
            self.target = None;
            self.related.clear();
            self.set_status(CardStatus::NotFound(entity_id));
            return self.status.clone();
        };

        let (transition, state) = {
            let mut state = self.state.lock();
            let transition = Reconciler::apply_snapshot(&mut state, target.reported);
            (transition, state.clone())
        };

        self.related = target
            .related
            .iter()
            .filter_map(|id| snapshot.entity(id).cloned())
            .collect();
        self.host_unit = snapshot.temperature_unit().map(str::to_string);
        self.target = Some(target);
        self.set_status(CardStatus::Ready);

        if std::mem::take(&mut self.suspended_edit) {
            self.resume_edit(&entity_id, &state);
        }

        if transition.is_change() {
            tracing::debug!(
                card = %self.id,
                entity = %entity_id,
                ?transition,
                "Widget state reconciled"
            );
            self.callbacks.dispatch_state_changed(&state);
        }

        self.status.clone()
    }

    /// Raises the target by one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] unless the entity is in the latest
    /// snapshot.
    pub fn increment(&mut self) -> Result<Option<f64>> {
        let step = self.step_size();
        self.adjust(step)
    }

    /// Lowers the target by one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] unless the entity is in the latest
    /// snapshot.
    pub fn decrement(&mut self) -> Result<Option<f64>> {
        let step = self.step_size();
        self.adjust(-step)
    }

    /// Adds `delta` to the displayed value and (re)arms the debounce timer.
    ///
    /// Returns the new displayed value, or `None` when there is nothing to
    /// edit: the placeholder is shown or `delta` is not finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] unless the entity is in the latest
    /// snapshot.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn adjust(&mut self, delta: f64) -> Result<Option<f64>> {
        let target = self.target.as_ref().ok_or(Error::NotReady)?;
        let entity_id = target.entity_id().clone();

        if !delta.is_finite() {
            tracing::debug!(card = %self.id, entity = %entity_id, delta, "Ignoring non-finite step");
            return Ok(None);
        }

        let (value, state) = {
            let mut state = self.state.lock();
            let value = Reconciler::apply_edit(&mut state, delta);
            (value, state.clone())
        };
        let Some(value) = value else {
            tracing::debug!(card = %self.id, entity = %entity_id, "No value to edit");
            return Ok(None);
        };
        let Some(command) = SetTemperatureCommand::new(entity_id, value) else {
            return Ok(None);
        };

        self.debouncer.request(command.to_service_call(), value);
        self.callbacks.dispatch_state_changed(&state);
        Ok(Some(value))
    }

    /// Selects a mode value.
    ///
    /// Returns `true` if a command was issued, `false` when `value` is
    /// already active.
    ///
    /// # Errors
    ///
    /// - [`Error::NotReady`] unless the entity is in the latest snapshot
    /// - [`Error::Mode`] if the category or value is not available
    /// - [`Error::Transport`] if the sink refused the call
    pub fn select_mode(&self, category: ModeCategory, value: &str) -> Result<bool> {
        let target = self.target.as_ref().ok_or(Error::NotReady)?;
        let Some(command) = ModeDispatcher::build(target, category, value)? else {
            return Ok(false);
        };

        self.issue(command.to_service_call())?;
        Ok(true)
    }

    /// Toggles a related entity.
    ///
    /// Only switches are toggled; returns `false` for anything else.
    ///
    /// # Errors
    ///
    /// - [`Error::NotReady`] unless the entity is in the latest snapshot
    /// - [`Error::RelatedNotFound`] if `entity_id` is not related to it
    /// - [`Error::Transport`] if the sink refused the call
    pub fn toggle_related(&self, entity_id: &EntityId) -> Result<bool> {
        if self.target.is_none() {
            return Err(Error::NotReady);
        }
        let related = self
            .related
            .iter()
            .find(|s| &s.entity_id == entity_id)
            .ok_or_else(|| Error::RelatedNotFound(entity_id.to_string()))?;

        if related.str_attribute("device_class") != Some("switch") {
            tracing::debug!(card = %self.id, entity = %entity_id, "Not a switch, ignoring toggle");
            return Ok(false);
        }

        if let Err(e) = self.sink.toggle(entity_id) {
            tracing::warn!(card = %self.id, entity = %entity_id, error = %e, "Failed to hand off toggle");
            return Err(e.into());
        }
        self.callbacks
            .dispatch_command_issued(&ToggleCommand::new(entity_id.clone()).to_service_call());
        Ok(true)
    }

    /// Cancels any pending temperature command.
    ///
    /// Call when the widget leaves the screen. The card stays usable.
    pub fn detach(&mut self) {
        if self.debouncer.cancel() {
            tracing::debug!(card = %self.id, "Detached with a pending command, dropped");
        }
    }

    /// Builds the render model.
    pub fn view(&self, localize: &dyn Localize) -> RenderState {
        match (&self.status, &self.config, &self.target) {
            (CardStatus::NotFound(entity_id), _, _) => RenderState::NotFound {
                entity_id: entity_id.clone(),
            },
            (CardStatus::Ready, Some(config), Some(target)) => {
                let state = self.state.lock().clone();
                let debug = self.debug_renderer.as_ref().map(|render| render(&state));
                let view = CardView::build(
                    config,
                    &state,
                    target,
                    &self.related,
                    self.host_unit.as_deref(),
                    localize,
                )
                .with_debug(debug);
                RenderState::Card(Box::new(view))
            }
            _ => RenderState::Empty,
        }
    }

    /// Returns the card height in dashboard rows.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        self.config
            .as_ref()
            .map_or_else(|| CardConfig::default().card_size(), CardConfig::card_size)
    }

    /// Re-arms the command withheld while the entity was missing, unless
    /// the reappearing entity already reports the edited value.
    fn resume_edit(&mut self, entity_id: &EntityId, state: &WidgetState) {
        if !state.is_dirty() {
            return;
        }
        let Some(value) = state.displayed().value() else {
            return;
        };
        if let Some(command) = SetTemperatureCommand::new(entity_id.clone(), value) {
            tracing::debug!(card = %self.id, entity = %entity_id, value, "Pending command resumed");
            self.debouncer.request(command.to_service_call(), value);
        }
    }

    fn step_size(&self) -> f64 {
        self.config.as_ref().map_or(1.0, |c| c.step_size)
    }

    fn issue(&self, call: ServiceCall) -> Result<()> {
        if let Err(e) = self.sink.issue_command(call.clone()) {
            tracing::warn!(card = %self.id, call = %call, error = %e, "Failed to hand off command");
            return Err(e.into());
        }
        tracing::debug!(card = %self.id, call = %call, "Command issued");
        self.callbacks.dispatch_command_issued(&call);
        Ok(())
    }

    fn set_status(&mut self, status: CardStatus) {
        if self.status != status {
            self.status = status;
            self.callbacks.dispatch_status_changed(&self.status);
        }
    }
}

impl<S: CommandSink> Subscribable for ThermostatCard<S> {
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&WidgetState) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    fn on_command_issued<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ServiceCall) + Send + Sync + 'static,
    {
        self.callbacks.on_command_issued(callback)
    }

    fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CardStatus) + Send + Sync + 'static,
    {
        self.callbacks.on_status_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<S: CommandSink> fmt::Debug for ThermostatCard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermostatCard")
            .field("id", &self.id)
            .field("entity_id", &self.entity_id)
            .field("status", &self.status)
            .field("state", &*self.state.lock())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}
