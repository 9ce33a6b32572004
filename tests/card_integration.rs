// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests driving a card with synthetic host snapshots.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde_json::json;
use thermostat_card::snapshot::{EntityState, RegistryEntry, Snapshot};
use thermostat_card::subscription::Subscribable;
use thermostat_card::view::NoTranslations;
use thermostat_card::{
    CardConfig, CardStatus, DisplayedValue, Error, ModeCategory, ServiceCall, ThermostatCard,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Card = ThermostatCard<UnboundedSender<ServiceCall>>;

const QUIET: Duration = Duration::from_millis(1000);

fn climate(temperature: Option<f64>) -> Snapshot {
    let mut state = EntityState::new("climate.living_room".parse().unwrap(), "heat")
        .with_attribute("friendly_name", "Living Room")
        .with_attribute("current_temperature", 19.5)
        .with_attribute("hvac_modes", json!(["off", "heat", "auto"]));
    if let Some(t) = temperature {
        state = state.with_attribute("temperature", t);
    }
    Snapshot::new().with_state(state)
}

fn card_with(config: CardConfig) -> (Card, UnboundedReceiver<ServiceCall>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut card = ThermostatCard::new(tx);
    card.set_config(config).unwrap();
    (card, rx)
}

fn card() -> (Card, UnboundedReceiver<ServiceCall>) {
    card_with(CardConfig::new("climate.living_room"))
}

fn drain(rx: &mut UnboundedReceiver<ServiceCall>) -> Vec<ServiceCall> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

// ============================================================================
// Mirroring
// ============================================================================

mod mirroring {
    use super::*;

    #[test]
    fn displayed_value_follows_every_snapshot() {
        let (mut card, mut rx) = card();
        for t in [20.0, 20.5, 22.0, 18.0, 18.0] {
            card.apply_snapshot(&climate(Some(t)));
            let state = card.state();
            assert_eq!(state.displayed(), DisplayedValue::Value(t));
            assert!(!state.is_dirty());
        }
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn missing_temperature_shows_placeholder() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(None));
        assert_eq!(card.state().displayed(), DisplayedValue::Placeholder);

        let view = card.view(&NoTranslations);
        assert_eq!(view.card().unwrap().value_text, "---");
    }

    #[test]
    fn unavailable_entity_shows_placeholder() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(Some(21.0)));

        let unavailable = Snapshot::new().with_state(
            EntityState::new("climate.living_room".parse().unwrap(), "unavailable")
                .with_attribute("temperature", 21.0),
        );
        card.apply_snapshot(&unavailable);
        assert_eq!(card.state().displayed(), DisplayedValue::Placeholder);
    }
}

// ============================================================================
// Optimistic edits and debouncing
// ============================================================================

mod editing {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn edit_is_shown_before_any_command() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        assert_eq!(card.increment().unwrap(), Some(21.0));
        let state = card.state();
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
        assert!(state.is_dirty());

        tokio::time::sleep(QUIET - Duration::from_millis(1)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(card.view(&NoTranslations).card().unwrap().updating);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_produces_one_command_with_final_value() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        for _ in 0..3 {
            card.increment().unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        tokio::time::sleep(QUIET).await;

        let sent = drain(&mut rx);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_string(), "climate.set_temperature");
        assert_eq!(
            sent[0].data,
            json!({"entity_id": "climate.living_room", "temperature": 23.0})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_send_separately() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        card.increment().unwrap();
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        card.decrement().unwrap();
        card.decrement().unwrap();
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;

        let temperatures: Vec<_> = drain(&mut rx)
            .iter()
            .map(|c| c.field("temperature").cloned().unwrap())
            .collect();
        assert_eq!(temperatures, [json!(21.0), json!(19.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn fractional_steps_are_exact() {
        let (mut card, mut rx) = card_with(CardConfig::new("climate.living_room").with_step_size(0.1));
        card.apply_snapshot(&climate(Some(20.0)));

        for _ in 0..3 {
            card.increment().unwrap();
        }
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;

        assert_eq!(drain(&mut rx)[0].field("temperature"), Some(&json!(20.3)));
    }

    #[tokio::test(start_paused = true)]
    async fn sent_command_clears_dirty() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        let notifications = Arc::new(AtomicU32::new(0));
        let notifications_clone = Arc::clone(&notifications);
        card.on_state_changed(move |_| {
            notifications_clone.fetch_add(1, Ordering::SeqCst);
        });

        card.increment().unwrap();
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;

        assert!(!card.state().is_dirty());
        // the edit and the settle
        assert_eq!(notifications.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_on_placeholder_is_ignored() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(None));

        assert_eq!(card.increment().unwrap(), None);
        assert!(!card.state().is_dirty());
        assert!(!card.has_pending_command());
        tokio::time::sleep(QUIET * 2).await;
        assert!(drain(&mut rx).is_empty());
    }
}

// ============================================================================
// Reconciliation against snapshots
// ============================================================================

mod reconciliation {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stale_snapshot_does_not_snap_back() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();

        card.apply_snapshot(&climate(Some(20.0)));
        let state = card.state();
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
        assert!(state.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn matching_snapshot_makes_clean() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();
        card.apply_snapshot(&climate(Some(20.0)));

        card.apply_snapshot(&climate(Some(21.0)));
        let state = card.state();
        assert_eq!(state.displayed(), DisplayedValue::Value(21.0));
        assert!(!state.is_dirty());

        // back to mirroring
        card.apply_snapshot(&climate(Some(18.5)));
        assert_eq!(card.state().displayed(), DisplayedValue::Value(18.5));
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_before_timer_still_sends_once() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();

        // another client set the same value meanwhile
        card.apply_snapshot(&climate(Some(21.0)));
        assert!(!card.state().is_dirty());

        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        assert_eq!(drain(&mut rx).len(), 1);
        assert!(!card.state().is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn late_edit_supersedes_armed_timer() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        card.increment().unwrap();
        tokio::time::sleep(QUIET - Duration::from_millis(1)).await;
        card.increment().unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        // the first timer was superseded
        assert!(drain(&mut rx).is_empty());
        assert!(card.state().is_dirty());
        assert_eq!(card.state().pending_command_value(), Some(22.0));
    }
}

// ============================================================================
// Modes
// ============================================================================

mod modes {
    use super::*;

    fn water_heater() -> Snapshot {
        Snapshot::from_json(
            r#"{
                "states": {
                    "water_heater.boiler": {
                        "state": "eco",
                        "attributes": {
                            "temperature": 55,
                            "supported_features": 7,
                            "operation_list": ["eco", "electric", "off"],
                            "operation_mode": "eco",
                            "away_mode": "off"
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn current_mode_issues_nothing() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        assert!(!card.select_mode(ModeCategory::Primary, "heat").unwrap());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn distinct_mode_issues_immediately() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        assert!(card.select_mode(ModeCategory::Primary, "off").unwrap());
        assert!(card.select_mode(ModeCategory::Primary, "auto").unwrap());
        let sent = drain(&mut rx);
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[0].data,
            json!({"entity_id": "climate.living_room", "hvac_mode": "off"})
        );
    }

    #[test]
    fn water_heater_uses_its_own_verbs() {
        let (mut card, mut rx) = card_with(CardConfig::new("water_heater.boiler"));
        card.apply_snapshot(&water_heater());

        assert!(!card.select_mode(ModeCategory::Primary, "eco").unwrap());
        assert!(card.select_mode(ModeCategory::Primary, "electric").unwrap());
        assert!(card.select_mode(ModeCategory::Away, "on").unwrap());

        let sent = drain(&mut rx);
        assert_eq!(sent[0].to_string(), "water_heater.set_operation_mode");
        assert_eq!(sent[1].to_string(), "water_heater.set_away_mode");
        assert_eq!(sent[1].field("away_mode"), Some(&json!(true)));
    }

    #[tokio::test(start_paused = true)]
    async fn water_heater_temperature() {
        let (mut card, mut rx) = card_with(CardConfig::new("water_heater.boiler"));
        card.apply_snapshot(&water_heater());

        card.decrement().unwrap();
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;

        let sent = drain(&mut rx);
        assert_eq!(sent[0].to_string(), "water_heater.set_temperature");
        assert_eq!(sent[0].field("temperature"), Some(&json!(54.0)));
    }

    #[test]
    fn unknown_value_is_an_error() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        assert!(matches!(
            card.select_mode(ModeCategory::Primary, "turbo"),
            Err(Error::Mode(_))
        ));
        assert!(drain(&mut rx).is_empty());
    }
}

// ============================================================================
// Entity lookup
// ============================================================================

mod lookup {
    use super::*;

    #[test]
    fn missing_entity_is_not_fatal() {
        let (mut card, mut rx) = card();
        let status = card.apply_snapshot(&Snapshot::new());

        assert_eq!(
            status,
            CardStatus::NotFound("climate.living_room".parse().unwrap())
        );
        assert_eq!(
            card.view(&NoTranslations).to_string(),
            "Entity not found: climate.living_room"
        );
        assert!(matches!(card.increment(), Err(Error::NotReady)));
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_entity_withholds_pending_command() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();

        card.apply_snapshot(&Snapshot::new());
        assert!(!card.has_pending_command());
        tokio::time::sleep(QUIET * 3).await;
        assert!(drain(&mut rx).is_empty());
        assert!(card.state().is_dirty());

        // back with the old value: the edit survives and is sent
        assert_eq!(card.apply_snapshot(&climate(Some(20.0))), CardStatus::Ready);
        assert_eq!(card.state().displayed(), DisplayedValue::Value(21.0));
        assert!(card.has_pending_command());

        tokio::time::sleep(QUIET + Duration::from_millis(1)).await;
        let sent = drain(&mut rx);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].field("temperature"), Some(&json!(21.0)));
        assert!(!card.state().is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn reappearing_entity_can_confirm_withheld_edit() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();
        card.apply_snapshot(&Snapshot::new());

        card.apply_snapshot(&climate(Some(21.0)));
        assert!(!card.state().is_dirty());
        assert!(!card.has_pending_command());

        tokio::time::sleep(QUIET * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn related_switches_are_listed_and_toggled() {
        let snapshot = climate(Some(20.0))
            .with_state(
                EntityState::new("switch.living_room_quiet".parse().unwrap(), "on")
                    .with_attribute("device_class", "switch")
                    .with_attribute("friendly_name", "a1b2c3d4e5f6 Quiet"),
            )
            .with_registry_entry(RegistryEntry::new(
                "climate.living_room".parse().unwrap(),
                "midea_ac",
                "device-1",
            ))
            .with_registry_entry(RegistryEntry::new(
                "switch.living_room_quiet".parse().unwrap(),
                "midea_ac",
                "device-1",
            ));

        let (mut card, mut rx) =
            card_with(CardConfig::new("climate.living_room").with_related_entities(true));
        card.apply_snapshot(&snapshot);

        let view = card.view(&NoTranslations);
        let related = &view.card().unwrap().related;
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Quiet");
        assert_eq!(related[0].icon.as_deref(), Some("mdi:headphones"));

        assert!(card.toggle_related(&related[0].entity_id).unwrap());
        let sent = drain(&mut rx);
        assert_eq!(
            sent[0].data,
            json!({"entity_id": "switch.living_room_quiet"})
        );
    }
}

// ============================================================================
// Reconfiguration
// ============================================================================

mod reconfiguration {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn repeated_config_keeps_edit_in_flight() {
        let config = CardConfig::new("climate.living_room");
        let (mut card, mut rx) = card_with(config.clone());
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();

        card.set_config(config).unwrap();
        assert_eq!(card.status(), &CardStatus::Ready);
        let view = card.view(&NoTranslations);
        let view = view.card().unwrap();
        assert_eq!(view.value_text, "21");
        assert!(view.updating);

        // a stale snapshot still cannot roll the edit back
        card.apply_snapshot(&climate(Some(20.0)));
        assert_eq!(card.state().displayed(), DisplayedValue::Value(21.0));

        tokio::time::sleep(QUIET * 3).await;
        let sent = drain(&mut rx);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].field("temperature"), Some(&json!(21.0)));
    }

    #[test]
    fn repeated_config_updates_display_options() {
        let (mut card, _rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));

        card.set_config(CardConfig::new("climate.living_room").with_name("Lounge"))
            .unwrap();
        let view = card.view(&NoTranslations);
        assert_eq!(view.card().unwrap().title.as_deref(), Some("Lounge"));
    }
}

// ============================================================================
// Detach
// ============================================================================

mod detach {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn detach_cancels_pending_command() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();
        assert!(card.has_pending_command());

        card.detach();
        assert!(!card.has_pending_command());
        tokio::time::sleep(QUIET * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_card_cancels_pending_command() {
        let (mut card, mut rx) = card();
        card.apply_snapshot(&climate(Some(20.0)));
        card.increment().unwrap();

        drop(card);
        tokio::time::sleep(QUIET * 3).await;
        assert!(rx.try_recv().is_err());
    }
}
