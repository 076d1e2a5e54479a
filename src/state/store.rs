// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared owner of the state mirror.

use parking_lot::RwLock;

use crate::error::StateError;
use crate::subscription::{ChangeListeners, SubscriptionId};
use crate::types::{Characteristic, CharacteristicValue};

use super::{HeaterCoolerState, StateChange};

/// Thread-safe owner of the [`HeaterCoolerState`] mirror.
///
/// All reads and writes are serialized through a single lock, so a read
/// always observes the most recent completed write. Subscribers are
/// notified after the lock has been released.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::state::{DeviceStateStore, HeaterCoolerState};
/// use heater_cooler_bridge::types::CharacteristicValue;
///
/// let store = DeviceStateStore::new(HeaterCoolerState::default());
/// store.set("rotationSpeed", CharacteristicValue::Integer(3)).unwrap();
/// assert_eq!(store.get("rotationSpeed").unwrap(), CharacteristicValue::Integer(3));
///
/// assert!(store.get("swingMode").is_err());
/// ```
#[derive(Debug)]
pub struct DeviceStateStore {
    state: RwLock<HeaterCoolerState>,
    listeners: ChangeListeners,
}

impl DeviceStateStore {
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: HeaterCoolerState) -> Self {
        Self {
            state: RwLock::new(initial),
            listeners: ChangeListeners::new(),
        }
    }

    /// Returns the current value for a platform key.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnknownKey` if `key` is not a characteristic name.
    pub fn get(&self, key: &str) -> Result<CharacteristicValue, StateError> {
        let characteristic: Characteristic = key.parse()?;
        Ok(self.value(characteristic))
    }

    /// Returns the current value of a characteristic.
    #[must_use]
    pub fn value(&self, characteristic: Characteristic) -> CharacteristicValue {
        self.state.read().get(characteristic)
    }

    /// Overwrites the value for a platform key and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnknownKey` for an unknown key, plus the errors
    /// of [`set_value`](Self::set_value).
    pub fn set(&self, key: &str, value: CharacteristicValue) -> Result<(), StateError> {
        let characteristic: Characteristic = key.parse()?;
        self.set_value(characteristic, value)
    }

    /// Overwrites a characteristic and notifies subscribers.
    ///
    /// The value is not range-checked. Subscribers are notified on every
    /// successful write, including writes that do not change the value.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnsupportedWrite` for the display unit and
    /// `StateError::TypeMismatch` for a value of the wrong kind. Nothing is
    /// stored and nobody is notified in either case.
    pub fn set_value(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), StateError> {
        tracing::debug!(
            characteristic = %characteristic,
            value = %value,
            "Setting characteristic"
        );

        self.state.write().apply(characteristic, value)?;
        self.listeners
            .dispatch(&StateChange::new(characteristic, value));
        Ok(())
    }

    /// Returns a copy of the whole mirror.
    #[must_use]
    pub fn snapshot(&self) -> HeaterCoolerState {
        *self.state.read()
    }

    /// Registers a callback invoked after every successful write.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Removes a subscription.
    ///
    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for DeviceStateStore {
    fn default() -> Self {
        Self::new(HeaterCoolerState::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::types::{Active, TargetHeaterCoolerState, TemperatureDisplayUnits};

    #[test]
    fn get_by_key() {
        let store = DeviceStateStore::default();
        assert_eq!(
            store.get("targetHeaterCoolerState").unwrap(),
            CharacteristicValue::TargetState(TargetHeaterCoolerState::Cool)
        );
    }

    #[test]
    fn get_unknown_key() {
        let store = DeviceStateStore::default();
        assert_eq!(
            store.get("swingMode"),
            Err(StateError::UnknownKey("swingMode".to_string()))
        );
    }

    #[test]
    fn set_unknown_key() {
        let store = DeviceStateStore::default();
        let err = store.set("swingMode", 1.into()).unwrap_err();
        assert_eq!(err, StateError::UnknownKey("swingMode".to_string()));
    }

    #[test]
    fn set_is_visible_immediately() {
        let store = DeviceStateStore::default();
        store.set("active", Active::Active.into()).unwrap();
        assert_eq!(
            store.get("active").unwrap(),
            CharacteristicValue::Active(Active::Active)
        );
        assert_eq!(store.snapshot().active, Active::Active);
    }

    #[test]
    fn display_units_never_change() {
        let store = DeviceStateStore::default();
        for _ in 0..3 {
            let result = store.set(
                "temperatureDisplayUnits",
                TemperatureDisplayUnits::Fahrenheit.into(),
            );
            assert!(matches!(result, Err(StateError::UnsupportedWrite(_))));
        }
        assert_eq!(
            store.value(Characteristic::TemperatureDisplayUnits),
            CharacteristicValue::DisplayUnits(TemperatureDisplayUnits::Celsius)
        );
    }

    #[test]
    fn subscribers_notified_on_every_write() {
        let store = DeviceStateStore::default();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        store.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.set("rotationSpeed", 2.into()).unwrap();
        store.set("rotationSpeed", 2.into()).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn rejected_write_does_not_notify() {
        let store = DeviceStateStore::default();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        store.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let _ = store.set("temperatureDisplayUnits", TemperatureDisplayUnits::Celsius.into());
        let _ = store.set("rotationSpeed", Active::Active.into());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscriber_can_read_store() {
        let store = Arc::new(DeviceStateStore::default());
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let seen_clone = seen.clone();
        let weak = Arc::downgrade(&store);

        store.subscribe(move |_| {
            if let Some(store) = weak.upgrade() {
                *seen_clone.lock() = Some(store.snapshot().rotation_speed);
            }
        });

        store.set("rotationSpeed", 3.into()).unwrap();
        assert_eq!(*seen.lock(), Some(3));
    }

    #[test]
    fn unsubscribe() {
        let store = DeviceStateStore::default();
        let id = store.subscribe(|_| {});
        assert_eq!(store.subscriber_count(), 1);
        assert!(store.unsubscribe(id));
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn concurrent_writers_are_serialized() {
        let store = Arc::new(DeviceStateStore::default());
        let handles: Vec<_> = (17..=30)
            .map(|temp| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .set("coolingThresholdTemperature", temp.into())
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let CharacteristicValue::Integer(temp) =
            store.value(Characteristic::CoolingThresholdTemperature)
        else {
            panic!("threshold should be an integer");
        };
        assert!((17..=30).contains(&temp));
    }
}
