// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change notification payload.

use crate::types::{Characteristic, CharacteristicValue};

/// A write that was applied to the state mirror.
///
/// Delivered to every subscriber of
/// [`DeviceStateStore`](super::DeviceStateStore) after the write completes.
/// A change is emitted for every successful write, even when the new value
/// equals the old one.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::state::StateChange;
/// use heater_cooler_bridge::types::{Characteristic, CharacteristicValue};
///
/// let change = StateChange::new(Characteristic::RotationSpeed, CharacteristicValue::Integer(3));
/// assert!(change.is_synchronized());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateChange {
    /// The characteristic that was written.
    pub characteristic: Characteristic,
    /// The value now stored.
    pub value: CharacteristicValue,
}

impl StateChange {
    /// Creates a state change.
    #[must_use]
    pub fn new(characteristic: Characteristic, value: CharacteristicValue) -> Self {
        Self {
            characteristic,
            value,
        }
    }

    /// Returns `true` if the written characteristic feeds the wire parameters.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.characteristic.is_synchronized()
    }
}

impl std::fmt::Display for StateChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.characteristic, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Active;

    #[test]
    fn display() {
        let change = StateChange::new(Characteristic::Active, Active::Active.into());
        assert_eq!(change.to_string(), "active = ACTIVE");
    }

    #[test]
    fn reported_only_change_is_not_synchronized() {
        let change = StateChange::new(Characteristic::CurrentTemperature, 19.5_f64.into());
        assert!(!change.is_synchronized());
    }
}
