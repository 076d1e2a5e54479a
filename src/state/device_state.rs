// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Desired state of the heater/cooler.

use crate::error::StateError;
use crate::types::{
    Active, Characteristic, CharacteristicValue, CurrentHeaterCoolerState,
    TargetHeaterCoolerState, TemperatureDisplayUnits,
};

/// The desired state of the appliance, as presented to the platform.
///
/// Every field always holds a value: there is no "unknown" state. The struct
/// is plain data; shared access goes through
/// [`DeviceStateStore`](super::DeviceStateStore).
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::state::HeaterCoolerState;
/// use heater_cooler_bridge::types::{Active, Characteristic, CharacteristicValue};
///
/// let mut state = HeaterCoolerState::default();
/// assert_eq!(state.active, Active::Inactive);
///
/// state.apply(Characteristic::Active, CharacteristicValue::Active(Active::Active)).unwrap();
/// assert_eq!(state.active, Active::Active);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaterCoolerState {
    /// Power on/off.
    pub active: Active,
    /// Reported operating state.
    pub current_heater_cooler_state: CurrentHeaterCoolerState,
    /// Requested operating mode.
    pub target_heater_cooler_state: TargetHeaterCoolerState,
    /// Fan speed (1-3 with the default configuration).
    pub rotation_speed: i32,
    /// Reported room temperature.
    pub current_temperature: f64,
    /// Target temperature while cooling.
    pub cooling_threshold_temperature: i32,
    /// Target temperature while heating.
    pub heating_threshold_temperature: i32,
    /// Display unit, fixed by configuration.
    pub temperature_display_units: TemperatureDisplayUnits,
}

impl HeaterCoolerState {
    /// Default fan speed.
    pub const DEFAULT_ROTATION_SPEED: i32 = 2;
    /// Default value of every temperature field.
    pub const DEFAULT_TEMPERATURE: i32 = 25;

    /// Creates the start-up state with the given display unit.
    #[must_use]
    pub fn new(temperature_display_units: TemperatureDisplayUnits) -> Self {
        Self {
            temperature_display_units,
            ..Self::default()
        }
    }

    /// Returns the value of a characteristic.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> CharacteristicValue {
        match characteristic {
            Characteristic::Active => self.active.into(),
            Characteristic::CurrentHeaterCoolerState => self.current_heater_cooler_state.into(),
            Characteristic::TargetHeaterCoolerState => self.target_heater_cooler_state.into(),
            Characteristic::RotationSpeed => self.rotation_speed.into(),
            Characteristic::CurrentTemperature => self.current_temperature.into(),
            Characteristic::CoolingThresholdTemperature => {
                self.cooling_threshold_temperature.into()
            }
            Characteristic::HeatingThresholdTemperature => {
                self.heating_threshold_temperature.into()
            }
            Characteristic::TemperatureDisplayUnits => self.temperature_display_units.into(),
        }
    }

    /// Overwrites a characteristic.
    ///
    /// No range checks are performed. The only rejections are a value of
    /// the wrong kind and a write to the display unit.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnsupportedWrite` for the display unit and
    /// `StateError::TypeMismatch` if `value` has the wrong kind. The state
    /// is left untouched in both cases.
    pub fn apply(
        &mut self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), StateError> {
        if !characteristic.accepts_writes() {
            return Err(StateError::UnsupportedWrite(characteristic));
        }

        match (characteristic, value) {
            (Characteristic::Active, CharacteristicValue::Active(v)) => self.active = v,
            (Characteristic::CurrentHeaterCoolerState, CharacteristicValue::CurrentState(v)) => {
                self.current_heater_cooler_state = v;
            }
            (Characteristic::TargetHeaterCoolerState, CharacteristicValue::TargetState(v)) => {
                self.target_heater_cooler_state = v;
            }
            (Characteristic::RotationSpeed, CharacteristicValue::Integer(v)) => {
                self.rotation_speed = v;
            }
            (Characteristic::CurrentTemperature, CharacteristicValue::Float(v)) => {
                self.current_temperature = v;
            }
            (Characteristic::CoolingThresholdTemperature, CharacteristicValue::Integer(v)) => {
                self.cooling_threshold_temperature = v;
            }
            (Characteristic::HeatingThresholdTemperature, CharacteristicValue::Integer(v)) => {
                self.heating_threshold_temperature = v;
            }
            _ => {
                return Err(StateError::TypeMismatch {
                    characteristic,
                    expected: characteristic.kind(),
                    actual: value.kind(),
                });
            }
        }
        Ok(())
    }
}

impl Default for HeaterCoolerState {
    fn default() -> Self {
        Self {
            active: Active::Inactive,
            current_heater_cooler_state: CurrentHeaterCoolerState::Inactive,
            target_heater_cooler_state: TargetHeaterCoolerState::Cool,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
            current_temperature: f64::from(Self::DEFAULT_TEMPERATURE),
            cooling_threshold_temperature: Self::DEFAULT_TEMPERATURE,
            heating_threshold_temperature: Self::DEFAULT_TEMPERATURE,
            temperature_display_units: TemperatureDisplayUnits::Celsius,
        }
    }
}
