// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic keys and values.
//!
//! The platform addresses accessory state by key name. [`Characteristic`] is
//! the closed set of those names: every lookup goes through an exhaustive
//! `match`, so adding a field is a compile error everywhere it is not handled.

use std::fmt;
use std::str::FromStr;

use crate::error::{StateError, ValueError};

use super::{Active, CurrentHeaterCoolerState, TargetHeaterCoolerState, TemperatureDisplayUnits};

/// A characteristic of the heater/cooler accessory.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::types::Characteristic;
///
/// let key: Characteristic = "rotationSpeed".parse().unwrap();
/// assert_eq!(key, Characteristic::RotationSpeed);
/// assert_eq!(key.as_str(), "rotationSpeed");
///
/// assert!("swingMode".parse::<Characteristic>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Characteristic {
    /// Power on/off.
    Active,
    /// Reported operating state.
    CurrentHeaterCoolerState,
    /// Requested operating mode.
    TargetHeaterCoolerState,
    /// Fan speed.
    RotationSpeed,
    /// Reported room temperature.
    CurrentTemperature,
    /// Target temperature while cooling.
    CoolingThresholdTemperature,
    /// Target temperature while heating.
    HeatingThresholdTemperature,
    /// Unit used for display.
    TemperatureDisplayUnits,
}

impl Characteristic {
    /// Every characteristic, in registration order.
    pub const ALL: [Self; 8] = [
        Self::Active,
        Self::CurrentHeaterCoolerState,
        Self::TargetHeaterCoolerState,
        Self::RotationSpeed,
        Self::CurrentTemperature,
        Self::CoolingThresholdTemperature,
        Self::HeatingThresholdTemperature,
        Self::TemperatureDisplayUnits,
    ];

    /// Returns the platform key name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CurrentHeaterCoolerState => "currentHeaterCoolerState",
            Self::TargetHeaterCoolerState => "targetHeaterCoolerState",
            Self::RotationSpeed => "rotationSpeed",
            Self::CurrentTemperature => "currentTemperature",
            Self::CoolingThresholdTemperature => "coolingThresholdTemperature",
            Self::HeatingThresholdTemperature => "heatingThresholdTemperature",
            Self::TemperatureDisplayUnits => "temperatureDisplayUnits",
        }
    }

    /// Returns the kind of value stored for this characteristic.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Active => ValueKind::Active,
            Self::CurrentHeaterCoolerState => ValueKind::CurrentState,
            Self::TargetHeaterCoolerState => ValueKind::TargetState,
            Self::RotationSpeed
            | Self::CoolingThresholdTemperature
            | Self::HeatingThresholdTemperature => ValueKind::Integer,
            Self::CurrentTemperature => ValueKind::Float,
            Self::TemperatureDisplayUnits => ValueKind::DisplayUnits,
        }
    }

    /// Returns `true` if the state mirror accepts writes to this characteristic.
    ///
    /// The display unit is fixed by configuration.
    #[must_use]
    pub const fn accepts_writes(&self) -> bool {
        !matches!(self, Self::TemperatureDisplayUnits)
    }

    /// Returns `true` if the platform should register a write handler.
    ///
    /// Reported-only characteristics get a read handler only. The display
    /// unit gets a write handler that always rejects.
    #[must_use]
    pub const fn has_write_handler(&self) -> bool {
        !matches!(
            self,
            Self::CurrentHeaterCoolerState | Self::CurrentTemperature
        )
    }

    /// Returns `true` if the value feeds the outbound wire parameters.
    #[must_use]
    pub const fn is_synchronized(&self) -> bool {
        matches!(
            self,
            Self::Active
                | Self::TargetHeaterCoolerState
                | Self::RotationSpeed
                | Self::CoolingThresholdTemperature
                | Self::HeatingThresholdTemperature
        )
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Characteristic {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StateError::UnknownKey(s.to_string()))
    }
}

/// The kind of value a characteristic stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Active`] enum.
    Active,
    /// [`CurrentHeaterCoolerState`] enum.
    CurrentState,
    /// [`TargetHeaterCoolerState`] enum.
    TargetState,
    /// [`TemperatureDisplayUnits`] enum.
    DisplayUnits,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::CurrentState => "current state",
            Self::TargetState => "target state",
            Self::DisplayUnits => "display units",
            Self::Integer => "integer",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// A value read from or written to a characteristic.
///
/// Integer characteristics store whatever the platform sends, including
/// values outside the configured range. Range enforcement belongs to the
/// platform (see [`CharacteristicProps`](crate::config::CharacteristicProps)).
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::types::{Characteristic, CharacteristicValue, TargetHeaterCoolerState};
///
/// let value = CharacteristicValue::from_code(Characteristic::TargetHeaterCoolerState, 1.0).unwrap();
/// assert_eq!(value, CharacteristicValue::TargetState(TargetHeaterCoolerState::Heat));
/// assert!((value.code() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CharacteristicValue {
    /// Value of [`Characteristic::Active`].
    Active(Active),
    /// Value of [`Characteristic::CurrentHeaterCoolerState`].
    CurrentState(CurrentHeaterCoolerState),
    /// Value of [`Characteristic::TargetHeaterCoolerState`].
    TargetState(TargetHeaterCoolerState),
    /// Value of [`Characteristic::TemperatureDisplayUnits`].
    DisplayUnits(TemperatureDisplayUnits),
    /// Value of an integer characteristic.
    Integer(i32),
    /// Value of a floating point characteristic.
    Float(f64),
}

impl CharacteristicValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Active(_) => ValueKind::Active,
            Self::CurrentState(_) => ValueKind::CurrentState,
            Self::TargetState(_) => ValueKind::TargetState,
            Self::DisplayUnits(_) => ValueKind::DisplayUnits,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
        }
    }

    /// Converts a raw platform number into the value type of `characteristic`.
    ///
    /// Enum characteristics require one of their known codes. Integer
    /// characteristics round to the nearest whole number and saturate at the
    /// `i32` bounds rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinity, and
    /// `ValueError::InvalidCode` for an unknown enum code.
    pub fn from_code(characteristic: Characteristic, raw: f64) -> Result<Self, ValueError> {
        if !raw.is_finite() {
            return Err(ValueError::NotFinite(characteristic));
        }

        let invalid = || ValueError::InvalidCode {
            characteristic,
            code: raw,
        };

        match characteristic.kind() {
            ValueKind::Active => enum_code(raw)
                .and_then(Active::from_code)
                .map(Self::Active)
                .ok_or_else(invalid),
            ValueKind::CurrentState => enum_code(raw)
                .and_then(CurrentHeaterCoolerState::from_code)
                .map(Self::CurrentState)
                .ok_or_else(invalid),
            ValueKind::TargetState => enum_code(raw)
                .and_then(TargetHeaterCoolerState::from_code)
                .map(Self::TargetState)
                .ok_or_else(invalid),
            ValueKind::DisplayUnits => enum_code(raw)
                .and_then(TemperatureDisplayUnits::from_code)
                .map(Self::DisplayUnits)
                .ok_or_else(invalid),
            // `as` saturates on overflow
            #[allow(clippy::cast_possible_truncation)]
            ValueKind::Integer => Ok(Self::Integer(raw.round() as i32)),
            ValueKind::Float => Ok(Self::Float(raw)),
        }
    }

    /// Returns the raw platform number for this value.
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::Active(v) => f64::from(v.code()),
            Self::CurrentState(v) => f64::from(v.code()),
            Self::TargetState(v) => f64::from(v.code()),
            Self::DisplayUnits(v) => f64::from(v.code()),
            Self::Integer(v) => f64::from(*v),
            Self::Float(v) => *v,
        }
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(v) => write!(f, "{v}"),
            Self::CurrentState(v) => write!(f, "{v}"),
            Self::TargetState(v) => write!(f, "{v}"),
            Self::DisplayUnits(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<Active> for CharacteristicValue {
    fn from(value: Active) -> Self {
        Self::Active(value)
    }
}

impl From<CurrentHeaterCoolerState> for CharacteristicValue {
    fn from(value: CurrentHeaterCoolerState) -> Self {
        Self::CurrentState(value)
    }
}

impl From<TargetHeaterCoolerState> for CharacteristicValue {
    fn from(value: TargetHeaterCoolerState) -> Self {
        Self::TargetState(value)
    }
}

impl From<TemperatureDisplayUnits> for CharacteristicValue {
    fn from(value: TemperatureDisplayUnits) -> Self {
        Self::DisplayUnits(value)
    }
}

impl From<i32> for CharacteristicValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Returns the enum code for a whole number in `u8` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn enum_code(raw: f64) -> Option<u8> {
    if raw.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&raw) {
        return None;
    }
    Some(raw as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_key() {
        for characteristic in Characteristic::ALL {
            let parsed: Characteristic = characteristic.as_str().parse().unwrap();
            assert_eq!(parsed, characteristic);
        }
    }

    #[test]
    fn parse_unknown_key() {
        let err = "swingMode".parse::<Characteristic>().unwrap_err();
        assert_eq!(err, StateError::UnknownKey("swingMode".to_string()));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("RotationSpeed".parse::<Characteristic>().is_err());
    }

    #[test]
    fn kinds_match_fields() {
        assert_eq!(Characteristic::RotationSpeed.kind(), ValueKind::Integer);
        assert_eq!(Characteristic::CurrentTemperature.kind(), ValueKind::Float);
        assert_eq!(
            Characteristic::TemperatureDisplayUnits.kind(),
            ValueKind::DisplayUnits
        );
    }

    #[test]
    fn only_display_units_rejects_writes() {
        let rejecting: Vec<_> = Characteristic::ALL
            .into_iter()
            .filter(|c| !c.accepts_writes())
            .collect();
        assert_eq!(rejecting, vec![Characteristic::TemperatureDisplayUnits]);
    }

    #[test]
    fn reported_only_have_no_write_handler() {
        assert!(!Characteristic::CurrentHeaterCoolerState.has_write_handler());
        assert!(!Characteristic::CurrentTemperature.has_write_handler());
        assert!(Characteristic::TemperatureDisplayUnits.has_write_handler());
        assert!(Characteristic::Active.has_write_handler());
    }

    #[test]
    fn synchronized_characteristics() {
        assert!(Characteristic::RotationSpeed.is_synchronized());
        assert!(!Characteristic::CurrentTemperature.is_synchronized());
        assert!(!Characteristic::TemperatureDisplayUnits.is_synchronized());
    }

    #[test]
    fn from_code_enums() {
        assert_eq!(
            CharacteristicValue::from_code(Characteristic::Active, 1.0),
            Ok(CharacteristicValue::Active(Active::Active))
        );
        assert_eq!(
            CharacteristicValue::from_code(Characteristic::CurrentHeaterCoolerState, 3.0),
            Ok(CharacteristicValue::CurrentState(
                CurrentHeaterCoolerState::Cooling
            ))
        );
    }

    #[test]
    fn from_code_rejects_unknown_enum_code() {
        let err = CharacteristicValue::from_code(Characteristic::TargetHeaterCoolerState, 5.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ValueError::InvalidCode {
                characteristic: Characteristic::TargetHeaterCoolerState,
                ..
            }
        ));
    }

    #[test]
    fn from_code_rejects_fractional_enum_code() {
        assert!(CharacteristicValue::from_code(Characteristic::Active, 0.5).is_err());
        assert!(CharacteristicValue::from_code(Characteristic::Active, -1.0).is_err());
    }

    #[test]
    fn from_code_rejects_non_finite() {
        assert_eq!(
            CharacteristicValue::from_code(Characteristic::RotationSpeed, f64::NAN),
            Err(ValueError::NotFinite(Characteristic::RotationSpeed))
        );
    }

    #[test]
    fn from_code_keeps_out_of_range_integers() {
        assert_eq!(
            CharacteristicValue::from_code(Characteristic::RotationSpeed, 99.0),
            Ok(CharacteristicValue::Integer(99))
        );
        assert_eq!(
            CharacteristicValue::from_code(Characteristic::CoolingThresholdTemperature, 1e12),
            Ok(CharacteristicValue::Integer(i32::MAX))
        );
    }

    #[test]
    fn from_code_keeps_float_precision() {
        let value =
            CharacteristicValue::from_code(Characteristic::CurrentTemperature, 21.3).unwrap();
        assert!(matches!(value, CharacteristicValue::Float(v) if v.to_bits() == 21.3_f64.to_bits()));
        assert_eq!(value.code().to_bits(), 21.3_f64.to_bits());
    }

    #[test]
    fn code_round_trips_enum_value() {
        let value = CharacteristicValue::DisplayUnits(TemperatureDisplayUnits::Fahrenheit);
        assert!((value.code() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn value_display() {
        assert_eq!(CharacteristicValue::Integer(22).to_string(), "22");
        assert_eq!(
            CharacteristicValue::TargetState(TargetHeaterCoolerState::Heat).to_string(),
            "HEAT"
        );
    }
}
