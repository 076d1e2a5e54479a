// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enumerated heater/cooler characteristics.
//!
//! Each enum carries the numeric code the home-automation platform uses on
//! the wire, so values can be converted in both directions without lookup
//! tables scattered across the crate.

use std::fmt;

/// Whether the appliance is switched on.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::types::Active;
///
/// assert_eq!(Active::Active.code(), 1);
/// assert_eq!(Active::from_code(0), Some(Active::Inactive));
/// assert_eq!(Active::from(true), Active::Active);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Active {
    /// Appliance is off.
    #[default]
    Inactive,
    /// Appliance is on.
    Active,
}

impl Active {
    /// Returns the platform numeric code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    /// Parses a platform numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Inactive),
            1 => Some(Self::Active),
            _ => None,
        }
    }

    /// Returns the platform constant name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
        }
    }
}

impl From<bool> for Active {
    fn from(value: bool) -> Self {
        if value { Self::Active } else { Self::Inactive }
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the appliance reports it is currently doing.
///
/// This value is reported to the platform only and never synchronized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum CurrentHeaterCoolerState {
    /// Appliance is off.
    #[default]
    Inactive,
    /// Appliance is on but neither heating nor cooling.
    Idle,
    /// Appliance is heating.
    Heating,
    /// Appliance is cooling.
    Cooling,
}

impl CurrentHeaterCoolerState {
    /// Returns the platform numeric code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Idle => 1,
            Self::Heating => 2,
            Self::Cooling => 3,
        }
    }

    /// Parses a platform numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Inactive),
            1 => Some(Self::Idle),
            2 => Some(Self::Heating),
            3 => Some(Self::Cooling),
            _ => None,
        }
    }

    /// Returns the platform constant name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Idle => "IDLE",
            Self::Heating => "HEATING",
            Self::Cooling => "COOLING",
        }
    }
}

impl fmt::Display for CurrentHeaterCoolerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operating mode requested by the user.
///
/// The platform vocabulary includes `Auto`, but the default configuration
/// restricts valid writes to [`Heat`](Self::Heat) and [`Cool`](Self::Cool).
/// `Auto` is kept so that a misconfigured platform cannot produce a value
/// this crate is unable to represent.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::types::TargetHeaterCoolerState;
///
/// assert_eq!(TargetHeaterCoolerState::Cool.code(), 2);
/// assert_eq!(TargetHeaterCoolerState::from_code(1), Some(TargetHeaterCoolerState::Heat));
/// assert_eq!(TargetHeaterCoolerState::from_code(7), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum TargetHeaterCoolerState {
    /// Let the appliance pick heating or cooling.
    Auto,
    /// Heat to the heating threshold.
    Heat,
    /// Cool to the cooling threshold.
    #[default]
    Cool,
}

impl TargetHeaterCoolerState {
    /// Returns the platform numeric code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Heat => 1,
            Self::Cool => 2,
        }
    }

    /// Parses a platform numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Auto),
            1 => Some(Self::Heat),
            2 => Some(Self::Cool),
            _ => None,
        }
    }

    /// Returns the platform constant name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
        }
    }
}

impl fmt::Display for TargetHeaterCoolerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit used by the platform to display temperatures.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum TemperatureDisplayUnits {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureDisplayUnits {
    /// Returns the platform numeric code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Celsius => 0,
            Self::Fahrenheit => 1,
        }
    }

    /// Parses a platform numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Celsius),
            1 => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    /// Returns the platform constant name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "CELSIUS",
            Self::Fahrenheit => "FAHRENHEIT",
        }
    }
}

impl fmt::Display for TemperatureDisplayUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_codes() {
        assert_eq!(Active::Inactive.code(), 0);
        assert_eq!(Active::Active.code(), 1);
        assert_eq!(Active::from_code(1), Some(Active::Active));
        assert_eq!(Active::from_code(2), None);
    }

    #[test]
    fn active_from_bool() {
        assert_eq!(Active::from(false), Active::Inactive);
        assert_eq!(Active::from(true), Active::Active);
    }

    #[test]
    fn current_state_codes_round_trip() {
        for code in 0..4 {
            let state = CurrentHeaterCoolerState::from_code(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert_eq!(CurrentHeaterCoolerState::from_code(4), None);
    }

    #[test]
    fn target_state_codes_follow_platform() {
        assert_eq!(
            TargetHeaterCoolerState::from_code(0),
            Some(TargetHeaterCoolerState::Auto)
        );
        assert_eq!(TargetHeaterCoolerState::Heat.code(), 1);
        assert_eq!(TargetHeaterCoolerState::Cool.code(), 2);
    }

    #[test]
    fn target_state_default_is_cool() {
        assert_eq!(
            TargetHeaterCoolerState::default(),
            TargetHeaterCoolerState::Cool
        );
    }

    #[test]
    fn display_units() {
        assert_eq!(TemperatureDisplayUnits::Fahrenheit.code(), 1);
        assert_eq!(TemperatureDisplayUnits::Celsius.to_string(), "CELSIUS");
        assert_eq!(TemperatureDisplayUnits::from_code(3), None);
    }
}
