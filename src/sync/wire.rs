// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping from the state mirror to the appliance's query parameters.

use std::fmt;

use crate::state::HeaterCoolerState;
use crate::types::{Active, TargetHeaterCoolerState};

/// Operating mode understood by the remote appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `mode=1`
    Cool,
    /// `mode=2`
    Heat,
}

impl Mode {
    /// Returns the wire value.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Cool => 1,
            Self::Heat => 2,
        }
    }
}

/// Query parameters of one synchronization request.
///
/// Always derived from a full [`HeaterCoolerState`], never stored.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::state::HeaterCoolerState;
/// use heater_cooler_bridge::sync::{Mode, WireParameters};
///
/// let state = HeaterCoolerState {
///     cooling_threshold_temperature: 22,
///     ..HeaterCoolerState::default()
/// };
/// let params = WireParameters::from_state(&state);
/// assert_eq!(params.mode, Some(Mode::Cool));
/// assert_eq!(params.temp, Some(22));
/// assert_eq!(params.to_query_string(), "power=0&mode=1&temp=22&fan=2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireParameters {
    /// 1 when active, 0 otherwise.
    pub power: u8,
    /// Absent when the target state is neither cool nor heat.
    pub mode: Option<Mode>,
    /// Threshold of the selected mode. Absent together with `mode`.
    pub temp: Option<i32>,
    /// Fan speed, copied verbatim.
    pub fan: i32,
}

impl WireParameters {
    /// Derives the parameters from the current state.
    ///
    /// An `Auto` target has no wire representation: `mode` and `temp` are
    /// omitted and a warning is logged.
    #[must_use]
    pub fn from_state(state: &HeaterCoolerState) -> Self {
        let power = u8::from(state.active == Active::Active);

        let (mode, temp) = match state.target_heater_cooler_state {
            TargetHeaterCoolerState::Cool => {
                (Some(Mode::Cool), Some(state.cooling_threshold_temperature))
            }
            TargetHeaterCoolerState::Heat => {
                (Some(Mode::Heat), Some(state.heating_threshold_temperature))
            }
            TargetHeaterCoolerState::Auto => {
                tracing::warn!(
                    target_state = %state.target_heater_cooler_state,
                    "Target state has no wire mode, omitting mode and temp"
                );
                (None, None)
            }
        };

        Self {
            power,
            mode,
            temp,
            fan: state.rotation_speed,
        }
    }

    /// Returns the parameters in wire order, skipping absent ones.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, i32)> {
        let mut pairs = vec![("power", i32::from(self.power))];
        if let Some(mode) = self.mode {
            pairs.push(("mode", i32::from(mode.code())));
        }
        if let Some(temp) = self.temp {
            pairs.push(("temp", temp));
        }
        pairs.push(("fan", self.fan));
        pairs
    }

    /// Renders the parameters as a URL query string (without `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for WireParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
