// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed values for the heater/cooler accessory.
//!
//! This module provides the closed set of characteristic keys exposed to the
//! home-automation platform, and the enum types whose numeric codes travel
//! across that platform boundary.

mod characteristic;
mod heater_cooler;

pub use characteristic::{Characteristic, CharacteristicValue, ValueKind};
pub use heater_cooler::{
    Active, CurrentHeaterCoolerState, TargetHeaterCoolerState, TemperatureDisplayUnits,
};
