// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! The [`HeaterCoolerState`] struct is the in-memory mirror of the desired
//! appliance state. [`DeviceStateStore`] owns it behind a lock and emits a
//! [`StateChange`] to its subscribers after every write.
//!
//! # Examples
//!
//! ```
//! use heater_cooler_bridge::state::{DeviceStateStore, HeaterCoolerState};
//! use heater_cooler_bridge::types::{Active, Characteristic, CharacteristicValue};
//!
//! let store = DeviceStateStore::new(HeaterCoolerState::default());
//! store.subscribe(|change| println!("{change}"));
//!
//! store.set_value(Characteristic::Active, Active::Active.into()).unwrap();
//! assert_eq!(store.snapshot().active, Active::Active);
//! ```

mod device_state;
mod state_change;
mod store;

pub use device_state::HeaterCoolerState;
pub use state_change::StateChange;
pub use store::DeviceStateStore;
