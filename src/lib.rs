// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater/cooler bridge - expose an HTTP-controlled appliance as a
//! home-automation heater/cooler accessory.
//!
//! The platform reads and writes characteristics by key. Writes land in an
//! in-memory mirror of the desired state and return immediately. A debounced
//! controller then sends the whole state to the appliance as
//! `GET <endpoint>/remote?power=&mode=&temp=&fan=`, so dragging a slider in
//! a thermostat app produces one request instead of dozens.
//!
//! # Architecture
//!
//! - [`state::DeviceStateStore`]: owns the mirror, notifies on every write
//! - [`sync::SyncController`]: maps the mirror to [`sync::WireParameters`]
//!   and sends them once writes have been quiet for the debounce window
//! - [`protocol::SyncTransport`]: the request capability, with
//!   [`protocol::HttpClient`] as the production implementation
//! - [`HeaterCooler`]: wires the above together from a [`config::BridgeConfig`]
//!
//! Failed requests are logged with `tracing` and counted; they never reach
//! the writer and are not retried.
//!
//! # Quick Start
//!
//! ```no_run
//! use heater_cooler_bridge::HeaterCooler;
//! use heater_cooler_bridge::config::BridgeConfig;
//! use heater_cooler_bridge::types::{Active, CharacteristicValue};
//!
//! #[tokio::main]
//! async fn main() -> heater_cooler_bridge::Result<()> {
//!     let config = BridgeConfig::default().with_endpoint("http://192.168.1.40:1337");
//!     let accessory = HeaterCooler::new(config)?;
//!
//!     accessory.set("active", CharacteristicValue::Active(Active::Active))?;
//!     accessory.set("rotationSpeed", CharacteristicValue::Integer(3))?;
//!
//!     // One request: power=1&mode=1&temp=25&fan=3
//!     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     Ok(())
//! }
//! ```

mod accessory;
pub mod config;
pub mod error;
pub mod protocol;
pub mod state;
pub mod subscription;
pub mod sync;
pub mod types;

pub use accessory::{AccessoryInfo, CharacteristicRegistration, HeaterCooler};
pub use config::{BridgeConfig, CharacteristicProps, Properties};
pub use error::{ConfigError, Error, ProtocolError, Result, StateError, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::SyncTransport;
pub use state::{DeviceStateStore, HeaterCoolerState, StateChange};
pub use subscription::SubscriptionId;
pub use sync::{Debouncer, Mode, SyncController, SyncStats, WireParameters};
pub use types::{
    Active, Characteristic, CharacteristicValue, CurrentHeaterCoolerState,
    TargetHeaterCoolerState, TemperatureDisplayUnits,
};
