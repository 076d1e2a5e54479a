// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform-facing heater/cooler accessory.
//!
//! [`HeaterCooler`] is what a platform adapter talks to: it answers reads
//! from the mirror, forwards writes to the store, and lets the attached
//! [`SyncController`] push them to the appliance.
//!
//! # Examples
//!
//! ```no_run
//! use heater_cooler_bridge::HeaterCooler;
//! use heater_cooler_bridge::config::BridgeConfig;
//!
//! # async fn example() -> heater_cooler_bridge::Result<()> {
//! let config = BridgeConfig::from_json(r#"{"name": "Living Room", "endpoint": "http://10.0.0.5:1337"}"#)?;
//! let accessory = HeaterCooler::new(config)?;
//!
//! // Register handlers with the platform
//! for registration in accessory.registrations() {
//!     println!("{registration:?}");
//! }
//!
//! // Platform writes arrive as raw numbers
//! accessory.set_code("active", 1.0)?;
//! accessory.set_code("coolingThresholdTemperature", 22.0)?;
//! assert_eq!(accessory.get_code("active")?, 1.0);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::{BridgeConfig, CharacteristicProps};
use crate::error::Result;
use crate::protocol::SyncTransport;
use crate::state::{DeviceStateStore, HeaterCoolerState};
use crate::sync::SyncController;
use crate::types::{Characteristic, CharacteristicValue};

/// Identification shown by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInfo {
    /// Display name from configuration.
    pub name: String,
    /// Manufacturer string.
    pub manufacturer: String,
}

impl AccessoryInfo {
    /// Manufacturer reported for every bridged appliance.
    pub const MANUFACTURER: &'static str = "eo";
}

/// How the platform should register one characteristic.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicRegistration {
    /// The characteristic.
    pub characteristic: Characteristic,
    /// Range metadata, for characteristics that have configurable ranges.
    pub props: Option<CharacteristicProps>,
    /// Whether a write handler is registered.
    pub writable: bool,
}

/// A bridged heater/cooler accessory.
pub struct HeaterCooler<T: SyncTransport> {
    info: AccessoryInfo,
    config: BridgeConfig,
    store: Arc<DeviceStateStore>,
    controller: Arc<SyncController<T>>,
}

#[cfg(feature = "http")]
impl HeaterCooler<crate::protocol::HttpClient> {
    /// Creates an accessory synchronizing over HTTP.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is invalid or no Tokio runtime is
    /// running.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let transport = config.http_config().into_client()?;
        Self::with_transport(config, transport)
    }
}

impl<T: SyncTransport> HeaterCooler<T> {
    /// Creates an accessory synchronizing through `transport`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` when called outside a Tokio runtime.
    pub fn with_transport(config: BridgeConfig, transport: T) -> Result<Self> {
        let store = Arc::new(DeviceStateStore::new(config.initial_state()));
        let controller = SyncController::new(Arc::clone(&store), transport, config.debounce)?;

        tracing::debug!(
            name = %config.name,
            endpoint = %config.endpoint,
            debounce_ms = config.debounce.as_millis(),
            "Created heater/cooler accessory"
        );

        Ok(Self {
            info: AccessoryInfo {
                name: config.name.clone(),
                manufacturer: AccessoryInfo::MANUFACTURER.to_string(),
            },
            config,
            store,
            controller,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Returns the accessory identification.
    #[must_use]
    pub fn info(&self) -> &AccessoryInfo {
        &self.info
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Reads a characteristic by platform key.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnknownKey` for an unknown key.
    pub fn get(&self, key: &str) -> Result<CharacteristicValue> {
        Ok(self.store.get(key)?)
    }

    /// Writes a characteristic by platform key.
    ///
    /// Returns once the mirror is updated; synchronization happens later.
    ///
    /// # Errors
    ///
    /// Returns `StateError` for an unknown key, a read-only characteristic,
    /// or a value of the wrong kind.
    pub fn set(&self, key: &str, value: CharacteristicValue) -> Result<()> {
        Ok(self.store.set(key, value)?)
    }

    /// Reads a characteristic as a raw platform number.
    ///
    /// # Errors
    ///
    /// Returns `StateError::UnknownKey` for an unknown key.
    pub fn get_code(&self, key: &str) -> Result<f64> {
        Ok(self.get(key)?.code())
    }

    /// Writes a characteristic from a raw platform number.
    ///
    /// # Errors
    ///
    /// Returns `StateError` for an unknown or read-only key and
    /// `ValueError` for a number the characteristic cannot represent.
    pub fn set_code(&self, key: &str, raw: f64) -> Result<()> {
        let characteristic: Characteristic = key.parse()?;
        let value = CharacteristicValue::from_code(characteristic, raw)?;
        Ok(self.store.set_value(characteristic, value)?)
    }

    /// Returns the range metadata of a characteristic, if configured.
    #[must_use]
    pub fn props(&self, characteristic: Characteristic) -> Option<&CharacteristicProps> {
        self.config.properties.get(characteristic)
    }

    /// Returns one registration entry per characteristic.
    #[must_use]
    pub fn registrations(&self) -> Vec<CharacteristicRegistration> {
        Characteristic::ALL
            .into_iter()
            .map(|characteristic| CharacteristicRegistration {
                characteristic,
                props: self.props(characteristic).cloned(),
                writable: characteristic.has_write_handler(),
            })
            .collect()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> HeaterCoolerState {
        self.store.snapshot()
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &Arc<DeviceStateStore> {
        &self.store
    }

    /// Returns the synchronization controller.
    #[must_use]
    pub fn controller(&self) -> &Arc<SyncController<T>> {
        &self.controller
    }
}

impl<T: SyncTransport> std::fmt::Debug for HeaterCooler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaterCooler")
            .field("info", &self.info)
            .field("state", &self.store.snapshot())
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
