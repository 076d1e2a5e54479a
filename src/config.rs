// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.
//!
//! The configuration is static for the process lifetime. It is usually
//! loaded from the platform's JSON accessory block with
//! [`BridgeConfig::from_json`]; every key is optional and missing keys keep
//! their defaults, field by field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::HeaterCoolerState;
use crate::types::{Characteristic, TemperatureDisplayUnits};

/// Range metadata the platform registers for a characteristic.
///
/// The bridge hands these to the platform, which enforces them before a
/// write reaches the store. The store itself does not re-check them.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::config::CharacteristicProps;
///
/// let props = CharacteristicProps::range(17.0, 30.0, 1.0);
/// assert!(props.allows(22.0));
/// assert!(!props.allows(31.0));
/// assert!(!props.allows(22.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicProps {
    /// Smallest allowed value.
    pub min_value: f64,
    /// Largest allowed value.
    pub max_value: f64,
    /// Granularity of allowed values.
    pub min_step: f64,
    /// Exhaustive list of allowed values, if restricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<Vec<u8>>,
}

impl CharacteristicProps {
    /// Creates props for a continuous range.
    #[must_use]
    pub fn range(min_value: f64, max_value: f64, min_step: f64) -> Self {
        Self {
            min_value,
            max_value,
            min_step,
            valid_values: None,
        }
    }

    /// Restricts the allowed values.
    #[must_use]
    pub fn with_valid_values(mut self, values: impl Into<Vec<u8>>) -> Self {
        self.valid_values = Some(values.into());
        self
    }

    /// Returns `true` if `value` satisfies range, step and valid values.
    #[must_use]
    pub fn allows(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min_value || value > self.max_value {
            return false;
        }

        if self.min_step > 0.0 {
            let steps = (value - self.min_value) / self.min_step;
            if (steps - steps.round()).abs() > 1e-9 {
                return false;
            }
        }

        match &self.valid_values {
            Some(valid) => valid.iter().any(|v| (f64::from(*v) - value).abs() < 1e-9),
            None => true,
        }
    }

    fn merge(&mut self, patch: PropsPatch) {
        if let Some(min_value) = patch.min_value {
            self.min_value = min_value;
        }
        if let Some(max_value) = patch.max_value {
            self.max_value = max_value;
        }
        if let Some(min_step) = patch.min_step {
            self.min_step = min_step;
        }
        if let Some(valid_values) = patch.valid_values {
            self.valid_values = Some(valid_values);
        }
    }
}

/// Range overrides for the writable characteristics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    /// Fan speed range.
    pub rotation_speed: CharacteristicProps,
    /// Cooling threshold range.
    pub cooling_threshold_temperature: CharacteristicProps,
    /// Heating threshold range.
    pub heating_threshold_temperature: CharacteristicProps,
    /// Target state codes; heat (1) and cool (2) by default.
    pub target_heater_cooler_state: CharacteristicProps,
}

impl Properties {
    /// Returns the props registered for `characteristic`, if any.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> Option<&CharacteristicProps> {
        match characteristic {
            Characteristic::RotationSpeed => Some(&self.rotation_speed),
            Characteristic::CoolingThresholdTemperature => {
                Some(&self.cooling_threshold_temperature)
            }
            Characteristic::HeatingThresholdTemperature => {
                Some(&self.heating_threshold_temperature)
            }
            Characteristic::TargetHeaterCoolerState => Some(&self.target_heater_cooler_state),
            Characteristic::Active
            | Characteristic::CurrentHeaterCoolerState
            | Characteristic::CurrentTemperature
            | Characteristic::TemperatureDisplayUnits => None,
        }
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            rotation_speed: CharacteristicProps::range(1.0, 3.0, 1.0),
            cooling_threshold_temperature: CharacteristicProps::range(17.0, 30.0, 1.0),
            heating_threshold_temperature: CharacteristicProps::range(17.0, 30.0, 1.0),
            target_heater_cooler_state: CharacteristicProps::range(0.0, 2.0, 1.0)
                .with_valid_values([1, 2]),
        }
    }
}

/// Configuration of one bridged heater/cooler.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::config::BridgeConfig;
///
/// let config = BridgeConfig::from_json(r#"{
///     "name": "Bedroom AC",
///     "endpoint": "http://10.0.0.5:1337",
///     "properties": { "rotationSpeed": { "maxValue": 5 } }
/// }"#).unwrap();
///
/// assert_eq!(config.name, "Bedroom AC");
/// assert_eq!(config.properties.rotation_speed.max_value, 5.0);
/// // Untouched fields keep their defaults
/// assert_eq!(config.properties.rotation_speed.min_value, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Display name of the accessory.
    pub name: String,
    /// Base URL of the appliance.
    pub endpoint: String,
    /// Display temperatures in Celsius (otherwise Fahrenheit).
    pub celsius: bool,
    /// Range overrides.
    pub properties: Properties,
    /// Quiet period before a synchronization is sent.
    pub debounce: Duration,
    /// Timeout of one synchronization request.
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Default accessory name.
    pub const DEFAULT_NAME: &'static str = "Heater Cooler";
    /// Default endpoint base URL.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:1337";
    /// Default debounce window.
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Parses a JSON accessory block and merges it over the defaults.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the text is not valid JSON or a known
    /// key has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let patch: ConfigPatch = serde_json::from_str(json)?;
        Ok(Self::default().merged(patch))
    }

    /// Merges an already parsed JSON value over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if a known key has the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let patch: ConfigPatch = serde_json::from_value(value)?;
        Ok(Self::default().merged(patch))
    }

    /// Sets the accessory name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the appliance base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the display unit selected by `celsius`.
    #[must_use]
    pub fn display_units(&self) -> TemperatureDisplayUnits {
        if self.celsius {
            TemperatureDisplayUnits::Celsius
        } else {
            TemperatureDisplayUnits::Fahrenheit
        }
    }

    /// Returns the start-up state of the mirror.
    #[must_use]
    pub fn initial_state(&self) -> HeaterCoolerState {
        HeaterCoolerState::new(self.display_units())
    }

    /// Returns the HTTP transport configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> crate::protocol::HttpConfig {
        crate::protocol::HttpConfig::new(&self.endpoint).with_timeout(self.timeout)
    }

    fn merged(mut self, patch: ConfigPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(endpoint) = patch.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(celsius) = patch.celsius {
            self.celsius = celsius;
        }
        if let Some(debounce_ms) = patch.debounce_ms {
            self.debounce = Duration::from_millis(debounce_ms);
        }
        if let Some(timeout_ms) = patch.timeout_ms {
            self.timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(properties) = patch.properties {
            let merge = |target: &mut CharacteristicProps, patch: Option<PropsPatch>| {
                if let Some(patch) = patch {
                    target.merge(patch);
                }
            };
            merge(&mut self.properties.rotation_speed, properties.rotation_speed);
            merge(
                &mut self.properties.cooling_threshold_temperature,
                properties.cooling_threshold_temperature,
            );
            merge(
                &mut self.properties.heating_threshold_temperature,
                properties.heating_threshold_temperature,
            );
            merge(
                &mut self.properties.target_heater_cooler_state,
                properties.target_heater_cooler_state,
            );
        }
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            celsius: true,
            properties: Properties::default(),
            debounce: Self::DEFAULT_DEBOUNCE,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

// Partial forms: every key optional, merged field by field.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigPatch {
    name: Option<String>,
    endpoint: Option<String>,
    celsius: Option<bool>,
    properties: Option<PropertiesPatch>,
    debounce_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesPatch {
    rotation_speed: Option<PropsPatch>,
    cooling_threshold_temperature: Option<PropsPatch>,
    heating_threshold_temperature: Option<PropsPatch>,
    target_heater_cooler_state: Option<PropsPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropsPatch {
    min_value: Option<f64>,
    max_value: Option<f64>,
    min_step: Option<f64>,
    valid_values: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.endpoint, "http://localhost:1337");
        assert!(config.celsius);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.properties.target_heater_cooler_state.valid_values,
            Some(vec![1, 2])
        );
    }

    #[test]
    fn empty_json_is_default() {
        let config = BridgeConfig::from_json("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn partial_property_override_keeps_other_fields() {
        let config = BridgeConfig::from_json(
            r#"{"properties": {"coolingThresholdTemperature": {"minValue": 16}}}"#,
        )
        .unwrap();

        let cooling = &config.properties.cooling_threshold_temperature;
        assert!((cooling.min_value - 16.0).abs() < f64::EPSILON);
        assert!((cooling.max_value - 30.0).abs() < f64::EPSILON);
        assert_eq!(
            config.properties.heating_threshold_temperature,
            CharacteristicProps::range(17.0, 30.0, 1.0)
        );
    }

    #[test]
    fn valid_values_override_replaces_list() {
        let config = BridgeConfig::from_json(
            r#"{"properties": {"targetHeaterCoolerState": {"validValues": [2]}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.properties.target_heater_cooler_state.valid_values,
            Some(vec![2])
        );
    }

    #[test]
    fn timing_and_units_overrides() {
        let config = BridgeConfig::from_json(
            r#"{"celsius": false, "debounceMs": 50, "timeoutMs": 1000, "accessory": "HTTPHeaterCooler"}"#,
        )
        .unwrap();
        assert_eq!(config.display_units(), TemperatureDisplayUnits::Fahrenheit);
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(
            config.initial_state().temperature_display_units,
            TemperatureDisplayUnits::Fahrenheit
        );
    }

    #[test]
    fn from_value() {
        let config = BridgeConfig::from_value(serde_json::json!({
            "name": "Office",
            "endpoint": "http://10.0.0.9:1337"
        }))
        .unwrap();
        assert_eq!(config.name, "Office");
        assert_eq!(config.endpoint, "http://10.0.0.9:1337");
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            BridgeConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            BridgeConfig::from_json(r#"{"celsius": "yes"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn properties_lookup() {
        let properties = Properties::default();
        assert!(properties.get(Characteristic::RotationSpeed).is_some());
        assert!(properties.get(Characteristic::Active).is_none());
        assert!(properties.get(Characteristic::TemperatureDisplayUnits).is_none());
    }

    #[test]
    fn target_state_props_exclude_auto() {
        let props = Properties::default().target_heater_cooler_state;
        assert!(!props.allows(0.0));
        assert!(props.allows(1.0));
        assert!(props.allows(2.0));
    }

    #[test]
    fn props_allows_checks_range_and_step() {
        let props = CharacteristicProps::range(1.0, 3.0, 1.0);
        assert!(props.allows(1.0));
        assert!(props.allows(3.0));
        assert!(!props.allows(0.0));
        assert!(!props.allows(1.5));
        assert!(!props.allows(f64::NAN));
    }

    #[test]
    fn props_serialize_camel_case() {
        let json = serde_json::to_value(CharacteristicProps::range(17.0, 30.0, 1.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"minValue": 17.0, "maxValue": 30.0, "minStep": 1.0})
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_from_bridge_config() {
        let config = BridgeConfig::default()
            .with_endpoint("http://10.0.0.5:1337")
            .with_timeout(Duration::from_secs(2));
        let http = config.http_config();
        assert_eq!(http.base_url(), "http://10.0.0.5:1337/remote");
        assert_eq!(http.timeout(), Duration::from_secs(2));
    }
}
