// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the heater/cooler bridge.
//!
//! State mutation errors ([`StateError`], [`ValueError`]) are returned
//! synchronously to the caller of a write. Synchronization errors
//! ([`ProtocolError`]) only surface through logs and
//! [`SyncStats`](crate::sync::SyncStats): the write path never sees them.

use thiserror::Error;

use crate::types::{Characteristic, ValueKind};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A read or write against the state mirror was rejected.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// A raw platform value could not be converted.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Communication with the remote appliance failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// No Tokio runtime was available to schedule synchronization.
    #[error("no tokio runtime available to schedule synchronization")]
    NoRuntime,
}

/// Errors raised by the state mirror.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The key does not name one of the accessory characteristics.
    #[error("unknown characteristic key: {0}")]
    UnknownKey(String),

    /// The characteristic cannot be written.
    #[error("characteristic {0} does not accept writes")]
    UnsupportedWrite(Characteristic),

    /// The value kind does not match the characteristic.
    #[error("characteristic {characteristic}: expected {expected} value, got {actual}")]
    TypeMismatch {
        /// The characteristic being written.
        characteristic: Characteristic,
        /// The kind the characteristic stores.
        expected: ValueKind,
        /// The kind that was supplied.
        actual: ValueKind,
    },
}

/// Errors converting raw platform numbers into typed values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The numeric code has no meaning for this characteristic.
    #[error("invalid code {code} for characteristic {characteristic}")]
    InvalidCode {
        /// The characteristic the code was meant for.
        characteristic: Characteristic,
        /// The offending code.
        code: f64,
    },

    /// NaN or infinity was supplied.
    #[error("non-finite value for characteristic {0}")]
    NotFinite(Characteristic),
}

/// Errors related to the outbound synchronization request.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance endpoint answered with a failure or could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid endpoint URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to loading the bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_display() {
        let err = StateError::UnknownKey("swingMode".to_string());
        assert_eq!(err.to_string(), "unknown characteristic key: swingMode");
    }

    #[test]
    fn unsupported_write_display() {
        let err = StateError::UnsupportedWrite(Characteristic::TemperatureDisplayUnits);
        assert_eq!(
            err.to_string(),
            "characteristic temperatureDisplayUnits does not accept writes"
        );
    }

    #[test]
    fn type_mismatch_display() {
        let err = StateError::TypeMismatch {
            characteristic: Characteristic::RotationSpeed,
            expected: ValueKind::Integer,
            actual: ValueKind::Float,
        };
        assert_eq!(
            err.to_string(),
            "characteristic rotationSpeed: expected integer value, got float"
        );
    }

    #[test]
    fn error_from_state_error() {
        let err: Error = StateError::UnknownKey("x".to_string()).into();
        assert!(matches!(err, Error::State(StateError::UnknownKey(_))));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Timeout(5000);
        assert_eq!(err.to_string(), "request timed out after 5000 ms");
    }
}
