// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the remote appliance.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProtocolError;
use crate::protocol::SyncTransport;
use crate::sync::WireParameters;

// ============================================================================
// HttpConfig - Endpoint configuration
// ============================================================================

/// Configuration for the appliance's HTTP control endpoint.
///
/// # Examples
///
/// ```
/// use heater_cooler_bridge::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Defaults: http://localhost:1337/remote, 5 second timeout
/// let config = HttpConfig::default();
///
/// // With all options
/// let config = HttpConfig::new("http://192.168.1.40:8080")
///     .with_path("/api/remote")
///     .with_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    endpoint: String,
    path: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default endpoint base URL.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:1337";
    /// Default request path.
    pub const DEFAULT_PATH: &'static str = "/remote";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Base URL of the appliance, e.g. `http://10.0.0.5:1337`
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            path: Self::DEFAULT_PATH.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint as configured.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the request URL without query, e.g. `http://localhost:1337/remote`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{endpoint}{}", self.path)
        } else {
            format!("{endpoint}/{}", self.path)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the endpoint is not an
    /// `http` or `https` URL, or `ProtocolError::Http` if the client cannot
    /// be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url();

        let parsed = Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidAddress(format!("{}: {e}", self.endpoint)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProtocolError::InvalidAddress(format!(
                "{}: unsupported scheme {}",
                self.endpoint,
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }
}

// ============================================================================
// HttpClient - Transport implementation
// ============================================================================

/// HTTP client for the remote appliance.
///
/// Each synchronization is one `GET` carrying the wire parameters as query
/// string. Only the status code of the response is inspected.
///
/// # Examples
///
/// ```no_run
/// use heater_cooler_bridge::protocol::{HttpConfig, SyncTransport};
/// use heater_cooler_bridge::state::HeaterCoolerState;
/// use heater_cooler_bridge::sync::WireParameters;
///
/// # async fn example() -> heater_cooler_bridge::Result<()> {
/// let client = HttpConfig::new("http://192.168.1.40:1337").into_client()?;
/// let params = WireParameters::from_state(&HeaterCoolerState::default());
/// client.sync(&params).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for `endpoint` with default path and timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is invalid or the client cannot be created.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(endpoint).into_client()
    }

    /// Returns the request URL without query.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full request URL for a set of parameters.
    fn build_url(&self, params: &WireParameters) -> String {
        format!("{}?{}", self.base_url, params.to_query_string())
    }

    fn map_send_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            ProtocolError::Http(error)
        }
    }
}

impl SyncTransport for HttpClient {
    async fn sync(&self, params: &WireParameters) -> Result<(), ProtocolError> {
        let url = self.build_url(params);

        tracing::debug!(url = %url, "Sending synchronization request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        tracing::debug!(status = response.status().as_u16(), "Appliance accepted parameters");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Mode;

    fn params() -> WireParameters {
        WireParameters {
            power: 1,
            mode: Some(Mode::Cool),
            temp: Some(25),
            fan: 2,
        }
    }

    #[test]
    fn build_url_default() {
        let client = HttpConfig::default().into_client().unwrap();
        assert_eq!(
            client.build_url(&params()),
            "http://localhost:1337/remote?power=1&mode=1&temp=25&fan=2"
        );
    }

    #[test]
    fn build_url_without_mode() {
        let client = HttpClient::new("http://10.0.0.5:1337").unwrap();
        let params = WireParameters {
            mode: None,
            temp: None,
            ..params()
        };
        assert_eq!(
            client.build_url(&params),
            "http://10.0.0.5:1337/remote?power=1&fan=2"
        );
    }

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::default();
        assert_eq!(config.endpoint(), "http://localhost:1337");
        assert_eq!(config.path(), "/remote");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::default().with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn base_url_trims_trailing_slash() {
        let config = HttpConfig::new("http://10.0.0.5:1337/");
        assert_eq!(config.base_url(), "http://10.0.0.5:1337/remote");
    }

    #[test]
    fn base_url_with_relative_path() {
        let config = HttpConfig::new("http://10.0.0.5").with_path("api/remote");
        assert_eq!(config.base_url(), "http://10.0.0.5/api/remote");
    }

    #[test]
    fn into_client_rejects_garbage() {
        let result = HttpConfig::new("not a url").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn into_client_rejects_other_schemes() {
        let result = HttpConfig::new("ftp://10.0.0.5").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn into_client_accepts_https() {
        let client = HttpConfig::new("https://appliance.local")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "https://appliance.local/remote");
    }
}
