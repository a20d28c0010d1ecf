// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP data source for cloud or bridge endpoints.

use std::time::Duration;

use reqwest::Client;

use super::DataSource;
use crate::error::FetchError;
use crate::sample::RawSample;

// ============================================================================
// HttpSourceConfig
// ============================================================================

/// Configuration for an [`HttpSource`].
///
/// The source issues `GET {base_url}/devices/{device_id}/data` and expects a
/// flat JSON object of data point values.
///
/// # Examples
///
/// ```
/// use robovac_lib::source::HttpSourceConfig;
/// use std::time::Duration;
///
/// let config = HttpSourceConfig::new("192.168.1.50:8080", "vacuum-01")
///     .with_credentials("admin", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.url(), "http://192.168.1.50:8080/devices/vacuum-01/data");
/// ```
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    base_url: String,
    device_id: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpSourceConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for a device behind the given base URL.
    ///
    /// A missing scheme defaults to `http://`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, device_id: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{base_url}")
        };

        Self {
            base_url,
            device_id: device_id.into(),
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the data endpoint URL, with the device id percent-encoded.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/devices/{}/data",
            self.base_url,
            urlencoding::encode(&self.device_id)
        )
    }

    /// Creates an [`HttpSource`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidAddress`] if the host or device id is
    /// empty, or [`FetchError::Http`] if the client cannot be created.
    pub fn into_source(self) -> Result<HttpSource, FetchError> {
        let host = self
            .base_url
            .split_once("://")
            .map_or(self.base_url.as_str(), |(_, rest)| rest);
        if host.is_empty() {
            return Err(FetchError::InvalidAddress("host is required".to_string()));
        }
        if self.device_id.is_empty() {
            return Err(FetchError::InvalidAddress(
                "device id is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(HttpSource {
            url: self.url(),
            client,
            credentials: self.credentials,
        })
    }
}

// ============================================================================
// HttpSource
// ============================================================================

/// Fetches raw samples from an HTTP endpoint.
///
/// # Examples
///
/// ```no_run
/// use robovac_lib::source::{DataSource, HttpSourceConfig};
///
/// # async fn example() -> Result<(), robovac_lib::error::FetchError> {
/// let source = HttpSourceConfig::new("192.168.1.50", "vacuum-01").into_source()?;
/// let sample = source.fetch().await?;
/// println!("{} data points", sample.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
    credentials: Option<(String, String)>,
}

impl HttpSource {
    /// Creates a source from a configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpSourceConfig::into_source`].
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        config.into_source()
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<RawSample, FetchError> {
        tracing::debug!(url = %self.url, "Fetching data points");

        let mut request = self.client.get(&self.url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(FetchError::Status {
                code: response.status().as_u16(),
            });
        }

        let body = response.text().await?;

        tracing::trace!(body = %body, "Received data points");

        Ok(RawSample::from_json(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_scheme_defaults_to_http() {
        let config = HttpSourceConfig::new("192.168.1.50", "vac");
        assert_eq!(config.base_url(), "http://192.168.1.50");
        assert_eq!(config.url(), "http://192.168.1.50/devices/vac/data");
    }

    #[test]
    fn url_keeps_https_and_trims_slash() {
        let config = HttpSourceConfig::new("https://api.example.com/", "vac");
        assert_eq!(config.url(), "https://api.example.com/devices/vac/data");
    }

    #[test]
    fn url_encodes_device_id() {
        let config = HttpSourceConfig::new("host", "living room/1");
        assert_eq!(config.url(), "http://host/devices/living%20room%2F1/data");
    }

    #[test]
    fn config_defaults() {
        let config = HttpSourceConfig::new("host", "vac");
        assert_eq!(config.timeout(), HttpSourceConfig::DEFAULT_TIMEOUT);
        assert!(config.credentials().is_none());

        let config = config.with_credentials("admin", "pw");
        assert_eq!(config.credentials(), Some(("admin", "pw")));
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = HttpSourceConfig::new("", "vac").into_source().unwrap_err();
        assert!(matches!(err, FetchError::InvalidAddress(_)));
    }

    #[test]
    fn empty_device_id_is_rejected() {
        let err = HttpSourceConfig::new("host", "").into_source().unwrap_err();
        assert!(matches!(err, FetchError::InvalidAddress(_)));
    }

    #[test]
    fn source_url() {
        let source = HttpSource::new(HttpSourceConfig::new("host", "vac")).unwrap();
        assert_eq!(source.url(), "http://host/devices/vac/data");
    }
}
