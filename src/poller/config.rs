// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poller configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a [`Poller`](super::Poller).
///
/// # Examples
///
/// ```
/// use robovac_lib::poller::PollerConfig;
/// use std::time::Duration;
///
/// let config = PollerConfig::new("vacuum-01")
///     .with_interval(Duration::from_secs(30))
///     .with_friendly_name("Downstairs");
///
/// assert_eq!(config.display_name(), "Downstairs");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Identifier of the polled device.
    pub device_id: String,
    /// Time between the starts of two poll cycles.
    pub interval: Duration,
    /// Optional friendly name used in logs.
    pub friendly_name: Option<String>,
}

impl PollerConfig {
    /// Default poll interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Creates a configuration for a device with the default interval.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            interval: Self::DEFAULT_INTERVAL,
            friendly_name: None,
        }
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets a friendly name for the device.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Returns the friendly name if set, otherwise the device id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.device_id)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDeviceId`] for an empty device id and
    /// [`ConfigError::ZeroInterval`] for a zero interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.is_empty() {
            return Err(ConfigError::MissingDeviceId);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}
