// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoder configuration: watched keys and lookup tables.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::types::{CleanSpeed, WorkStatus};

use super::{SpeedTable, StatusTable};

/// Data point keys watched by the stock firmware integration, in report order.
pub const DEFAULT_EXPECTED_KEYS: [&str; 12] = [
    "163", // battery
    "167", // water tank, byte 4
    "177", // alternative water tank source
    "178", // real-time data
    "168", // accessories status
    "153", // work status
    "152", // play/pause
    "158", // clean speed
    "154", // cleaning parameters
    "155", // direction controls
    "160", // find robot
    "173", // go home
];

/// Which data point key feeds each decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKeys {
    /// Battery percentage.
    pub battery: String,
    /// Base64 blob whose byte 4 holds the water tank level.
    pub water_tank: String,
    /// Clean speed index.
    pub clean_speed: String,
    /// Work status code.
    pub work_status: String,
    /// Play/pause flag.
    pub play_pause: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            battery: "163".to_string(),
            water_tank: "167".to_string(),
            clean_speed: "158".to_string(),
            work_status: "153".to_string(),
            play_pause: "152".to_string(),
        }
    }
}

impl FieldKeys {
    fn all(&self) -> [&str; 5] {
        [
            self.battery.as_str(),
            self.water_tank.as_str(),
            self.clean_speed.as_str(),
            self.work_status.as_str(),
            self.play_pause.as_str(),
        ]
    }
}

/// Validated configuration consumed by the decoder and aggregator.
///
/// [`DecoderConfig::default`] is the stock deployment. Use
/// [`DecoderConfig::builder`] to change any part of it; validation happens
/// once in [`DecoderConfigBuilder::build`], never per poll.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::DecoderConfig;
///
/// let config = DecoderConfig::default();
/// assert_eq!(config.expected_keys().len(), 12);
/// assert_eq!(config.field_keys().battery, "163");
///
/// let config = DecoderConfig::builder()
///     .expected_keys(["163", "167"])
///     .build()
///     .unwrap();
/// assert_eq!(config.expected_keys(), ["163", "167"]);
///
/// // Empty key sets fail fast
/// assert!(DecoderConfig::builder().expected_keys(Vec::<String>::new()).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    expected_keys: Vec<String>,
    field_keys: FieldKeys,
    speeds: SpeedTable,
    statuses: StatusTable,
}

impl DecoderConfig {
    /// Returns a builder seeded with the stock configuration.
    #[must_use]
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Returns the expected keys in report order.
    #[must_use]
    pub fn expected_keys(&self) -> &[String] {
        &self.expected_keys
    }

    /// Returns the per-field data point keys.
    #[must_use]
    pub fn field_keys(&self) -> &FieldKeys {
        &self.field_keys
    }

    /// Returns the clean speed table.
    #[must_use]
    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Returns the work status table.
    #[must_use]
    pub fn statuses(&self) -> &StatusTable {
        &self.statuses
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            expected_keys: DEFAULT_EXPECTED_KEYS.map(String::from).to_vec(),
            field_keys: FieldKeys::default(),
            speeds: SpeedTable::default(),
            statuses: StatusTable::default(),
        }
    }
}

/// Builder for [`DecoderConfig`].
#[derive(Debug, Clone)]
pub struct DecoderConfigBuilder {
    expected_keys: Vec<String>,
    field_keys: FieldKeys,
    speeds: Vec<CleanSpeed>,
    statuses: Vec<(i64, WorkStatus)>,
}

impl Default for DecoderConfigBuilder {
    fn default() -> Self {
        let stock = DecoderConfig::default();
        Self {
            expected_keys: stock.expected_keys,
            field_keys: stock.field_keys,
            speeds: stock.speeds.speeds().to_vec(),
            statuses: stock.statuses.entries().collect(),
        }
    }
}

impl DecoderConfigBuilder {
    /// Replaces the expected key set.
    #[must_use]
    pub fn expected_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.expected_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the key read for the battery level.
    #[must_use]
    pub fn battery_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.battery = key.into();
        self
    }

    /// Sets the key read for the water tank level.
    #[must_use]
    pub fn water_tank_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.water_tank = key.into();
        self
    }

    /// Sets the key read for the clean speed.
    #[must_use]
    pub fn clean_speed_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.clean_speed = key.into();
        self
    }

    /// Sets the key read for the work status.
    #[must_use]
    pub fn work_status_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.work_status = key.into();
        self
    }

    /// Sets the key read for the play/pause flag.
    #[must_use]
    pub fn play_pause_key(mut self, key: impl Into<String>) -> Self {
        self.field_keys.play_pause = key.into();
        self
    }

    /// Replaces the clean speed table (index order).
    #[must_use]
    pub fn clean_speeds(mut self, speeds: impl IntoIterator<Item = CleanSpeed>) -> Self {
        self.speeds = speeds.into_iter().collect();
        self
    }

    /// Replaces the work status table.
    #[must_use]
    pub fn work_statuses(mut self, entries: impl IntoIterator<Item = (i64, WorkStatus)>) -> Self {
        self.statuses = entries.into_iter().collect();
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the expected key set is empty, contains an
    /// empty or duplicate key, a field key is empty, or either lookup table is
    /// empty or has duplicate entries.
    pub fn build(self) -> Result<DecoderConfig, ConfigError> {
        if self.expected_keys.is_empty() {
            return Err(ConfigError::EmptyExpectedKeys);
        }

        let mut seen = HashSet::new();
        for key in &self.expected_keys {
            if key.is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateKey(key.clone()));
            }
        }

        if self.field_keys.all().iter().any(|key| key.is_empty()) {
            return Err(ConfigError::EmptyKey);
        }

        Ok(DecoderConfig {
            speeds: SpeedTable::new(self.speeds)?,
            statuses: StatusTable::new(self.statuses)?,
            expected_keys: self.expected_keys,
            field_keys: self.field_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_stock_deployment() {
        let config = DecoderConfig::default();
        assert_eq!(config.expected_keys().len(), 12);
        assert_eq!(config.expected_keys()[0], "163");
        assert_eq!(config.expected_keys()[11], "173");
        assert_eq!(config.speeds().len(), 4);
        assert_eq!(config.statuses().len(), 9);
    }

    #[test]
    fn builder_without_changes_equals_default() {
        assert_eq!(
            DecoderConfig::builder().build().unwrap(),
            DecoderConfig::default()
        );
    }

    #[test]
    fn builder_rejects_empty_expected_keys() {
        let result = DecoderConfig::builder()
            .expected_keys(Vec::<String>::new())
            .build();
        assert_eq!(result, Err(ConfigError::EmptyExpectedKeys));
    }

    #[test]
    fn builder_rejects_duplicate_expected_key() {
        let result = DecoderConfig::builder()
            .expected_keys(["163", "167", "163"])
            .build();
        assert_eq!(result, Err(ConfigError::DuplicateKey("163".to_string())));
    }

    #[test]
    fn builder_rejects_empty_keys() {
        let result = DecoderConfig::builder().expected_keys(["163", ""]).build();
        assert_eq!(result, Err(ConfigError::EmptyKey));

        let result = DecoderConfig::builder().battery_key("").build();
        assert_eq!(result, Err(ConfigError::EmptyKey));
    }

    #[test]
    fn builder_rejects_bad_tables() {
        let result = DecoderConfig::builder().clean_speeds([]).build();
        assert_eq!(result, Err(ConfigError::EmptyCleanSpeeds));

        let result = DecoderConfig::builder()
            .work_statuses([(0, WorkStatus::Standby), (0, WorkStatus::Sleep)])
            .build();
        assert_eq!(result, Err(ConfigError::DuplicateStatusCode(0)));
    }

    #[test]
    fn builder_custom_field_keys() {
        let config = DecoderConfig::builder()
            .battery_key("8")
            .water_tank_key("177")
            .clean_speed_key("102")
            .work_status_key("15")
            .play_pause_key("2")
            .build()
            .unwrap();

        let keys = config.field_keys();
        assert_eq!(keys.battery, "8");
        assert_eq!(keys.water_tank, "177");
        assert_eq!(keys.clean_speed, "102");
        assert_eq!(keys.work_status, "15");
        assert_eq!(keys.play_pause, "2");
    }
}
