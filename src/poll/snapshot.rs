// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot types produced by one poll cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sample::RawSample;
use crate::types::{BatteryLevel, CleanSpeed, Percentage, PlaybackState, TankLevel, WorkStatus};

/// The five typed readings of a snapshot.
///
/// Each field is `None` when its key was missing or its value could not be
/// decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    /// Battery level.
    pub battery: Option<Percentage>,
    /// Water tank level.
    pub water_tank: Option<Percentage>,
    /// Clean speed.
    pub clean_speed: Option<CleanSpeed>,
    /// Work status.
    pub work_status: Option<WorkStatus>,
    /// Play/pause flag, `None` only if the key was missing.
    pub play_pause: Option<bool>,
}

/// Which expected keys a sample contained.
///
/// `found` and `missing` partition the expected key set and both keep its
/// order. A key counts as found if it is present, even when its value could
/// not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPresence {
    found: Vec<String>,
    missing: Vec<String>,
}

impl KeyPresence {
    /// Classifies each expected key as found or missing in a sample.
    #[must_use]
    pub fn classify(expected: &[String], sample: &RawSample) -> Self {
        let (found, missing) = expected
            .iter()
            .cloned()
            .partition(|key| sample.contains_key(key));
        Self { found, missing }
    }

    /// Returns the expected keys present in the sample.
    #[must_use]
    pub fn found(&self) -> &[String] {
        &self.found
    }

    /// Returns the expected keys absent from the sample.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Returns the size of the expected key set.
    #[must_use]
    pub fn total(&self) -> usize {
        self.found.len() + self.missing.len()
    }

    /// Returns `true` if the key was expected and found.
    #[must_use]
    pub fn is_found(&self, key: &str) -> bool {
        self.found.iter().any(|k| k == key)
    }

    /// Returns the share of expected keys found, in percent with one decimal.
    ///
    /// Exact halves round to even, so 1 of 16 keys gives `6.2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use robovac_lib::poll::KeyPresence;
    /// use robovac_lib::sample::RawSample;
    ///
    /// let expected = vec!["1".to_string(), "2".to_string(), "3".to_string()];
    /// let presence = KeyPresence::classify(&expected, &RawSample::new().with("2", 0));
    /// assert!((presence.coverage_percent() - 33.3).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let ratio = self.found.len() as f64 / total as f64;
        (ratio * 1000.0).round_ties_even() / 10.0
    }

    /// Returns `"found/total"`, e.g. `"5/12"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}/{}", self.found.len(), self.total())
    }
}

/// The normalized result of one poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedSnapshot {
    sequence: u64,
    timestamp: DateTime<Utc>,
    readings: Readings,
    presence: KeyPresence,
    raw_keys: Vec<String>,
    water_tank_byte: Option<u8>,
}

impl DecodedSnapshot {
    pub(crate) fn new(
        sequence: u64,
        readings: Readings,
        presence: KeyPresence,
        sample: &RawSample,
        water_tank_byte: Option<u8>,
    ) -> Self {
        Self {
            sequence,
            timestamp: Utc::now(),
            readings,
            presence,
            raw_keys: sample.keys().map(str::to_string).collect(),
            water_tank_byte,
        }
    }

    /// Returns the poll sequence number.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns when the snapshot was aggregated.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns all decoded readings.
    #[must_use]
    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    /// Returns the found/missing classification of expected keys.
    #[must_use]
    pub fn presence(&self) -> &KeyPresence {
        &self.presence
    }

    /// Returns every key the sample contained, sorted.
    #[must_use]
    pub fn raw_keys(&self) -> &[String] {
        &self.raw_keys
    }

    /// Returns the unscaled water tank byte, if it was decoded.
    #[must_use]
    pub fn water_tank_byte(&self) -> Option<u8> {
        self.water_tank_byte
    }

    // ========== Field accessors ==========

    /// Returns the battery level.
    #[must_use]
    pub fn battery(&self) -> Option<Percentage> {
        self.readings.battery
    }

    /// Returns the water tank level.
    #[must_use]
    pub fn water_tank(&self) -> Option<Percentage> {
        self.readings.water_tank
    }

    /// Returns the clean speed.
    #[must_use]
    pub fn clean_speed(&self) -> Option<CleanSpeed> {
        self.readings.clean_speed
    }

    /// Returns the work status.
    #[must_use]
    pub fn work_status(&self) -> Option<WorkStatus> {
        self.readings.work_status
    }

    /// Returns the play/pause flag.
    #[must_use]
    pub fn play_pause(&self) -> Option<bool> {
        self.readings.play_pause
    }

    // ========== Diagnostics ==========

    /// Returns the battery band.
    #[must_use]
    pub fn battery_level(&self) -> Option<BatteryLevel> {
        self.readings.battery.map(BatteryLevel::from_percentage)
    }

    /// Returns the water tank band.
    #[must_use]
    pub fn tank_level(&self) -> Option<TankLevel> {
        self.readings.water_tank.map(TankLevel::from_percentage)
    }

    /// Returns the play/pause state.
    #[must_use]
    pub fn playback(&self) -> PlaybackState {
        PlaybackState::from(self.readings.play_pause)
    }
}
