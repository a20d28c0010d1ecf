// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coarse classifications derived from decoded readings.

use std::fmt;

use super::Percentage;

/// Battery charge band.
///
/// # Examples
///
/// ```
/// use robovac_lib::types::{BatteryLevel, Percentage};
///
/// assert_eq!(BatteryLevel::from_percentage(Percentage::clamped(8)), BatteryLevel::Critical);
/// assert_eq!(BatteryLevel::from_percentage(Percentage::clamped(85)), BatteryLevel::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryLevel {
    /// 10% or less.
    Critical,
    /// 11% to 20%.
    Low,
    /// 21% to 50%.
    Medium,
    /// Above 50%.
    High,
}

impl BatteryLevel {
    /// Classifies a battery percentage.
    #[must_use]
    pub const fn from_percentage(level: Percentage) -> Self {
        match level.value() {
            0..=10 => Self::Critical,
            11..=20 => Self::Low,
            21..=50 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Returns the band name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for BatteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Water tank fill band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankLevel {
    /// 10% or less.
    Empty,
    /// 11% to 30%.
    Low,
    /// 31% to 70%.
    Medium,
    /// Above 70%.
    Full,
}

impl TankLevel {
    /// Classifies a water tank percentage.
    #[must_use]
    pub const fn from_percentage(level: Percentage) -> Self {
        match level.value() {
            0..=10 => Self::Empty,
            11..=30 => Self::Low,
            31..=70 => Self::Medium,
            _ => Self::Full,
        }
    }

    /// Returns the band name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for TankLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Play/pause state of the current job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// The job is running.
    Playing,
    /// The job is paused.
    Paused,
    /// The device did not report the flag.
    Unknown,
}

impl PlaybackState {
    /// Returns the label shown to users.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<Option<bool>> for PlaybackState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Playing,
            Some(false) => Self::Paused,
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
