// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating state reported by the vacuum.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// What the vacuum is currently doing.
///
/// The device reports this as an integer code. The stock mapping assigns
/// codes `0..=8` in declaration order, see [`WorkStatus::ALL`].
///
/// # Examples
///
/// ```
/// use robovac_lib::types::WorkStatus;
///
/// assert_eq!(WorkStatus::ALL[5], WorkStatus::Cleaning);
/// assert_eq!(WorkStatus::GoHome.as_str(), "go_home");
/// assert!(WorkStatus::Cleaning.is_active());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    /// Idle, waiting for a command.
    Standby,
    /// Low-power sleep.
    Sleep,
    /// Stopped on an error.
    Fault,
    /// Docked and charging.
    Charging,
    /// Building a quick map of the area.
    FastMapping,
    /// Running a cleaning job.
    Cleaning,
    /// Under manual remote control.
    RemoteCtrl,
    /// Returning to the dock.
    GoHome,
    /// Moving to a target point.
    Cruising,
}

impl WorkStatus {
    /// All statuses, indexed by their stock device code.
    pub const ALL: [Self; 9] = [
        Self::Standby,
        Self::Sleep,
        Self::Fault,
        Self::Charging,
        Self::FastMapping,
        Self::Cleaning,
        Self::RemoteCtrl,
        Self::GoHome,
        Self::Cruising,
    ];

    /// Returns the name used in snapshots and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standby => "standby",
            Self::Sleep => "sleep",
            Self::Fault => "fault",
            Self::Charging => "charging",
            Self::FastMapping => "fast_mapping",
            Self::Cleaning => "cleaning",
            Self::RemoteCtrl => "remote_ctrl",
            Self::GoHome => "go_home",
            Self::Cruising => "cruising",
        }
    }

    /// Returns `true` if the vacuum is moving on its own.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self,
            Self::FastMapping | Self::Cleaning | Self::GoHome | Self::Cruising
        )
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| ValueError::InvalidWorkStatus(s.to_string()))
    }
}
