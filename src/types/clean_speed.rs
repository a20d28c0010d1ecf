// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Suction power setting reported by the vacuum.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Suction power (clean speed) of the vacuum.
///
/// The device reports clean speed as an index into an ordered table; with the
/// stock table `0` is [`Quiet`](Self::Quiet) and `3` is [`Max`](Self::Max).
///
/// # Examples
///
/// ```
/// use robovac_lib::types::CleanSpeed;
///
/// assert_eq!(CleanSpeed::Turbo.as_str(), "turbo");
/// assert_eq!("max".parse::<CleanSpeed>().unwrap(), CleanSpeed::Max);
/// assert_eq!(CleanSpeed::ALL[2], CleanSpeed::Turbo);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CleanSpeed {
    /// Lowest suction, lowest noise.
    Quiet,
    /// Default suction.
    Standard,
    /// Increased suction.
    Turbo,
    /// Maximum suction.
    Max,
}

impl CleanSpeed {
    /// All speeds in device index order.
    pub const ALL: [Self; 4] = [Self::Quiet, Self::Standard, Self::Turbo, Self::Max];

    /// Returns the name used in snapshots and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Standard => "standard",
            Self::Turbo => "turbo",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for CleanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "standard" => Ok(Self::Standard),
            "turbo" => Ok(Self::Turbo),
            "max" => Ok(Self::Max),
            _ => Err(ValueError::InvalidCleanSpeed(s.to_string())),
        }
    }
}
