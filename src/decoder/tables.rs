// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lookup tables for index and code based data points.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::types::{CleanSpeed, WorkStatus};

/// Ordered clean speed names, indexed by the raw device value.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::SpeedTable;
/// use robovac_lib::types::CleanSpeed;
///
/// let table = SpeedTable::default();
/// assert_eq!(table.get(2), Some(CleanSpeed::Turbo));
/// assert_eq!(table.get(4), None);
/// assert_eq!(table.get(-1), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTable(Vec<CleanSpeed>);

impl SpeedTable {
    /// Creates a table from speeds in index order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the table is empty or lists a speed twice.
    pub fn new(speeds: impl IntoIterator<Item = CleanSpeed>) -> Result<Self, ConfigError> {
        let mut table = Vec::new();
        for speed in speeds {
            if table.contains(&speed) {
                return Err(ConfigError::DuplicateCleanSpeed(speed));
            }
            table.push(speed);
        }
        if table.is_empty() {
            return Err(ConfigError::EmptyCleanSpeeds);
        }
        Ok(Self(table))
    }

    /// Looks up a raw index. Negative or too large indices yield `None`.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<CleanSpeed> {
        usize::try_from(index).ok().and_then(|i| self.0.get(i).copied())
    }

    /// Returns the speeds in index order.
    #[must_use]
    pub fn speeds(&self) -> &[CleanSpeed] {
        &self.0
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self(CleanSpeed::ALL.to_vec())
    }
}

/// Mapping from raw status codes to work statuses.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::StatusTable;
/// use robovac_lib::types::WorkStatus;
///
/// let table = StatusTable::default();
/// assert_eq!(table.get(5), Some(WorkStatus::Cleaning));
/// assert_eq!(table.get(99), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable(BTreeMap<i64, WorkStatus>);

impl StatusTable {
    /// Creates a table from `(code, status)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the table is empty or maps a code twice.
    pub fn new(entries: impl IntoIterator<Item = (i64, WorkStatus)>) -> Result<Self, ConfigError> {
        let mut table = BTreeMap::new();
        for (code, status) in entries {
            if table.insert(code, status).is_some() {
                return Err(ConfigError::DuplicateStatusCode(code));
            }
        }
        if table.is_empty() {
            return Err(ConfigError::EmptyWorkStatuses);
        }
        Ok(Self(table))
    }

    /// Looks up a raw status code.
    #[must_use]
    pub fn get(&self, code: i64) -> Option<WorkStatus> {
        self.0.get(&code).copied()
    }

    /// Returns all `(code, status)` pairs ordered by code.
    pub fn entries(&self) -> impl Iterator<Item = (i64, WorkStatus)> + '_ {
        self.0.iter().map(|(code, status)| (*code, *status))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; construction rejects empty tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self((0_i64..).zip(WorkStatus::ALL).collect())
    }
}
