// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Published poller state.

use std::sync::Arc;

use crate::poll::DecodedSnapshot;

/// What consumers see of a poller.
///
/// After a failed cycle `snapshot` still holds the last successful result
/// while `available` is `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    /// The last successfully aggregated snapshot.
    pub snapshot: Option<Arc<DecodedSnapshot>>,
    /// Whether the last cycle succeeded.
    pub available: bool,
    /// Message of the last fetch failure, cleared on success.
    pub last_error: Option<String>,
    /// Number of cycles run, successful or not.
    pub cycles: u64,
    /// Number of failed cycles.
    pub failures: u64,
}

impl PollState {
    /// Returns `true` if a snapshot exists but the last cycle failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.snapshot.is_some() && !self.available
    }
}
