// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer that forwards poll diagnostics to `tracing`.

use super::registry::{FieldOutcome, ObserverRegistry, SubscriptionId};

/// Logs every field, snapshot and fetch failure through `tracing`.
///
/// Decoded fields are logged at `trace`, decode failures and missing keys at
/// `debug`, snapshots at `debug` and fetch failures at `warn`. The crate
/// installs no subscriber; output depends on the application's.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Registers the logging callbacks on a registry.
    ///
    /// Returns the subscription IDs so the callbacks can be removed again.
    pub fn install(self, registry: &ObserverRegistry) -> [SubscriptionId; 3] {
        let field = registry.on_field(|event| match &event.outcome {
            FieldOutcome::Decoded(value) => tracing::trace!(
                sequence = event.sequence,
                field = %event.field,
                key = event.key,
                value = %value,
                "Decoded field"
            ),
            FieldOutcome::Failed(error) => tracing::debug!(
                sequence = event.sequence,
                field = %event.field,
                key = event.key,
                raw = ?event.raw,
                error = %error,
                "Field could not be decoded"
            ),
            FieldOutcome::Missing => tracing::debug!(
                sequence = event.sequence,
                field = %event.field,
                key = event.key,
                "Field key missing from sample"
            ),
        });

        let snapshot = registry.on_snapshot(|snapshot| {
            let presence = snapshot.presence();
            tracing::debug!(
                sequence = snapshot.sequence(),
                found = %presence.summary(),
                coverage = presence.coverage_percent(),
                missing = ?presence.missing(),
                "Snapshot aggregated"
            );
        });

        let fetch_failed = registry.on_fetch_failed(|sequence, error| {
            tracing::warn!(sequence, error = %error, "Fetch failed, keeping last snapshot");
        });

        [field, snapshot, fetch_failed]
    }
}

impl ObserverRegistry {
    /// Creates a registry with a [`TracingObserver`] already installed.
    #[must_use]
    pub fn with_tracing() -> Self {
        let registry = Self::new();
        TracingObserver.install(&registry);
        registry
    }
}
