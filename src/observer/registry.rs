// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback registry for poll diagnostics.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`ObserverRegistry`] - Stores callbacks and dispatches poll events

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::decoder::{Field, FieldValue};
use crate::error::{DecodeError, FetchError};
use crate::poll::DecodedSnapshot;
use crate::sample::RawValue;

/// Unique identifier for a subscription.
///
/// IDs are unique within one registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// What happened to one field during a poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// The value decoded successfully.
    Decoded(FieldValue),
    /// The key was present but its value could not be decoded.
    Failed(DecodeError),
    /// The key was absent from the sample.
    Missing,
}

/// Diagnostic event for one decoded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvent<'a> {
    /// Poll sequence number.
    pub sequence: u64,
    /// The field being decoded.
    pub field: Field,
    /// The data point key read for the field.
    pub key: &'a str,
    /// The raw value, if the key was present.
    pub raw: Option<&'a RawValue>,
    /// The decoding outcome.
    pub outcome: FieldOutcome,
}

type FieldCallback = Arc<dyn Fn(&FieldEvent<'_>) + Send + Sync>;

type SnapshotCallback = Arc<dyn Fn(&DecodedSnapshot) + Send + Sync>;

/// Receives the failed cycle's sequence number and the error.
type FetchFailedCallback = Arc<dyn Fn(u64, &FetchError) + Send + Sync>;

/// Registry of diagnostic callbacks invoked during poll cycles.
///
/// The aggregator reports every decoded field and every finished snapshot; the
/// poller reports fetch failures. Callbacks are called synchronously on the
/// polling task, so they should be quick.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use robovac_lib::observer::ObserverRegistry;
/// use robovac_lib::poll::Aggregator;
/// use robovac_lib::sample::RawSample;
///
/// let registry = Arc::new(ObserverRegistry::new());
/// let fields = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fields);
/// registry.on_field(move |_event| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let aggregator = Aggregator::default().with_observers(registry);
/// let _snapshot = aggregator.aggregate(&RawSample::new().with("163", 85), 1);
///
/// // One event per decoded field
/// assert_eq!(fields.load(Ordering::SeqCst), 5);
/// ```
pub struct ObserverRegistry {
    next_id: AtomicU64,
    field_callbacks: RwLock<HashMap<SubscriptionId, FieldCallback>>,
    snapshot_callbacks: RwLock<HashMap<SubscriptionId, SnapshotCallback>>,
    fetch_failed_callbacks: RwLock<HashMap<SubscriptionId, FetchFailedCallback>>,
}

impl ObserverRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            field_callbacks: RwLock::new(HashMap::new()),
            snapshot_callbacks: RwLock::new(HashMap::new()),
            fetch_failed_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a callback for every field decoded in a cycle.
    pub fn on_field<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FieldEvent<'_>) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.field_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for every completed snapshot.
    pub fn on_snapshot<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DecodedSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.snapshot_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for cycles whose fetch failed.
    pub fn on_fetch_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(u64, &FetchError) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.fetch_failed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.field_callbacks.write().remove(&id).is_some()
            || self.snapshot_callbacks.write().remove(&id).is_some()
            || self.fetch_failed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.field_callbacks.write().clear();
        self.snapshot_callbacks.write().clear();
        self.fetch_failed_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatches a field event.
    pub fn dispatch_field(&self, event: &FieldEvent<'_>) {
        // Clone the callbacks out so a callback may (un)subscribe without deadlocking
        let callbacks: Vec<FieldCallback> = self.field_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(event);
        }
    }

    /// Dispatches a completed snapshot.
    pub fn dispatch_snapshot(&self, snapshot: &DecodedSnapshot) {
        let callbacks: Vec<SnapshotCallback> =
            self.snapshot_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(snapshot);
        }
    }

    /// Dispatches a fetch failure.
    pub fn dispatch_fetch_failed(&self, sequence: u64, error: &FetchError) {
        let callbacks: Vec<FetchFailedCallback> =
            self.fetch_failed_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(sequence, error);
        }
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.field_callbacks.read().len()
            + self.snapshot_callbacks.read().len()
            + self.fetch_failed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
