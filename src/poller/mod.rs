// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-interval polling of a data source.
//!
//! A [`Poller`] owns a [`DataSource`] and an [`Aggregator`]. Each cycle fetches
//! one sample, aggregates it and publishes the result as a [`PollState`]. A
//! failed fetch keeps the last good snapshot and marks the state unavailable.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use robovac_lib::poll::Aggregator;
//! use robovac_lib::poller::{Poller, PollerConfig};
//! use robovac_lib::source::StaticSource;
//!
//! # async fn example() -> robovac_lib::Result<()> {
//! let poller = Arc::new(Poller::new(
//!     StaticSource::reference(),
//!     Aggregator::default(),
//!     PollerConfig::new("vacuum-01"),
//! )?);
//!
//! let mut updates = poller.watch();
//! let task = tokio::spawn({
//!     let poller = Arc::clone(&poller);
//!     async move { poller.run().await }
//! });
//!
//! updates.changed().await.ok();
//! if let Some(snapshot) = &updates.borrow().snapshot {
//!     println!("battery: {:?}", snapshot.battery());
//! }
//!
//! poller.shutdown();
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

mod config;
mod state;

pub use config::PollerConfig;
pub use state::PollState;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::{ConfigError, Error, FetchError, Result};
use crate::poll::{Aggregator, DecodedSnapshot};
use crate::source::DataSource;

/// Polls a data source and publishes decoded snapshots.
#[derive(Debug)]
pub struct Poller<S> {
    source: S,
    aggregator: Aggregator,
    config: PollerConfig,
    sequence: AtomicU64,
    state_tx: watch::Sender<PollState>,
    shutdown_tx: watch::Sender<bool>,
}

impl<S: DataSource> Poller<S> {
    /// Creates a poller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(
        source: S,
        aggregator: Aggregator,
        config: PollerConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let (state_tx, _) = watch::channel(PollState::default());
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            source,
            aggregator,
            config,
            sequence: AtomicU64::new(0),
            state_tx,
            shutdown_tx,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Returns the aggregator.
    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Returns the data source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    // ========== Polling ==========

    /// Runs a single poll cycle.
    ///
    /// Every call consumes a sequence number, even when the fetch fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShutDown`] after [`shutdown`](Self::shutdown) and
    /// [`Error::Fetch`] if the source fails. In the latter case the previous
    /// snapshot stays published.
    pub async fn poll_once(&self) -> Result<Arc<DecodedSnapshot>> {
        if self.is_shut_down() {
            return Err(Error::ShutDown);
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        match self.source.fetch().await {
            Ok(sample) => {
                let snapshot = Arc::new(self.aggregator.aggregate(&sample, sequence));

                tracing::debug!(
                    device = %self.config.display_name(),
                    sequence,
                    found = %snapshot.presence().summary(),
                    "Poll cycle completed"
                );

                self.state_tx.send_modify(|state| {
                    state.snapshot = Some(Arc::clone(&snapshot));
                    state.available = true;
                    state.last_error = None;
                    state.cycles += 1;
                });
                Ok(snapshot)
            }
            Err(error) => {
                self.record_failure(sequence, &error);
                Err(error.into())
            }
        }
    }

    fn record_failure(&self, sequence: u64, error: &FetchError) {
        if let Some(observers) = self.aggregator.observers() {
            observers.dispatch_fetch_failed(sequence, error);
        }

        self.state_tx.send_modify(|state| {
            state.available = false;
            state.last_error = Some(error.to_string());
            state.cycles += 1;
            state.failures += 1;
        });
    }

    /// Polls at the configured interval until shut down.
    ///
    /// The first cycle starts immediately. A cycle that overruns the interval
    /// delays the next one instead of triggering a burst. Failed cycles are
    /// logged and do not stop the loop.
    pub async fn run(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        if *shutdown_rx.borrow_and_update() {
            return;
        }

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            device = %self.config.display_name(),
            interval = ?self.config.interval,
            "Poller started"
        );

        loop {
            tokio::select! {
                biased;
                () = stopped(&mut shutdown_rx) => break,
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(_) => {}
                        Err(Error::ShutDown) => break,
                        Err(error) => tracing::warn!(
                            device = %self.config.display_name(),
                            error = %error,
                            "Poll cycle failed"
                        ),
                    }
                }
            }
        }

        tracing::info!(device = %self.config.display_name(), "Poller stopped");
    }

    // ========== State ==========

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> PollState {
        self.state_tx.borrow().clone()
    }

    /// Returns the last successful snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<DecodedSnapshot>> {
        self.state_tx.borrow().snapshot.clone()
    }

    /// Creates a receiver notified after every cycle.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<PollState> {
        self.state_tx.subscribe()
    }

    // ========== Lifecycle ==========

    /// Requests the poller to stop.
    ///
    /// A cycle already in progress completes; no new cycle starts.
    pub fn shutdown(&self) {
        if !self.shutdown_tx.send_replace(true) {
            tracing::debug!(device = %self.config.display_name(), "Poller shutdown requested");
        }
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) was called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}

async fn stopped(shutdown_rx: &mut watch::Receiver<bool>) {
    // The sender lives as long as the poller, so this only returns on shutdown
    let _ = shutdown_rx.wait_for(|stop| *stop).await;
}
