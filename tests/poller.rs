// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the poll loop, driven with paused time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use robovac_lib::error::FetchError;
use robovac_lib::observer::ObserverRegistry;
use robovac_lib::poll::Aggregator;
use robovac_lib::poller::{Poller, PollerConfig};
use robovac_lib::sample::RawSample;
use robovac_lib::source::{DataSource, StaticSource};

fn poller_for(source: &Arc<StaticSource>, aggregator: Aggregator) -> Poller<Arc<StaticSource>> {
    let config = PollerConfig::new("vac-1").with_interval(Duration::from_secs(10));
    Poller::new(Arc::clone(source), aggregator, config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn run_polls_at_interval_until_shutdown() {
    let source = Arc::new(StaticSource::reference());
    let poller = poller_for(&source, Aggregator::default());

    let control = async {
        // Ticks fire at 0s, 10s and 20s
        tokio::time::sleep(Duration::from_secs(25)).await;
        poller.shutdown();
    };
    tokio::join!(poller.run(), control);

    assert_eq!(source.fetch_count(), 3);
    assert_eq!(poller.state().cycles, 3);
    assert_eq!(poller.latest().unwrap().sequence(), 3);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(source.fetch_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn run_survives_fetch_failures() {
    let source = Arc::new(StaticSource::new(RawSample::new().with("163", 64)));
    let poller = poller_for(&source, Aggregator::default());

    let control = async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(poller.state().available);

        source.fail_with("cloud timeout");
        tokio::time::sleep(Duration::from_secs(10)).await;
        let state = poller.state();
        assert!(!state.available);
        assert!(state.is_stale());
        assert_eq!(state.snapshot.as_ref().unwrap().sequence(), 1);

        source.recover();
        tokio::time::sleep(Duration::from_secs(10)).await;
        poller.shutdown();
    };
    tokio::join!(poller.run(), control);

    let state = poller.state();
    assert!(state.available);
    assert_eq!(state.cycles, 3);
    assert_eq!(state.failures, 1);
    assert_eq!(state.snapshot.unwrap().sequence(), 3);
}

#[tokio::test(start_paused = true)]
async fn watchers_see_every_cycle() {
    let source = Arc::new(StaticSource::reference());
    let poller = poller_for(&source, Aggregator::default());
    let mut updates = poller.watch();

    let control = async {
        let mut sequences = Vec::new();
        while sequences.len() < 2 {
            updates.changed().await.unwrap();
            let state = updates.borrow_and_update().clone();
            if let Some(snapshot) = state.snapshot {
                sequences.push(snapshot.sequence());
            }
        }
        poller.shutdown();
        sequences
    };
    let ((), sequences) = tokio::join!(poller.run(), control);

    assert_eq!(sequences, [1, 2]);
}

#[tokio::test(start_paused = true)]
async fn observers_see_fetch_failures() {
    let source = Arc::new(StaticSource::reference());
    let registry = Arc::new(ObserverRegistry::new());

    let failed = Arc::new(Mutex::new(Vec::new()));
    let failed_clone = Arc::clone(&failed);
    registry.on_fetch_failed(move |sequence, error| {
        failed_clone.lock().push((sequence, error.to_string()));
    });

    let snapshots = Arc::new(AtomicU64::new(0));
    let snapshots_clone = Arc::clone(&snapshots);
    registry.on_snapshot(move |_| {
        snapshots_clone.fetch_add(1, Ordering::SeqCst);
    });

    let poller = poller_for(&source, Aggregator::default().with_observers(registry));

    poller.poll_once().await.unwrap();
    source.fail_with("offline");
    assert!(poller.poll_once().await.is_err());

    assert_eq!(snapshots.load(Ordering::SeqCst), 1);
    assert_eq!(
        *failed.lock(),
        [(2, "source unavailable: offline".to_string())]
    );
}

/// Source whose fetch takes a fixed time.
struct SlowSource {
    delay: Duration,
    fetches: AtomicU64,
}

impl DataSource for SlowSource {
    async fn fetch(&self) -> Result<RawSample, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(RawSample::new().with("163", 70))
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_lets_in_flight_cycle_finish() {
    let source = Arc::new(SlowSource {
        delay: Duration::from_secs(5),
        fetches: AtomicU64::new(0),
    });
    let config = PollerConfig::new("vac-1").with_interval(Duration::from_secs(10));
    let poller = Poller::new(Arc::clone(&source), Aggregator::default(), config).unwrap();

    let control = async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        poller.shutdown();
    };
    tokio::join!(poller.run(), control);

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    let state = poller.state();
    assert_eq!(state.cycles, 1);
    assert!(state.available);
    assert_eq!(
        state.snapshot.unwrap().battery().map(|b| b.value()),
        Some(70)
    );
}
