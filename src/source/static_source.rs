// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory data source.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::DataSource;
use crate::error::FetchError;
use crate::sample::RawSample;

/// A data source that returns a configurable in-memory sample.
///
/// The sample can be replaced and the source can be switched to fail, which
/// makes it useful to drive a [`Poller`](crate::poller::Poller) in tests.
///
/// # Examples
///
/// ```
/// use robovac_lib::source::{DataSource, StaticSource};
///
/// # async fn example() {
/// let source = StaticSource::reference();
/// let sample = source.fetch().await.unwrap();
/// assert_eq!(sample.len(), 12);
///
/// source.fail_with("device offline");
/// assert!(source.fetch().await.is_err());
/// assert_eq!(source.fetch_count(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct StaticSource {
    sample: RwLock<RawSample>,
    failure: RwLock<Option<String>>,
    fetches: AtomicU64,
}

impl StaticSource {
    /// Creates a source that returns the given sample.
    #[must_use]
    pub fn new(sample: RawSample) -> Self {
        Self {
            sample: RwLock::new(sample),
            failure: RwLock::new(None),
            fetches: AtomicU64::new(0),
        }
    }

    /// Creates a source returning a full reference payload.
    ///
    /// Every default expected key is present. The battery reads 85%, the
    /// work status is cleaning, the clean speed turbo and the job is playing.
    #[must_use]
    pub fn reference() -> Self {
        let sample = RawSample::new()
            .with("163", 85)
            .with("167", "PAo6CgUIABC4AhgEGFRKJw==")
            .with("177", "MgowCAEQABgEGlVKFw==")
            .with("178", "OAo2CAEQABgEGlVlIw==")
            .with("168", "QWNjZXNzb3JpZXMgZGF0YSBoZXJl")
            .with("153", 5)
            .with("152", true)
            .with("158", 2)
            .with("154", "Q2xlYW5pbmcgcGFyYW1ldGVycw==")
            .with("155", "RGlyZWN0aW9uIGRhdGE=")
            .with("160", false)
            .with("173", "R28gaG9tZSBkYXRh");
        Self::new(sample)
    }

    /// Replaces the sample returned by later fetches.
    pub fn set_sample(&self, sample: RawSample) {
        *self.sample.write() = sample;
    }

    /// Makes later fetches fail with [`FetchError::Unavailable`].
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.write() = Some(reason.into());
    }

    /// Makes later fetches succeed again.
    pub fn recover(&self) {
        *self.failure.write() = None;
    }

    /// Returns the number of fetches made, including failed ones.
    #[must_use]
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<RawSample, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self.failure.read().as_ref() {
            return Err(FetchError::Unavailable(reason.clone()));
        }
        Ok(self.sample.read().clone())
    }
}
