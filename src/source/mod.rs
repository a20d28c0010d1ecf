// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where raw samples come from.
//!
//! The [`DataSource`] trait abstracts one fetch of the device's data points.
//! Two implementations are provided:
//!
//! - [`StaticSource`] - a fixed in-memory sample, for tests and demos
//! - [`HttpSource`] - a JSON endpoint over HTTP (requires the `http` feature)

#[cfg(feature = "http")]
mod http;
mod static_source;

#[cfg(feature = "http")]
pub use http::{HttpSource, HttpSourceConfig};
pub use static_source::StaticSource;

use std::sync::Arc;

use crate::error::FetchError;
use crate::sample::RawSample;

/// A provider of raw samples.
///
/// Each call returns a complete, fresh sample. Implementations must not
/// return partial data: a fetch either yields the whole sample or fails.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// Fetches the current raw sample.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if no sample could be obtained.
    async fn fetch(&self) -> Result<RawSample, FetchError>;
}

impl<T: DataSource> DataSource for Arc<T> {
    async fn fetch(&self) -> Result<RawSample, FetchError> {
        self.as_ref().fetch().await
    }
}
