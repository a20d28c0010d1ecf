// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RoboVac` Lib - A Rust library to poll robot vacuum data points.
//!
//! Robot vacuums of the Eufy `RoboVac` family report their state as a flat set
//! of numbered data points, some plain integers and some base64 blobs. This
//! library fetches those data points, decodes them into typed readings and
//! reports which of the expected keys the device actually sent.
//!
//! # Supported Readings
//!
//! - **Battery**: percentage, clamped to 0-100
//! - **Water tank**: percentage, scaled from byte 4 of a base64 blob
//! - **Clean speed**: quiet, standard, turbo, max
//! - **Work status**: standby, sleep, fault, charging, cleaning, ...
//! - **Play/pause**: whether the current job is running
//!
//! Values that cannot be decoded are reported as absent; decoding never fails
//! a poll cycle. Only a failed fetch does, and then the previous snapshot is
//! kept.
//!
//! # Quick Start
//!
//! ## Decoding a Single Sample
//!
//! ```
//! use robovac_lib::poll::Aggregator;
//! use robovac_lib::sample::RawSample;
//! use robovac_lib::types::WorkStatus;
//!
//! let sample = RawSample::from_json(r#"{"163": 85, "153": 5, "152": true}"#)?;
//! let snapshot = Aggregator::default().aggregate(&sample, 1);
//!
//! assert_eq!(snapshot.work_status(), Some(WorkStatus::Cleaning));
//! assert_eq!(snapshot.presence().summary(), "3/12");
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Polling an HTTP Endpoint
//!
//! ```no_run
//! use std::sync::Arc;
//! use robovac_lib::observer::ObserverRegistry;
//! use robovac_lib::poll::Aggregator;
//! use robovac_lib::poller::{Poller, PollerConfig};
//! use robovac_lib::source::HttpSourceConfig;
//!
//! #[tokio::main]
//! async fn main() -> robovac_lib::Result<()> {
//!     let source = HttpSourceConfig::new("192.168.1.50:8080", "vacuum-01")
//!         .with_credentials("admin", "secret")
//!         .into_source()?;
//!
//!     // Log every decoded field through `tracing`
//!     let aggregator = Aggregator::default()
//!         .with_observers(Arc::new(ObserverRegistry::with_tracing()));
//!
//!     let poller = Poller::new(source, aggregator, PollerConfig::new("vacuum-01"))?;
//!     let snapshot = poller.poll_once().await?;
//!
//!     println!("battery: {:?}", snapshot.battery_level());
//!     println!("coverage: {}%", snapshot.presence().coverage_percent());
//!     Ok(())
//! }
//! ```

pub mod decoder;
pub mod error;
pub mod observer;
pub mod poll;
pub mod poller;
pub mod sample;
pub mod source;
pub mod types;

pub use decoder::{DecoderConfig, Field, FieldValue};
pub use error::{ConfigError, DecodeError, Error, FetchError, Result, ValueError};
pub use observer::{ObserverRegistry, SubscriptionId, TracingObserver};
pub use poll::{Aggregator, DecodedSnapshot, KeyPresence, Readings};
pub use poller::{PollState, Poller, PollerConfig};
pub use sample::{RawSample, RawValue};
#[cfg(feature = "http")]
pub use source::{HttpSource, HttpSourceConfig};
pub use source::{DataSource, StaticSource};
pub use types::{BatteryLevel, CleanSpeed, Percentage, PlaybackState, TankLevel, WorkStatus};
