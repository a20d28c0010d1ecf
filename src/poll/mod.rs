// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll aggregation.
//!
//! One poll cycle turns a [`RawSample`](crate::sample::RawSample) into a
//! [`DecodedSnapshot`]: the five decoders run independently, and every key of
//! the expected key set is classified as found or missing.

mod aggregator;
mod snapshot;

pub use aggregator::{Aggregator, aggregate};
pub use snapshot::{DecodedSnapshot, KeyPresence, Readings};
