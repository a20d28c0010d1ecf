// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll cycle observers.
//!
//! Decoding failures never abort a cycle, so they are only visible here. An
//! [`ObserverRegistry`] collects callbacks for three kinds of event:
//!
//! - a [`FieldEvent`] for each of the five decoded fields,
//! - the finished [`DecodedSnapshot`](crate::poll::DecodedSnapshot),
//! - a fetch failure, reported by the [`Poller`](crate::poller::Poller).
//!
//! [`TracingObserver`] forwards all of them to `tracing`.

mod logging;
mod registry;

pub use logging::TracingObserver;
pub use registry::{FieldEvent, FieldOutcome, ObserverRegistry, SubscriptionId};
