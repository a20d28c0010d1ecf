// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for decoded vacuum readings.
//!
//! Each type guarantees its value is valid at construction time, so a
//! [`DecodedSnapshot`](crate::poll::DecodedSnapshot) never carries an
//! out-of-range reading.
//!
//! # Types
//!
//! - [`Percentage`] - Battery and water tank level (0-100%)
//! - [`CleanSpeed`] - Suction power setting
//! - [`WorkStatus`] - Current operating state
//! - [`BatteryLevel`], [`TankLevel`], [`PlaybackState`] - Coarse bands for display

mod clean_speed;
mod level;
mod percentage;
mod work_status;

pub use clean_speed::CleanSpeed;
pub use level::{BatteryLevel, PlaybackState, TankLevel};
pub use percentage::Percentage;
pub use work_status::WorkStatus;
