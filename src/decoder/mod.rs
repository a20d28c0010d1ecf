// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoders from raw data point values to typed readings.
//!
//! The vacuum reports its state as numbered data points. Five of them are
//! decoded:
//!
//! | Key   | Field         | Raw form                        |
//! |-------|---------------|---------------------------------|
//! | `163` | battery       | integer percentage              |
//! | `167` | water tank    | base64 blob, level in byte 4    |
//! | `158` | clean speed   | index into [`SpeedTable`]       |
//! | `153` | work status   | code in [`StatusTable`]         |
//! | `152` | play/pause    | truthy flag                     |
//!
//! All decoders are pure functions. A value that cannot be decoded yields
//! `None` (or a [`DecodeError`](crate::error::DecodeError) from the `try_`
//! variants); decoding never panics.
//!
//! # Examples
//!
//! ```
//! use robovac_lib::decoder::{decode_battery, decode_water_tank};
//! use robovac_lib::sample::RawValue;
//!
//! assert_eq!(decode_battery(&RawValue::Integer(85)).unwrap().value(), 85);
//! assert_eq!(decode_water_tank(&RawValue::from("AAAAANI=")).unwrap().value(), 82);
//! ```

mod config;
mod fields;
mod tables;

pub use config::{DEFAULT_EXPECTED_KEYS, DecoderConfig, DecoderConfigBuilder, FieldKeys};
pub use fields::{
    Field, FieldValue, WATER_TANK_BYTE_OFFSET, WaterTankReading, decode_battery,
    decode_clean_speed, decode_play_pause, decode_water_tank, decode_work_status,
    try_decode_battery, try_decode_clean_speed, try_decode_water_tank,
    try_decode_water_tank_reading, try_decode_work_status, water_tank_percentage,
};
pub use tables::{SpeedTable, StatusTable};
