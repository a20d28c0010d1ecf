// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-field decoders.
//!
//! Every decoder is pure and total. The `try_` variants report why a value was
//! rejected; the plain variants collapse any failure to `None`.

use std::fmt;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

use crate::error::DecodeError;
use crate::sample::RawValue;
use crate::types::{CleanSpeed, Percentage, WorkStatus};

use super::{SpeedTable, StatusTable};

/// Offset of the water tank level inside the decoded key 167 payload.
pub const WATER_TANK_BYTE_OFFSET: usize = 4;

/// Standard alphabet with padding, tolerating non-zero trailing bits.
const TANK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// The five decoded fields of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Battery percentage.
    Battery,
    /// Water tank percentage.
    WaterTank,
    /// Clean speed.
    CleanSpeed,
    /// Work status.
    WorkStatus,
    /// Play/pause flag.
    PlayPause,
}

impl Field {
    /// All fields in decoding order.
    pub const ALL: [Self; 5] = [
        Self::Battery,
        Self::WaterTank,
        Self::CleanSpeed,
        Self::WorkStatus,
        Self::PlayPause,
    ];

    /// Returns the field name used in snapshots and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::WaterTank => "water_tank",
            Self::CleanSpeed => "clean_speed",
            Self::WorkStatus => "work_status",
            Self::PlayPause => "play_pause",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully decoded field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// A battery or water tank level.
    Percentage(Percentage),
    /// A clean speed.
    CleanSpeed(CleanSpeed),
    /// A work status.
    WorkStatus(WorkStatus),
    /// The play/pause flag.
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(p) => write!(f, "{p}"),
            Self::CleanSpeed(s) => write!(f, "{s}"),
            Self::WorkStatus(s) => write!(f, "{s}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Water tank level together with the raw byte it was scaled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterTankReading {
    /// The byte at [`WATER_TANK_BYTE_OFFSET`].
    pub raw_byte: u8,
    /// The scaled level.
    pub level: Percentage,
}

// ========== Battery ==========

/// Decodes a battery level, clamping to [0, 100].
///
/// Accepts integers, finite floats (truncated) and text holding a decimal
/// integer. Booleans are rejected rather than read as 0 or 1.
///
/// # Errors
///
/// Returns `DecodeError` if the value is not integer-like.
#[allow(clippy::cast_possible_truncation)]
pub fn try_decode_battery(raw: &RawValue) -> Result<Percentage, DecodeError> {
    let value = match raw {
        RawValue::Integer(n) => *n,
        RawValue::Float(f) if f.is_finite() => f.trunc() as i64,
        RawValue::Float(f) => return Err(DecodeError::NotNumeric(f.to_string())),
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::NotNumeric(s.clone()))?,
        RawValue::Boolean(_) | RawValue::Null | RawValue::Other(_) => {
            return Err(DecodeError::UnexpectedType {
                expected: "integer",
                found: raw.kind(),
            });
        }
    };
    Ok(Percentage::clamped(value))
}

/// Decodes a battery level, or `None` if the value is not integer-like.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::decode_battery;
/// use robovac_lib::sample::RawValue;
///
/// assert_eq!(decode_battery(&RawValue::Integer(85)).map(|p| p.value()), Some(85));
/// assert_eq!(decode_battery(&RawValue::Integer(150)).map(|p| p.value()), Some(100));
/// assert_eq!(decode_battery(&RawValue::Integer(-5)).map(|p| p.value()), Some(0));
/// assert_eq!(decode_battery(&RawValue::from("full")), None);
/// ```
#[must_use]
pub fn decode_battery(raw: &RawValue) -> Option<Percentage> {
    try_decode_battery(raw).ok()
}

// ========== Water tank ==========

/// Scales a raw tank byte to a percentage: `min(100, floor(byte * 100 / 255))`.
///
/// This is a calibrated approximation, not an exact unit conversion.
#[must_use]
pub fn water_tank_percentage(byte: u8) -> Percentage {
    let scaled = u16::from(byte) * 100 / 255;
    Percentage::clamped(i64::from(scaled.min(100)))
}

/// Decodes the base64 payload and extracts the water tank byte and level.
///
/// # Errors
///
/// Returns `DecodeError` if the value is not text, is not valid base64, or
/// decodes to [`WATER_TANK_BYTE_OFFSET`] bytes or fewer. ASCII whitespace
/// inside the text and non-zero trailing bits are tolerated.
pub fn try_decode_water_tank_reading(raw: &RawValue) -> Result<WaterTankReading, DecodeError> {
    let text = raw.as_text().ok_or(DecodeError::UnexpectedType {
        expected: "base64 text",
        found: raw.kind(),
    })?;

    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = TANK_ENGINE.decode(compact)?;
    let raw_byte = *bytes
        .get(WATER_TANK_BYTE_OFFSET)
        .ok_or(DecodeError::InsufficientData { len: bytes.len() })?;

    Ok(WaterTankReading {
        raw_byte,
        level: water_tank_percentage(raw_byte),
    })
}

/// Decodes the water tank level.
///
/// # Errors
///
/// See [`try_decode_water_tank_reading`].
pub fn try_decode_water_tank(raw: &RawValue) -> Result<Percentage, DecodeError> {
    try_decode_water_tank_reading(raw).map(|reading| reading.level)
}

/// Decodes the water tank level, or `None` on any failure.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::decode_water_tank;
/// use robovac_lib::sample::RawValue;
///
/// // base64 of [0, 0, 0, 0, 210]
/// let level = decode_water_tank(&RawValue::from("AAAAANI=")).unwrap();
/// assert_eq!(level.value(), 82);
///
/// // base64 of [0, 0, 0, 0]: byte 4 does not exist
/// assert_eq!(decode_water_tank(&RawValue::from("AAAAAA==")), None);
/// ```
#[must_use]
pub fn decode_water_tank(raw: &RawValue) -> Option<Percentage> {
    try_decode_water_tank(raw).ok()
}

// ========== Clean speed ==========

/// Decodes a clean speed index through the speed table.
///
/// # Errors
///
/// Returns `DecodeError` if the value is not an integer or is outside the
/// table. Booleans are not integers here, so `true` never reads as index 1.
pub fn try_decode_clean_speed(
    raw: &RawValue,
    speeds: &SpeedTable,
) -> Result<CleanSpeed, DecodeError> {
    let index = raw.as_integer().ok_or(DecodeError::UnexpectedType {
        expected: "integer",
        found: raw.kind(),
    })?;
    speeds.get(index).ok_or(DecodeError::IndexOutOfRange(index))
}

/// Decodes a clean speed index, or `None` if it is invalid.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::{decode_clean_speed, SpeedTable};
/// use robovac_lib::sample::RawValue;
/// use robovac_lib::types::CleanSpeed;
///
/// let table = SpeedTable::default();
/// assert_eq!(decode_clean_speed(&RawValue::Integer(2), &table), Some(CleanSpeed::Turbo));
/// assert_eq!(decode_clean_speed(&RawValue::Integer(4), &table), None);
/// assert_eq!(decode_clean_speed(&RawValue::Integer(-1), &table), None);
/// ```
#[must_use]
pub fn decode_clean_speed(raw: &RawValue, speeds: &SpeedTable) -> Option<CleanSpeed> {
    try_decode_clean_speed(raw, speeds).ok()
}

// ========== Work status ==========

/// Decodes a work status code through the status table.
///
/// # Errors
///
/// Returns `DecodeError` if the value is not an integer or the code is not
/// mapped. Booleans are not integers here, so `true` never reads as code 1.
pub fn try_decode_work_status(
    raw: &RawValue,
    statuses: &StatusTable,
) -> Result<WorkStatus, DecodeError> {
    let code = raw.as_integer().ok_or(DecodeError::UnexpectedType {
        expected: "integer",
        found: raw.kind(),
    })?;
    statuses.get(code).ok_or(DecodeError::UnmappedStatus(code))
}

/// Decodes a work status code, or `None` if it is not mapped.
///
/// # Examples
///
/// ```
/// use robovac_lib::decoder::{decode_work_status, StatusTable};
/// use robovac_lib::sample::RawValue;
/// use robovac_lib::types::WorkStatus;
///
/// let table = StatusTable::default();
/// assert_eq!(decode_work_status(&RawValue::Integer(5), &table), Some(WorkStatus::Cleaning));
/// assert_eq!(decode_work_status(&RawValue::Integer(99), &table), None);
/// ```
#[must_use]
pub fn decode_work_status(raw: &RawValue, statuses: &StatusTable) -> Option<WorkStatus> {
    try_decode_work_status(raw, statuses).ok()
}

// ========== Play/pause ==========

/// Decodes the play/pause flag by truthiness. Never fails.
#[must_use]
pub fn decode_play_pause(raw: &RawValue) -> bool {
    raw.is_truthy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose;

    fn b64(bytes: &[u8]) -> RawValue {
        RawValue::Text(general_purpose::STANDARD.encode(bytes))
    }

    #[test]
    fn battery_passes_through_in_range() {
        for v in [0, 1, 50, 85, 100] {
            let level = decode_battery(&RawValue::Integer(v)).unwrap();
            assert_eq!(i64::from(level.value()), v);
        }
    }

    #[test]
    fn battery_clamps_out_of_range() {
        assert_eq!(decode_battery(&RawValue::Integer(-5)).unwrap().value(), 0);
        assert_eq!(decode_battery(&RawValue::Integer(150)).unwrap().value(), 100);
        assert_eq!(
            decode_battery(&RawValue::Integer(i64::MAX)).unwrap().value(),
            100
        );
    }

    #[test]
    fn battery_accepts_numeric_text_and_floats() {
        assert_eq!(decode_battery(&RawValue::from(" 42 ")).unwrap().value(), 42);
        assert_eq!(decode_battery(&RawValue::Float(87.9)).unwrap().value(), 87);
        assert_eq!(decode_battery(&RawValue::Float(-0.5)).unwrap().value(), 0);
    }

    #[test]
    fn battery_rejects_non_numeric() {
        assert_eq!(
            try_decode_battery(&RawValue::from("abc")),
            Err(DecodeError::NotNumeric("abc".to_string()))
        );
        assert!(decode_battery(&RawValue::from("85.5")).is_none());
        assert!(decode_battery(&RawValue::Float(f64::NAN)).is_none());
        assert!(decode_battery(&RawValue::Null).is_none());
        assert!(decode_battery(&RawValue::Other(serde_json::json!([85]))).is_none());
        assert_eq!(
            try_decode_battery(&RawValue::Boolean(true)),
            Err(DecodeError::UnexpectedType {
                expected: "integer",
                found: "boolean",
            })
        );
    }

    #[test]
    fn water_tank_scales_byte_four() {
        assert_eq!(
            decode_water_tank(&b64(&[0, 0, 0, 0, 210])).unwrap().value(),
            82
        );
        assert_eq!(decode_water_tank(&b64(&[0, 0, 0, 0, 0])).unwrap().value(), 0);
        assert_eq!(
            decode_water_tank(&b64(&[0, 0, 0, 0, 255])).unwrap().value(),
            100
        );
        // Only byte 4 matters
        assert_eq!(
            decode_water_tank(&b64(&[9, 9, 9, 9, 128, 7, 7])).unwrap().value(),
            50
        );
    }

    #[test]
    fn water_tank_percentage_formula() {
        for byte in 0..=u8::MAX {
            let expected = (u32::from(byte) * 100 / 255).min(100);
            assert_eq!(u32::from(water_tank_percentage(byte).value()), expected);
        }
    }

    #[test]
    fn water_tank_reading_keeps_raw_byte() {
        let reading = try_decode_water_tank_reading(&RawValue::from("AAAAANI=")).unwrap();
        assert_eq!(reading.raw_byte, 0xD2);
        assert_eq!(reading.level.value(), 82);
    }

    #[test]
    fn water_tank_rejects_short_payloads() {
        for len in 0..=WATER_TANK_BYTE_OFFSET {
            let bytes = vec![0xFF; len];
            assert_eq!(
                try_decode_water_tank(&b64(&bytes)),
                Err(DecodeError::InsufficientData { len })
            );
        }
    }

    #[test]
    fn water_tank_rejects_malformed_base64() {
        assert!(matches!(
            try_decode_water_tank(&RawValue::from("not base64!")),
            Err(DecodeError::InvalidBase64(_))
        ));
        assert!(decode_water_tank(&RawValue::Integer(210)).is_none());
        assert!(decode_water_tank(&RawValue::Other(serde_json::json!([1, 2, 3]))).is_none());
    }

    #[test]
    fn water_tank_tolerates_trailing_bits() {
        // "J" leaves non-zero bits after byte 210
        let reading = try_decode_water_tank_reading(&RawValue::from("AAAAANJ=")).unwrap();
        assert_eq!(reading.raw_byte, 210);
        assert_eq!(reading.level.value(), 82);
    }

    #[test]
    fn water_tank_ignores_embedded_whitespace() {
        assert_eq!(
            decode_water_tank(&RawValue::from("AAAA\nANI=")).map(|p| p.value()),
            Some(82)
        );
        assert_eq!(
            decode_water_tank(&RawValue::from(" AAAA ANI=\r\n")).map(|p| p.value()),
            Some(82)
        );
    }

    #[test]
    fn clean_speed_lookup() {
        let table = SpeedTable::default();
        assert_eq!(
            decode_clean_speed(&RawValue::Integer(0), &table),
            Some(CleanSpeed::Quiet)
        );
        assert_eq!(
            decode_clean_speed(&RawValue::Integer(2), &table),
            Some(CleanSpeed::Turbo)
        );
        assert_eq!(
            try_decode_clean_speed(&RawValue::Integer(4), &table),
            Err(DecodeError::IndexOutOfRange(4))
        );
        assert_eq!(
            try_decode_clean_speed(&RawValue::Integer(-1), &table),
            Err(DecodeError::IndexOutOfRange(-1))
        );
    }

    #[test]
    fn clean_speed_rejects_non_integers() {
        let table = SpeedTable::default();
        assert!(decode_clean_speed(&RawValue::Boolean(true), &table).is_none());
        assert!(decode_clean_speed(&RawValue::Float(2.0), &table).is_none());
        assert!(decode_clean_speed(&RawValue::from("2"), &table).is_none());
        assert_eq!(
            try_decode_clean_speed(&RawValue::Other(serde_json::json!({"speed": 2})), &table),
            Err(DecodeError::UnexpectedType {
                expected: "integer",
                found: "other",
            })
        );
    }

    #[test]
    fn work_status_lookup() {
        let table = StatusTable::default();
        assert_eq!(
            decode_work_status(&RawValue::Integer(5), &table),
            Some(WorkStatus::Cleaning)
        );
        assert_eq!(
            decode_work_status(&RawValue::Integer(7), &table),
            Some(WorkStatus::GoHome)
        );
        assert_eq!(
            try_decode_work_status(&RawValue::Integer(99), &table),
            Err(DecodeError::UnmappedStatus(99))
        );
        assert!(decode_work_status(&RawValue::Null, &table).is_none());
        assert!(decode_work_status(&RawValue::Boolean(true), &table).is_none());
    }

    #[test]
    fn play_pause_truthiness() {
        assert!(decode_play_pause(&RawValue::Boolean(true)));
        assert!(!decode_play_pause(&RawValue::Boolean(false)));
        assert!(decode_play_pause(&RawValue::Integer(1)));
        assert!(!decode_play_pause(&RawValue::Integer(0)));
        assert!(!decode_play_pause(&RawValue::Null));
        assert!(decode_play_pause(&RawValue::from("paused")));
    }

    #[test]
    fn field_value_display() {
        assert_eq!(
            FieldValue::Percentage(Percentage::clamped(82)).to_string(),
            "82%"
        );
        assert_eq!(FieldValue::CleanSpeed(CleanSpeed::Max).to_string(), "max");
        assert_eq!(FieldValue::Flag(true).to_string(), "true");
        assert_eq!(Field::WaterTank.to_string(), "water_tank");
    }
}
