// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single raw data point value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw value as reported by the device for one data point key.
///
/// Values usually arrive as JSON scalars; binary payloads are carried as base64
/// text. Arrays and objects are kept as [`Other`](Self::Other) so that one
/// structured value never spoils the rest of the sample.
///
/// # Examples
///
/// ```
/// use robovac_lib::sample::RawValue;
///
/// let value: RawValue = serde_json::from_str("85").unwrap();
/// assert_eq!(value, RawValue::Integer(85));
///
/// let value: RawValue = serde_json::from_str("\"AAAAANI=\"").unwrap();
/// assert_eq!(value.as_text(), Some("AAAAANI="));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A boolean flag.
    Boolean(bool),
    /// A whole number.
    Integer(i64),
    /// A number with a fractional part.
    Float(f64),
    /// Text, usually a base64 encoded byte sequence.
    Text(String),
    /// The key is present but carries no value.
    Null,
    /// Any other JSON value, such as an array or object.
    Other(serde_json::Value),
}

impl RawValue {
    /// Returns a short name for the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Null => "null",
            Self::Other(_) => "other",
        }
    }

    /// Returns the integer if this is an [`Integer`](Self::Integer).
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text if this is a [`Text`](Self::Text).
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces the value to a boolean.
    ///
    /// Zero, empty text, empty collections and null are false; everything
    /// else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::Null => false,
            Self::Other(value) => match value {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(items) => !items.is_empty(),
                serde_json::Value::Object(fields) => !fields.is_empty(),
            },
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Null => f.write_str("null"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
