// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw data point samples.
//!
//! A [`RawSample`] is what one poll of the device returns: a flat mapping from
//! data point keys (numeric strings such as `"163"`) to [`RawValue`]s. Samples
//! are immutable once built and are replaced wholesale by the next poll.
//!
//! # Examples
//!
//! ```
//! use robovac_lib::sample::{RawSample, RawValue};
//!
//! let sample = RawSample::from_json(r#"{"163": 85, "152": true}"#).unwrap();
//! assert_eq!(sample.get("163"), Some(&RawValue::Integer(85)));
//! assert!(sample.contains_key("152"));
//! assert!(!sample.contains_key("167"));
//! ```

mod raw_value;

pub use raw_value::RawValue;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One poll's raw key-value data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSample {
    values: BTreeMap<String, RawValue>,
}

impl RawSample {
    /// Creates an empty sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a sample from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Returns a copy of this sample with an extra value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    /// Returns `true` if the key is present, whatever its value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns all keys in the sample, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns all key-value pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the sample has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawSample
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mixed_payload() {
        let sample = RawSample::from_json(
            r#"{"163": 85, "167": "AAAAANI=", "152": true, "160": false, "x": null}"#,
        )
        .unwrap();

        assert_eq!(sample.len(), 5);
        assert_eq!(sample.get("167"), Some(&RawValue::from("AAAAANI=")));
        assert_eq!(sample.get("x"), Some(&RawValue::Null));
        assert!(sample.contains_key("x"));
    }

    #[test]
    fn parse_keeps_structured_values() {
        let sample = RawSample::from_json(r#"{"163": 85, "168": {"a": 1}}"#).unwrap();
        assert_eq!(sample.get("163"), Some(&RawValue::Integer(85)));
        assert_eq!(sample.get("168").map(RawValue::kind), Some("other"));
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(RawSample::from_json("[1, 2, 3]").is_err());
        assert!(RawSample::from_json("not json").is_err());
    }

    #[test]
    fn keys_are_sorted() {
        let sample: RawSample = [("167", 1), ("152", 2), ("163", 3)].into_iter().collect();
        assert_eq!(sample.keys().collect::<Vec<_>>(), ["152", "163", "167"]);
    }

    #[test]
    fn builder_style_insert() {
        let sample = RawSample::new().with("163", 85).with("152", true);
        assert_eq!(sample.get("163"), Some(&RawValue::Integer(85)));
        assert_eq!(sample.get("152"), Some(&RawValue::Boolean(true)));
        assert!(!sample.is_empty());
    }
}
