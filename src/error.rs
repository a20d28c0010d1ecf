// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `RoboVac` library.
//!
//! Only two kinds of failure ever reach a caller: configuration errors, which
//! are raised once at construction, and fetch errors, which fail a whole poll
//! cycle. Per-field [`DecodeError`]s are absorbed by the aggregator and only
//! surface through observers.

use thiserror::Error;

use crate::types::CleanSpeed;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration was supplied at construction time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The raw sample could not be obtained for this cycle.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A poll was requested after the poller was shut down.
    #[error("poller has been shut down")]
    ShutDown,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A string did not name a known clean speed.
    #[error("invalid clean speed: {0}")]
    InvalidCleanSpeed(String),

    /// A string did not name a known work status.
    #[error("invalid work status: {0}")]
    InvalidWorkStatus(String),
}

/// Errors raised while validating decoder or poller configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The expected key set is empty.
    #[error("expected key set must not be empty")]
    EmptyExpectedKeys,

    /// A key identifier is the empty string.
    #[error("key identifiers must not be empty")]
    EmptyKey,

    /// The same key appears twice in the expected key set.
    #[error("duplicate expected key: {0}")]
    DuplicateKey(String),

    /// The clean speed table has no entries.
    #[error("clean speed table must not be empty")]
    EmptyCleanSpeeds,

    /// The same clean speed appears twice in the table.
    #[error("duplicate clean speed: {0}")]
    DuplicateCleanSpeed(CleanSpeed),

    /// The work status table has no entries.
    #[error("work status table must not be empty")]
    EmptyWorkStatuses,

    /// The same status code is mapped twice.
    #[error("duplicate work status code: {0}")]
    DuplicateStatusCode(i64),

    /// The poll interval is zero.
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    /// No device identifier was configured.
    #[error("device id is required")]
    MissingDeviceId,
}

/// Errors raised while obtaining a raw sample from a data source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected HTTP status {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The response body is not a key-value object.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The source could not produce data for another reason.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a single raw value could not be decoded.
///
/// These never abort a poll cycle; the affected field is left absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The raw value has the wrong variant for this field.
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        /// What the decoder accepts.
        expected: &'static str,
        /// The variant that was found.
        found: &'static str,
    },

    /// A text value does not hold an integer.
    #[error("not a number: {0:?}")]
    NotNumeric(String),

    /// The base64 payload is malformed.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded payload is too short to contain the wanted byte.
    #[error("insufficient data: {len} bytes")]
    InsufficientData {
        /// Length of the decoded payload.
        len: usize,
    },

    /// An index is outside the lookup table.
    #[error("index {0} is out of range")]
    IndexOutOfRange(i64),

    /// A status code has no mapping.
    #[error("unmapped status code {0}")]
    UnmappedStatus(i64),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
