// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns one raw sample into a decoded snapshot.

use std::sync::Arc;

use crate::decoder::{
    DecoderConfig, Field, FieldValue, decode_play_pause, try_decode_battery,
    try_decode_clean_speed, try_decode_water_tank_reading, try_decode_work_status,
};
use crate::error::DecodeError;
use crate::observer::{FieldEvent, FieldOutcome, ObserverRegistry};
use crate::sample::{RawSample, RawValue};

use super::snapshot::{DecodedSnapshot, KeyPresence, Readings};

/// Aggregates raw samples using a fixed decoder configuration.
///
/// # Examples
///
/// ```
/// use robovac_lib::poll::Aggregator;
/// use robovac_lib::sample::RawSample;
/// use robovac_lib::types::{CleanSpeed, WorkStatus};
///
/// let sample = RawSample::from_json(
///     r#"{"163": 85, "158": 2, "153": 5, "152": true, "167": "AAAAANI="}"#,
/// ).unwrap();
///
/// let snapshot = Aggregator::default().aggregate(&sample, 1);
/// assert_eq!(snapshot.battery().map(|b| b.value()), Some(85));
/// assert_eq!(snapshot.water_tank().map(|w| w.value()), Some(82));
/// assert_eq!(snapshot.clean_speed(), Some(CleanSpeed::Turbo));
/// assert_eq!(snapshot.work_status(), Some(WorkStatus::Cleaning));
/// assert_eq!(snapshot.presence().summary(), "5/12");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: DecoderConfig,
    observers: Option<Arc<ObserverRegistry>>,
}

impl Aggregator {
    /// Creates an aggregator without observers.
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            observers: None,
        }
    }

    /// Attaches an observer registry notified on every cycle.
    #[must_use]
    pub fn with_observers(mut self, observers: Arc<ObserverRegistry>) -> Self {
        self.observers = Some(observers);
        self
    }

    /// Returns the decoder configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the attached observer registry, if any.
    #[must_use]
    pub fn observers(&self) -> Option<&Arc<ObserverRegistry>> {
        self.observers.as_ref()
    }

    /// Decodes a sample into a snapshot.
    ///
    /// Never fails: undecodable values leave their field empty and are
    /// reported to the observers.
    #[must_use]
    pub fn aggregate(&self, sample: &RawSample, sequence: u64) -> DecodedSnapshot {
        let Some(observers) = &self.observers else {
            return aggregate(&self.config, sample, sequence);
        };

        let snapshot = decode_sample(&self.config, sample, sequence, |event| {
            observers.dispatch_field(event);
        });
        observers.dispatch_snapshot(&snapshot);
        snapshot
    }
}

/// Decodes a sample into a snapshot without notifying anyone.
#[must_use]
pub fn aggregate(config: &DecoderConfig, sample: &RawSample, sequence: u64) -> DecodedSnapshot {
    decode_sample(config, sample, sequence, |_| {})
}

fn decode_sample<N>(
    config: &DecoderConfig,
    sample: &RawSample,
    sequence: u64,
    notify: N,
) -> DecodedSnapshot
where
    N: FnMut(&FieldEvent<'_>),
{
    let keys = config.field_keys();
    let mut cycle = Cycle {
        sample,
        sequence,
        notify,
    };

    let battery = cycle.field(
        Field::Battery,
        &keys.battery,
        try_decode_battery,
        |p| FieldValue::Percentage(*p),
    );
    let tank = cycle.field(
        Field::WaterTank,
        &keys.water_tank,
        try_decode_water_tank_reading,
        |r| FieldValue::Percentage(r.level),
    );
    let clean_speed = cycle.field(
        Field::CleanSpeed,
        &keys.clean_speed,
        |raw| try_decode_clean_speed(raw, config.speeds()),
        |s| FieldValue::CleanSpeed(*s),
    );
    let work_status = cycle.field(
        Field::WorkStatus,
        &keys.work_status,
        |raw| try_decode_work_status(raw, config.statuses()),
        |s| FieldValue::WorkStatus(*s),
    );
    let play_pause = cycle.field(
        Field::PlayPause,
        &keys.play_pause,
        |raw| Ok(decode_play_pause(raw)),
        |b| FieldValue::Flag(*b),
    );

    let readings = Readings {
        battery,
        water_tank: tank.map(|r| r.level),
        clean_speed,
        work_status,
        play_pause,
    };
    let presence = KeyPresence::classify(config.expected_keys(), sample);

    DecodedSnapshot::new(
        sequence,
        readings,
        presence,
        sample,
        tank.map(|r| r.raw_byte),
    )
}

/// Per-cycle decoding context.
struct Cycle<'a, N> {
    sample: &'a RawSample,
    sequence: u64,
    notify: N,
}

impl<N> Cycle<'_, N>
where
    N: FnMut(&FieldEvent<'_>),
{
    fn field<T>(
        &mut self,
        field: Field,
        key: &str,
        decode: impl FnOnce(&RawValue) -> Result<T, DecodeError>,
        describe: impl FnOnce(&T) -> FieldValue,
    ) -> Option<T> {
        let raw = self.sample.get(key);
        let result = raw.map(decode);

        let outcome = match &result {
            None => FieldOutcome::Missing,
            Some(Ok(value)) => FieldOutcome::Decoded(describe(value)),
            Some(Err(error)) => FieldOutcome::Failed(error.clone()),
        };
        (self.notify)(&FieldEvent {
            sequence: self.sequence,
            field,
            key,
            raw,
            outcome,
        });

        result.and_then(Result::ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DEFAULT_EXPECTED_KEYS;
    use crate::types::{CleanSpeed, PlaybackState, WorkStatus};
    use parking_lot::Mutex;

    fn reference_sample() -> RawSample {
        RawSample::from_json(r#"{"163":85,"158":2,"153":5,"152":true,"167":"AAAAANI="}"#)
            .unwrap()
    }

    #[test]
    fn end_to_end_reference_sample() {
        let snapshot = aggregate(&DecoderConfig::default(), &reference_sample(), 1);

        assert_eq!(snapshot.sequence(), 1);
        assert_eq!(snapshot.battery().map(|b| b.value()), Some(85));
        assert_eq!(snapshot.water_tank().map(|w| w.value()), Some(82));
        assert_eq!(snapshot.water_tank_byte(), Some(210));
        assert_eq!(snapshot.clean_speed(), Some(CleanSpeed::Turbo));
        assert_eq!(snapshot.work_status(), Some(WorkStatus::Cleaning));
        assert_eq!(snapshot.playback(), PlaybackState::Playing);

        assert_eq!(
            snapshot.presence().found(),
            ["163", "167", "153", "152", "158"]
        );
        assert_eq!(
            snapshot.presence().missing(),
            ["177", "178", "168", "154", "155", "160", "173"]
        );
        assert_eq!(snapshot.raw_keys(), ["152", "153", "158", "163", "167"]);
    }

    #[test]
    fn empty_sample_yields_all_missing() {
        let snapshot = aggregate(&DecoderConfig::default(), &RawSample::new(), 2);

        assert_eq!(*snapshot.readings(), Readings::default());
        assert!(snapshot.presence().found().is_empty());
        assert_eq!(snapshot.presence().missing(), DEFAULT_EXPECTED_KEYS);
        assert_eq!(snapshot.playback(), PlaybackState::Unknown);
    }

    #[test]
    fn present_but_invalid_values_are_found_yet_absent() {
        let sample = RawSample::new()
            .with("163", "full")
            .with("167", "AAA=")
            .with("158", 4)
            .with("153", 99);

        let snapshot = aggregate(&DecoderConfig::default(), &sample, 1);
        assert_eq!(*snapshot.readings(), Readings::default());
        assert_eq!(snapshot.presence().found(), ["163", "167", "153", "158"]);
    }

    #[test]
    fn structured_values_only_blank_their_own_field() {
        let sample = RawSample::from_json(r#"{"163": 85, "167": [1, 2, 3], "168": {"a": 1}}"#)
            .unwrap();
        let snapshot = aggregate(&DecoderConfig::default(), &sample, 1);

        assert_eq!(snapshot.battery().map(|b| b.value()), Some(85));
        assert_eq!(snapshot.water_tank(), None);
        assert_eq!(snapshot.water_tank_byte(), None);
        assert!(snapshot.presence().is_found("167"));
        assert!(snapshot.presence().is_found("168"));
        assert_eq!(snapshot.presence().summary(), "3/12");
    }

    #[test]
    fn found_and_missing_partition_expected_keys() {
        let config = DecoderConfig::default();
        let samples = [
            RawSample::new(),
            reference_sample(),
            DEFAULT_EXPECTED_KEYS.iter().map(|k| (*k, 1)).collect(),
            RawSample::new().with("unrelated", 1).with("160", false),
        ];

        for sample in &samples {
            let presence = aggregate(&config, sample, 1).presence().clone();
            let mut all: Vec<&String> = presence.found().iter().chain(presence.missing()).collect();
            all.sort();
            all.dedup();
            assert_eq!(all.len(), DEFAULT_EXPECTED_KEYS.len());
            assert_eq!(presence.total(), DEFAULT_EXPECTED_KEYS.len());
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let config = DecoderConfig::default();
        let sample = reference_sample();

        let first = aggregate(&config, &sample, 7);
        let second = aggregate(&config, &sample, 7);
        assert_eq!(first.readings(), second.readings());
        assert_eq!(first.presence(), second.presence());
        assert_eq!(first.raw_keys(), second.raw_keys());
    }

    #[test]
    fn custom_field_keys() {
        let config = DecoderConfig::builder()
            .expected_keys(["b"])
            .battery_key("b")
            .build()
            .unwrap();
        let snapshot = aggregate(&config, &RawSample::new().with("b", 40), 1);

        assert_eq!(snapshot.battery().map(|b| b.value()), Some(40));
        assert_eq!(snapshot.presence().summary(), "1/1");
    }

    #[test]
    fn observers_see_every_field_and_snapshot() {
        let registry = Arc::new(ObserverRegistry::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        let snapshots = Arc::new(Mutex::new(Vec::new()));

        let events_clone = Arc::clone(&events);
        registry.on_field(move |event| {
            events_clone.lock().push((event.field, event.outcome.clone()));
        });
        let snapshots_clone = Arc::clone(&snapshots);
        registry.on_snapshot(move |snapshot| {
            snapshots_clone.lock().push(snapshot.sequence());
        });

        let aggregator = Aggregator::default().with_observers(registry);
        let sample = RawSample::new().with("163", 85).with("158", 4);
        let _ = aggregator.aggregate(&sample, 9);

        let events = events.lock();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            (
                Field::Battery,
                FieldOutcome::Decoded(FieldValue::Percentage(crate::types::Percentage::clamped(85)))
            )
        );
        assert_eq!(events[1], (Field::WaterTank, FieldOutcome::Missing));
        assert_eq!(
            events[2],
            (
                Field::CleanSpeed,
                FieldOutcome::Failed(DecodeError::IndexOutOfRange(4))
            )
        );
        assert_eq!(*snapshots.lock(), [9]);
    }
}
