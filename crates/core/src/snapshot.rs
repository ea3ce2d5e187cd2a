//! Per-frame snapshot document
//!
//! A snapshot captures "everything that happened since the last frame":
//!
//! ```text
//! {
//!   "camera":       [camera, is_sequence, camera_seq_num, acquisition_seq_num],
//!   "busy_devices": [device, ...],                  // lexicographic
//!   "baseline":     [[[device, key], value], ...],  // key order
//!   "events":       [[[device, key], value, counter], ...],
//!   "epoch_start":  counter,                        // exclusive
//!   "epoch_end":    counter                         // inclusive
//! }
//! ```
//!
//! The top level is a msgpack map keyed by field name; every nested record is
//! a fixed-arity array (see `value`, `key` and `types`). The encoding is
//! self-describing, so a decoder needs no external schema.
//!
//! The logger encodes through [`SnapshotView`], which borrows its state, and
//! tests decode into the owned [`FrameSnapshot`]. Both produce identical
//! bytes for the same content.

use crate::error::{SeqlogError, SeqlogResult};
use crate::key::SettingKey;
use crate::types::{CameraInfo, Counter, SettingEvent};
use crate::value::SettingValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Borrowed snapshot, encoded while the logger's guard is held
#[derive(Debug, Serialize)]
pub struct SnapshotView<'a> {
    /// Frame context
    pub camera: &'a CameraInfo,
    /// Devices with a live busy marker
    pub busy_devices: Vec<&'a str>,
    /// Values as of the start of the epoch
    #[serde(serialize_with = "setting_pairs::serialize")]
    pub baseline: &'a BTreeMap<SettingKey, SettingValue>,
    /// Events recorded during the epoch, in counter order
    pub events: &'a [SettingEvent],
    /// Counter at the previous reset (exclusive bound)
    pub epoch_start: Counter,
    /// Counter at pack time (inclusive bound)
    pub epoch_end: Counter,
}

impl SnapshotView<'_> {
    /// Encode to msgpack
    pub fn encode(&self) -> SeqlogResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Append the msgpack encoding to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) -> SeqlogResult<()> {
        rmp_serde::encode::write_named(out, self)?;
        Ok(())
    }
}

/// Decoded snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameSnapshot {
    /// Frame context
    pub camera: CameraInfo,
    /// Devices with a live busy marker
    pub busy_devices: Vec<String>,
    /// Values as of the start of the epoch
    #[serde(deserialize_with = "setting_pairs::deserialize")]
    pub baseline: BTreeMap<SettingKey, SettingValue>,
    /// Events recorded during the epoch, in counter order
    pub events: Vec<SettingEvent>,
    /// Counter at the previous reset (exclusive bound)
    pub epoch_start: Counter,
    /// Counter at pack time (inclusive bound)
    pub epoch_end: Counter,
}

impl FrameSnapshot {
    /// Borrow as an encodable view
    pub fn as_view(&self) -> SnapshotView<'_> {
        SnapshotView {
            camera: &self.camera,
            busy_devices: self.busy_devices.iter().map(String::as_str).collect(),
            baseline: &self.baseline,
            events: &self.events,
            epoch_start: self.epoch_start,
            epoch_end: self.epoch_end,
        }
    }

    /// Encode to msgpack
    pub fn encode(&self) -> SeqlogResult<Vec<u8>> {
        self.as_view().encode()
    }

    /// Decode and validate a snapshot buffer
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` if the bytes are not a snapshot or if the
    /// event counters violate the epoch bounds.
    pub fn decode(bytes: &[u8]) -> SeqlogResult<Self> {
        let snapshot: FrameSnapshot = rmp_serde::from_slice(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check counter ordering against the epoch bounds
    ///
    /// Events must be strictly increasing and lie in `(epoch_start, epoch_end]`.
    pub fn validate(&self) -> SeqlogResult<()> {
        if self.epoch_start > self.epoch_end {
            return Err(SeqlogError::Deserialization(format!(
                "epoch start {} after end {}",
                self.epoch_start, self.epoch_end
            )));
        }
        let mut prev = self.epoch_start;
        for event in &self.events {
            if event.counter <= prev || event.counter > self.epoch_end {
                return Err(SeqlogError::Deserialization(format!(
                    "event {} at counter {} outside epoch ({}, {}] or out of order",
                    event.key, event.counter, self.epoch_start, self.epoch_end
                )));
            }
            prev = event.counter;
        }
        Ok(())
    }

    /// Events touching one device, in order
    pub fn events_for_device<'a>(
        &'a self,
        device: &'a str,
    ) -> impl Iterator<Item = &'a SettingEvent> + 'a {
        self.events.iter().filter(move |e| e.key.device() == device)
    }

    /// Whether `device` held a busy marker when the frame was packed
    pub fn was_busy(&self, device: &str) -> bool {
        self.busy_devices.iter().any(|d| d == device)
    }

    /// Baseline entries that carry state, without one-shot markers
    pub fn persistent_baseline(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.baseline
            .iter()
            .filter(|(_, v)| !v.is_one_shot())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Persistent setting values at the end of the epoch
    ///
    /// Replays the events over [`persistent_baseline`](Self::persistent_baseline).
    /// A one-shot overwrites whatever the key held, so it removes the key
    /// instead of inserting a marker. For logged history this equals the
    /// next frame's `persistent_baseline()`.
    pub fn final_values(&self) -> BTreeMap<SettingKey, SettingValue> {
        let mut values = self.persistent_baseline();
        for event in &self.events {
            if event.value.is_one_shot() {
                values.remove(&event.key);
            } else {
                values.insert(event.key.clone(), event.value.clone());
            }
        }
        values
    }
}

/// Maps encode as an array of `[key, value]` pairs in key order.
mod setting_pairs {
    use super::{SettingKey, SettingValue};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<SettingKey, SettingValue>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<SettingKey, SettingValue>, D::Error> {
        let pairs: Vec<(SettingKey, SettingValue)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
