//! Record types shared by the logger and snapshot decoders
//!
//! - SettingEvent: one recorded change, stamped with its logical counter
//! - CameraInfo: frame context supplied by the acquiring camera
//! - BusyPoint: "device became busy at logical time T"
//!
//! Composite records encode as fixed-arity msgpack arrays.

use crate::key::SettingKey;
use crate::value::SettingValue;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

/// Logical time assigned to a mutating operation
pub type Counter = u64;

/// One recorded setting change
///
/// Encoded as `[key, value, counter]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettingEvent {
    /// Setting that changed
    pub key: SettingKey,
    /// New value (OneShot for triggers and busy transitions)
    pub value: SettingValue,
    /// Logical time of the change
    pub counter: Counter,
}

impl SettingEvent {
    /// Create a new event
    pub fn new(key: SettingKey, value: SettingValue, counter: Counter) -> Self {
        Self {
            key,
            value,
            counter,
        }
    }
}

impl Serialize for SettingEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.key)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.counter)?;
        tuple.end()
    }
}

/// Frame context for one snapshot
///
/// Opaque to the logger; written verbatim as
/// `[camera, is_sequence, camera_seq_num, acquisition_seq_num]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CameraInfo {
    /// Camera device name
    pub camera: String,
    /// Whether the frame belongs to a sequence acquisition
    pub is_sequence: bool,
    /// Per-camera sequence number
    pub camera_seq_num: u64,
    /// Frame number within the current acquisition
    pub acquisition_seq_num: u64,
}

impl CameraInfo {
    /// Create frame context
    pub fn new(
        camera: impl Into<String>,
        is_sequence: bool,
        camera_seq_num: u64,
        acquisition_seq_num: u64,
    ) -> Self {
        Self {
            camera: camera.into(),
            is_sequence,
            camera_seq_num,
            acquisition_seq_num,
        }
    }

    /// Frame context for a single snap (not part of a sequence)
    pub fn snap(camera: impl Into<String>, camera_seq_num: u64) -> Self {
        Self::new(camera, false, camera_seq_num, 0)
    }
}

impl Serialize for CameraInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.camera)?;
        tuple.serialize_element(&self.is_sequence)?;
        tuple.serialize_element(&self.camera_seq_num)?;
        tuple.serialize_element(&self.acquisition_seq_num)?;
        tuple.end()
    }
}

/// A device's "became busy" marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyPoint {
    /// Logical time the device was marked busy
    pub counter: Counter,
}
