//! Setting key: identity of one device property
//!
//! A `SettingKey` is an immutable value type. Two keys are equal iff both the
//! device name and the property name are equal, and keys order
//! lexicographically by `(device, key)` so that map iteration (and therefore
//! snapshot encoding) is deterministic.
//!
//! On the wire a key is the 2-element array `[device, key]`.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Composite (device, property) key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct SettingKey {
    device: String,
    key: String,
}

impl SettingKey {
    /// Create a new key
    pub fn new(device: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            key: key.into(),
        }
    }

    /// Device name
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Property name within the device
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device, self.key)
    }
}

impl Serialize for SettingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.device)?;
        tuple.serialize_element(&self.key)?;
        tuple.end()
    }
}
