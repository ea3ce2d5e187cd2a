//! Value types for device settings
//!
//! This module defines:
//! - SettingValue: the typed payload recorded for one device property
//!
//! ## Value Model
//!
//! The SettingValue enum has exactly 4 variants:
//! - Integer, Float, String, OneShot
//!
//! `OneShot` carries no payload. It marks that an instantaneous trigger
//! happened at a given logical time rather than a persistent property.
//!
//! ## Wire Form
//!
//! Each value encodes as one tagged msgpack array, independent of the
//! encoder's struct configuration:
//!
//! ```text
//! ["int", i64]   ["float", f64]   ["string", str]   ["one_shot"]
//! ```
//!
//! Floats are always written as float64 and integers are never narrowed,
//! so decoding reproduces the exact value.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const TAG_INTEGER: &str = "int";
const TAG_FLOAT: &str = "float";
const TAG_STRING: &str = "string";
const TAG_ONE_SHOT: &str = "one_shot";

/// Current value of a device setting
///
/// Different variants are NEVER equal, even if they hold the "same" number:
/// - `Integer(1) != Float(1.0)`
///
/// Float equality follows IEEE-754 semantics (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// String payload
    String(String),
    /// Payload-less trigger marker
    OneShot,
}

impl SettingValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Integer(_) => "Integer",
            SettingValue::Float(_) => "Float",
            SettingValue::String(_) => "String",
            SettingValue::OneShot => "OneShot",
        }
    }

    /// Wire tag written ahead of the payload
    fn tag(&self) -> &'static str {
        match self {
            SettingValue::Integer(_) => TAG_INTEGER,
            SettingValue::Float(_) => TAG_FLOAT,
            SettingValue::String(_) => TAG_STRING,
            SettingValue::OneShot => TAG_ONE_SHOT,
        }
    }

    /// Check if this is a one-shot marker
    pub fn is_one_shot(&self) -> bool {
        matches!(self, SettingValue::OneShot)
    }

    /// Get as i64 if this is an Integer value
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::String(s) => write!(f, "{:?}", s),
            SettingValue::OneShot => f.write_str("<one-shot>"),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        SettingValue::Integer(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        SettingValue::Integer(i as i64)
    }
}

impl From<f64> for SettingValue {
    fn from(f: f64) -> Self {
        SettingValue::Float(f)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

// ============================================================================
// Tagged encoding
// ============================================================================

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_one_shot() { 1 } else { 2 };
        let mut tuple = serializer.serialize_tuple(len)?;
        tuple.serialize_element(self.tag())?;
        match self {
            SettingValue::Integer(i) => tuple.serialize_element(i)?,
            SettingValue::Float(f) => tuple.serialize_element(f)?,
            SettingValue::String(s) => tuple.serialize_element(s)?,
            SettingValue::OneShot => {}
        }
        tuple.end()
    }
}

struct SettingValueVisitor;

impl<'de> Visitor<'de> for SettingValueVisitor {
    type Value = SettingValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a tagged setting value array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SettingValue, A::Error> {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let value = match tag.as_str() {
            TAG_INTEGER => SettingValue::Integer(
                seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?,
            ),
            TAG_FLOAT => SettingValue::Float(
                seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?,
            ),
            TAG_STRING => SettingValue::String(
                seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?,
            ),
            TAG_ONE_SHOT => SettingValue::OneShot,
            other => {
                return Err(de::Error::unknown_variant(
                    other,
                    &[TAG_INTEGER, TAG_FLOAT, TAG_STRING, TAG_ONE_SHOT],
                ))
            }
        };
        Ok(value)
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SettingValueVisitor)
    }
}
