//! Core types for the setting logger
//!
//! This crate defines the foundational types used throughout the system:
//! - SettingValue: typed setting payload (Integer, Float, String, OneShot)
//! - SettingKey: (device, property) identity
//! - SettingEvent / CameraInfo / BusyPoint: recorded records
//! - FrameSnapshot / SnapshotView: the per-frame msgpack document
//! - SeqlogError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod snapshot;
pub mod types;
pub mod value;

pub use error::{SeqlogError, SeqlogResult};
pub use key::SettingKey;
pub use snapshot::{FrameSnapshot, SnapshotView};
pub use types::{BusyPoint, CameraInfo, Counter, SettingEvent};
pub use value::SettingValue;
