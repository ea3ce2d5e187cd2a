//! seqlog - device-state event log and per-frame snapshot oracle
//!
//! Simulated devices record every property change through a shared
//! [`SettingLogger`]. Once per simulated camera frame the logger packs
//! "everything that happened since the last frame" into a self-contained
//! msgpack [`FrameSnapshot`], which test code decodes to check that device
//! commands were applied in the expected order relative to acquisition.
//!
//! # Quick Start
//!
//! ```ignore
//! use seqlog::{CameraInfo, FrameSnapshot, SettingLogger};
//!
//! let logger = SettingLogger::new();
//! logger.set_integer("Stage", "Position", 100, true);
//! logger.set_integer("Stage", "Position", 200, true);
//!
//! let bytes = logger.pack_and_reset_to_vec(&CameraInfo::snap("Camera", 0))?;
//! let frame = FrameSnapshot::decode(&bytes)?;
//! assert_eq!(frame.events.len(), 2);
//! ```

pub use seqlog_core::*;
pub use seqlog_engine::*;
