//! Setting logger engine
//!
//! This crate owns the mutable state and the guard around it:
//! - SettingStore: current and baseline values
//! - EventLog: pending events of the current epoch
//! - BusyTracker: per-device busy markers
//! - SettingLogger: the guarded facade and snapshot orchestrator
//! - LoggerConfig: TOML configuration
//!
//! Only `SettingLogger` is shared between threads; the components are plain
//! single-owner structs that it drives while holding its guard.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod busy;
pub mod config;
mod epoch;
pub mod event_log;
pub mod logger;
pub mod store;

#[cfg(test)]
mod test_support;

pub use busy::BusyTracker;
pub use config::{LoggerConfig, DEFAULT_BUSY_KEY};
pub use event_log::EventLog;
pub use logger::{LoggerGuard, SettingLogger};
pub use store::{SettingMap, SettingStore};
