//! SettingStore: current value per (device, key) plus the epoch baseline
//!
//! The baseline is the current-value map as it stood at the last successful
//! reset. Rebasing copies the current map; it never discards it.

use seqlog_core::{SettingKey, SettingValue};
use std::collections::BTreeMap;

/// Ordered map used for both current and baseline values
pub type SettingMap = BTreeMap<SettingKey, SettingValue>;

/// Current and baseline setting values
#[derive(Debug, Default)]
pub struct SettingStore {
    current: SettingMap,
    baseline: SettingMap,
}

impl SettingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current value for `key`
    pub fn set(&mut self, key: SettingKey, value: SettingValue) {
        self.current.insert(key, value);
    }

    /// Current value for `key`
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.current.get(key)
    }

    /// All current values
    pub fn current(&self) -> &SettingMap {
        &self.current
    }

    /// Values at the start of the epoch
    pub fn baseline(&self) -> &SettingMap {
        &self.baseline
    }

    /// Make the current values the new baseline
    pub fn rebase(&mut self) {
        self.baseline.clone_from(&self.current);
    }
}
