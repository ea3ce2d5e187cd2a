//! BusyTracker: per-device "became busy" markers
//!
//! ```text
//! Idle --mark--> Busy(c) --take--> Idle
//! Busy(c) --peek--> Busy(c)
//! ```
//!
//! Markers outlive epochs: a snapshot reset does not clear them.

use seqlog_core::{BusyPoint, Counter};
use std::collections::BTreeMap;

/// Live busy markers, keyed by device name
#[derive(Debug, Default)]
pub struct BusyTracker {
    points: BTreeMap<String, BusyPoint>,
}

impl BusyTracker {
    /// Create a tracker with no busy devices
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `device` became busy at `counter`
    ///
    /// Re-marking a busy device moves its marker to the newer counter.
    pub fn mark(&mut self, device: &str, counter: Counter) {
        self.points
            .insert(device.to_string(), BusyPoint { counter });
    }

    /// Consume the marker for `device`, if any
    pub fn take(&mut self, device: &str) -> Option<BusyPoint> {
        self.points.remove(device)
    }

    /// Inspect the marker for `device` without consuming it
    pub fn peek(&self, device: &str) -> Option<BusyPoint> {
        self.points.get(device).copied()
    }

    /// Busy device names in lexicographic order
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }
}
