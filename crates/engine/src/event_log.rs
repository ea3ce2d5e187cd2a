//! EventLog: append-only, counter-ordered record of the current epoch
//!
//! Events are appended in the order their counters were assigned, and the
//! counters are assigned under the logger's guard, so the log is sorted by
//! construction. Only a successful snapshot clears it.

use seqlog_core::SettingEvent;
use tracing::warn;

/// Pending events since the last reset
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SettingEvent>,
    warn_threshold: usize,
}

impl EventLog {
    /// Create an empty log that warns once when `warn_threshold` events are
    /// pending (0 disables the warning)
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            events: Vec::new(),
            warn_threshold,
        }
    }

    /// Append an event
    pub fn append(&mut self, event: SettingEvent) {
        debug_assert!(
            self.events
                .last()
                .map_or(true, |last| last.counter < event.counter),
            "events must be appended in counter order"
        );
        self.events.push(event);
        if self.warn_threshold != 0 && self.events.len() == self.warn_threshold {
            warn!(
                target: "seqlog::setting",
                pending = self.events.len(),
                "Pending setting events reached threshold; no frame has been packed"
            );
        }
    }

    /// Pending events in counter order
    pub fn events(&self) -> &[SettingEvent] {
        &self.events
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
