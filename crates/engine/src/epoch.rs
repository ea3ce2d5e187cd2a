//! EpochState: everything the logger mutates, owned in one place
//!
//! ## Counter Semantics
//!
//! `counter` holds the last assigned logical time. It starts at 0, so the
//! first assignment yields 1. Between resets every pending event's counter
//! lies in `(counter_at_last_reset, counter]`, which are exactly the epoch
//! bounds written into a snapshot.
//!
//! All methods assume the caller holds the logger's guard.

use crate::busy::BusyTracker;
use crate::event_log::EventLog;
use crate::store::SettingStore;
use seqlog_core::{CameraInfo, Counter, SettingEvent, SettingKey, SettingValue, SnapshotView};

/// Process-lifetime logger state
#[derive(Debug)]
pub(crate) struct EpochState {
    pub(crate) counter: Counter,
    pub(crate) counter_at_last_reset: Counter,
    pub(crate) image_count: u64,
    pub(crate) store: SettingStore,
    pub(crate) log: EventLog,
    pub(crate) busy: BusyTracker,
    /// Reused encode buffer
    pub(crate) scratch: Vec<u8>,
}

impl EpochState {
    pub(crate) fn new(warn_threshold: usize, scratch_capacity: usize) -> Self {
        Self {
            counter: 0,
            counter_at_last_reset: 0,
            image_count: 0,
            store: SettingStore::new(),
            log: EventLog::new(warn_threshold),
            busy: BusyTracker::new(),
            scratch: Vec::with_capacity(scratch_capacity),
        }
    }

    /// Assign the next logical time
    pub(crate) fn next_count(&mut self) -> Counter {
        self.counter += 1;
        self.counter
    }

    /// Store a value and, if `log_event`, append it to the pending log
    ///
    /// The counter advances either way.
    pub(crate) fn record(&mut self, key: SettingKey, value: SettingValue, log_event: bool) -> Counter {
        let counter = self.next_count();
        if log_event {
            self.log
                .append(SettingEvent::new(key.clone(), value.clone(), counter));
        }
        self.store.set(key, value);
        counter
    }

    /// Mark `device` busy and, if `log_event`, log the transition under
    /// `(device, busy_key)` as a one-shot
    pub(crate) fn mark_busy(&mut self, device: &str, busy_key: &str, log_event: bool) -> Counter {
        let counter = self.next_count();
        self.busy.mark(device, counter);
        if log_event {
            self.log.append(SettingEvent::new(
                SettingKey::new(device, busy_key),
                SettingValue::OneShot,
                counter,
            ));
        }
        counter
    }

    /// Borrow the current epoch as an encodable snapshot
    pub(crate) fn view<'a>(&'a self, camera: &'a CameraInfo) -> SnapshotView<'a> {
        SnapshotView {
            camera,
            busy_devices: self.busy.devices().collect(),
            baseline: self.store.baseline(),
            events: self.log.events(),
            epoch_start: self.counter_at_last_reset,
            epoch_end: self.counter,
        }
    }

    /// Close the epoch after a frame was delivered
    pub(crate) fn commit_frame(&mut self) {
        self.image_count += 1;
        self.reset();
    }

    /// Start a new epoch. Busy markers are left alone.
    fn reset(&mut self) {
        self.counter_at_last_reset = self.counter;
        self.store.rebase();
        self.log.clear();
    }
}
