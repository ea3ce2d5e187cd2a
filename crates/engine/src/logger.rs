//! SettingLogger: the guarded entry point for simulated devices
//!
//! ## Design Principles
//!
//! 1. **One Guard**: every public operation runs inside a single reentrant
//!    critical section. The logical counter is assigned inside it, so counter
//!    order is a total order across all devices and threads.
//!
//! 2. **Reentrant**: a thread holding [`SettingLogger::guard`] may keep
//!    calling any logger operation. Other threads block until it is dropped.
//!
//! 3. **Transactional Snapshot**: `pack_and_reset` encodes first and commits
//!    the epoch transition only if the frame was delivered. A failed attempt
//!    leaves counters, baseline and pending events untouched.
//!
//! # Example
//!
//! ```ignore
//! use seqlog_engine::SettingLogger;
//! use seqlog_core::{CameraInfo, FrameSnapshot};
//!
//! let logger = SettingLogger::new();
//! logger.set_integer("Stage", "Position", 100, true);
//! logger.mark_busy("Stage", true);
//!
//! let mut frame = vec![0u8; 4096];
//! let len = logger.pack_and_reset(&mut frame, &CameraInfo::snap("Camera", 0))?;
//! let snapshot = FrameSnapshot::decode(&frame[..len])?;
//! ```

use crate::config::LoggerConfig;
use crate::epoch::EpochState;
use crate::store::SettingMap;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use seqlog_core::{
    CameraInfo, Counter, SeqlogError, SeqlogResult, SettingEvent, SettingKey, SettingValue,
};
use std::cell::RefCell;
use tracing::{debug, trace, warn};

/// Scoped hold on the logger's critical section
///
/// While alive, other threads cannot record or pack; the owning thread can.
#[must_use = "the section is released as soon as the guard is dropped"]
pub struct LoggerGuard<'a> {
    _guard: ReentrantMutexGuard<'a, RefCell<EpochState>>,
}

/// Thread-safe device setting logger
///
/// Share across device threads with `Arc<SettingLogger>`.
#[derive(Debug)]
pub struct SettingLogger {
    state: ReentrantMutex<RefCell<EpochState>>,
    config: LoggerConfig,
}

impl Default for SettingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingLogger {
    /// Create a logger with default configuration
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    /// Create a logger with the given configuration
    pub fn with_config(config: LoggerConfig) -> Self {
        let state = EpochState::new(
            config.pending_event_warn_threshold,
            config.initial_snapshot_capacity,
        );
        Self {
            state: ReentrantMutex::new(RefCell::new(state)),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Hold the critical section across several operations
    ///
    /// Operations issued by this thread while the guard lives are atomic
    /// with respect to every other thread.
    pub fn guard(&self) -> LoggerGuard<'_> {
        LoggerGuard {
            _guard: self.state.lock(),
        }
    }

    /// Run `f` on the state inside the critical section
    ///
    /// The `RefCell` borrow never outlives `f`, so nested logger calls made
    /// while a [`LoggerGuard`] is held do not conflict.
    fn with_state<R>(&self, f: impl FnOnce(&mut EpochState) -> R) -> R {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }

    // ========== Setting Store ==========

    /// Record a value for `(device, key)`
    ///
    /// Assigns the next counter, overwrites the current value and, if
    /// `log_event`, appends a pending event. Returns the assigned counter.
    pub fn set(&self, device: &str, key: &str, value: SettingValue, log_event: bool) -> Counter {
        let key = SettingKey::new(device, key);
        self.with_state(|state| {
            if !self.config.trace_events {
                return state.record(key, value, log_event);
            }
            let counter = state.record(key.clone(), value.clone(), log_event);
            trace!(
                target: "seqlog::setting",
                key = %key,
                value = %value,
                counter,
                logged = log_event,
                "Setting recorded"
            );
            counter
        })
    }

    /// Record an integer value
    pub fn set_integer(&self, device: &str, key: &str, value: i64, log_event: bool) -> Counter {
        self.set(device, key, SettingValue::Integer(value), log_event)
    }

    /// Record a float value
    pub fn set_float(&self, device: &str, key: &str, value: f64, log_event: bool) -> Counter {
        self.set(device, key, SettingValue::Float(value), log_event)
    }

    /// Record a string value
    pub fn set_string(&self, device: &str, key: &str, value: &str, log_event: bool) -> Counter {
        self.set(device, key, SettingValue::String(value.to_string()), log_event)
    }

    /// Record that an instantaneous trigger fired
    pub fn fire_one_shot(&self, device: &str, key: &str, log_event: bool) -> Counter {
        self.set(device, key, SettingValue::OneShot, log_event)
    }

    /// Current value for `(device, key)`
    pub fn get(&self, device: &str, key: &str) -> Option<SettingValue> {
        let key = SettingKey::new(device, key);
        self.with_state(|state| state.store.get(&key).cloned())
    }

    /// Current integer value, or 0 if absent or not an integer
    pub fn get_integer(&self, device: &str, key: &str) -> i64 {
        self.get(device, key)
            .and_then(|v| v.as_integer())
            .unwrap_or_default()
    }

    /// Current float value, or 0.0 if absent or not a float
    pub fn get_float(&self, device: &str, key: &str) -> f64 {
        self.get(device, key)
            .and_then(|v| v.as_float())
            .unwrap_or_default()
    }

    /// Current string value, or "" if absent or not a string
    pub fn get_string(&self, device: &str, key: &str) -> String {
        match self.get(device, key) {
            Some(SettingValue::String(s)) => s,
            _ => String::new(),
        }
    }

    /// Current integer value
    ///
    /// # Errors
    ///
    /// `SettingNotFound` if never set, `TypeMismatch` if another variant is stored.
    pub fn try_get_integer(&self, device: &str, key: &str) -> SeqlogResult<i64> {
        self.try_get_typed(device, key, "Integer", |v| v.as_integer())
    }

    /// Current float value
    ///
    /// # Errors
    ///
    /// `SettingNotFound` if never set, `TypeMismatch` if another variant is stored.
    pub fn try_get_float(&self, device: &str, key: &str) -> SeqlogResult<f64> {
        self.try_get_typed(device, key, "Float", |v| v.as_float())
    }

    /// Current string value
    ///
    /// # Errors
    ///
    /// `SettingNotFound` if never set, `TypeMismatch` if another variant is stored.
    pub fn try_get_string(&self, device: &str, key: &str) -> SeqlogResult<String> {
        self.try_get_typed(device, key, "String", |v| v.as_str().map(str::to_string))
    }

    fn try_get_typed<T>(
        &self,
        device: &str,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&SettingValue) -> Option<T>,
    ) -> SeqlogResult<T> {
        let key = SettingKey::new(device, key);
        let value = self
            .with_state(|state| state.store.get(&key).cloned())
            .ok_or_else(|| SeqlogError::SettingNotFound(key.clone()))?;
        extract(&value).ok_or_else(|| SeqlogError::TypeMismatch {
            key,
            expected,
            actual: value.type_name(),
        })
    }

    // ========== Busy Tracker ==========

    /// Mark `device` busy at the next logical time
    ///
    /// If `log_event`, the transition also appears in the pending log as a
    /// one-shot under `(device, busy_key)`. Returns the assigned counter.
    pub fn mark_busy(&self, device: &str, log_event: bool) -> Counter {
        self.with_state(|state| {
            let counter = state.mark_busy(device, &self.config.busy_key, log_event);
            trace!(target: "seqlog::busy", device, counter, "Device marked busy");
            counter
        })
    }

    /// Whether `device` has a busy marker
    ///
    /// A destructive query (`non_destructive == false`) consumes the marker
    /// when it reports busy, so each `mark_busy` is observed busy exactly
    /// once. A non-destructive query never changes state.
    pub fn is_busy(&self, device: &str, non_destructive: bool) -> bool {
        self.with_state(|state| {
            if non_destructive {
                state.busy.peek(device).is_some()
            } else {
                state.busy.take(device).is_some()
            }
        })
    }

    /// Devices with a live busy marker, without consuming any
    pub fn busy_devices(&self) -> Vec<String> {
        self.with_state(|state| state.busy.devices().map(str::to_string).collect())
    }

    // ========== Snapshot Orchestrator ==========

    /// Encode the current epoch into `dest` and start the next epoch
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// `BufferTooSmall` if the snapshot does not fit. Nothing is written and
    /// no state changes, so a retry with a larger buffer sees the same events
    /// plus anything recorded in between.
    pub fn pack_and_reset(&self, dest: &mut [u8], camera: &CameraInfo) -> SeqlogResult<usize> {
        self.pack_with(camera, |bytes| {
            if bytes.len() > dest.len() {
                warn!(
                    target: "seqlog::snapshot",
                    camera = %camera.camera,
                    required = bytes.len(),
                    capacity = dest.len(),
                    "Snapshot does not fit destination buffer; epoch kept"
                );
                return Err(SeqlogError::BufferTooSmall {
                    required: bytes.len(),
                    capacity: dest.len(),
                });
            }
            dest[..bytes.len()].copy_from_slice(bytes);
            Ok(bytes.len())
        })
    }

    /// Encode the current epoch into a new buffer and start the next epoch
    pub fn pack_and_reset_to_vec(&self, camera: &CameraInfo) -> SeqlogResult<Vec<u8>> {
        self.pack_with(camera, |bytes| Ok(bytes.to_vec()))
    }

    /// Encode, hand the bytes to `deliver`, and commit only if it succeeds
    fn pack_with<R>(
        &self,
        camera: &CameraInfo,
        deliver: impl FnOnce(&[u8]) -> SeqlogResult<R>,
    ) -> SeqlogResult<R> {
        self.with_state(|state| {
            let mut buf = std::mem::take(&mut state.scratch);
            buf.clear();

            let result = state
                .view(camera)
                .encode_into(&mut buf)
                .and_then(|()| deliver(&buf));

            if result.is_ok() {
                debug!(
                    target: "seqlog::snapshot",
                    camera = %camera.camera,
                    sequence = camera.is_sequence,
                    events = state.log.len(),
                    bytes = buf.len(),
                    epoch_start = state.counter_at_last_reset,
                    epoch_end = state.counter,
                    image = state.image_count,
                    "Frame snapshot packed"
                );
                state.commit_frame();
            }

            state.scratch = buf;
            result
        })
    }

    // ========== Inspection ==========

    /// Last assigned logical time
    pub fn counter(&self) -> Counter {
        self.with_state(|state| state.counter)
    }

    /// Counter at the last successful reset
    pub fn epoch_start(&self) -> Counter {
        self.with_state(|state| state.counter_at_last_reset)
    }

    /// Number of successfully packed frames
    pub fn image_count(&self) -> u64 {
        self.with_state(|state| state.image_count)
    }

    /// Copy of the pending events
    pub fn pending_events(&self) -> Vec<SettingEvent> {
        self.with_state(|state| state.log.events().to_vec())
    }

    /// Copy of the current values
    pub fn current_values(&self) -> SettingMap {
        self.with_state(|state| state.store.current().clone())
    }

    /// Copy of the baseline values
    pub fn baseline_values(&self) -> SettingMap {
        self.with_state(|state| state.store.baseline().clone())
    }
}
