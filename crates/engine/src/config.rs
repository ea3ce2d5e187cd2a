//! Logger configuration via TOML
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! the stock behaviour. Loading validates eagerly.

use serde::{Deserialize, Serialize};
use seqlog_core::{SeqlogError, SeqlogResult};
use std::path::Path;

/// Key under which busy transitions are logged, as `(device, "Busy")`.
pub const DEFAULT_BUSY_KEY: &str = "Busy";

/// Logger configuration
///
/// # Example
///
/// ```toml
/// busy_key = "Busy"
/// trace_events = false
/// pending_event_warn_threshold = 100000
/// initial_snapshot_capacity = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Property name used for logged busy transitions.
    ///
    /// Busy events are logged as one-shots under `(device, busy_key)`, the
    /// same key space as ordinary properties. A device that also has a real
    /// property with this name will see both interleaved in
    /// `FrameSnapshot::events_for_device`, and a replayed busy one-shot
    /// drops that property from `FrameSnapshot::final_values`. Pick a name
    /// no device uses as a property.
    #[serde(default = "default_busy_key")]
    pub busy_key: String,
    /// Emit a `trace!` record for every setting change.
    #[serde(default)]
    pub trace_events: bool,
    /// Warn once per epoch when this many events are pending (0 disables).
    #[serde(default = "default_pending_event_warn_threshold")]
    pub pending_event_warn_threshold: usize,
    /// Initial capacity of the reusable snapshot encode buffer, in bytes.
    #[serde(default = "default_initial_snapshot_capacity")]
    pub initial_snapshot_capacity: usize,
}

fn default_busy_key() -> String {
    DEFAULT_BUSY_KEY.to_string()
}

fn default_pending_event_warn_threshold() -> usize {
    100_000
}

fn default_initial_snapshot_capacity() -> usize {
    4096
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            busy_key: default_busy_key(),
            trace_events: false,
            pending_event_warn_threshold: default_pending_event_warn_threshold(),
            initial_snapshot_capacity: default_initial_snapshot_capacity(),
        }
    }
}

impl LoggerConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Setting logger configuration
#
# Property name recorded for busy transitions: events appear as (device, busy_key)
busy_key = "Busy"

# Emit a trace-level log record for every recorded setting change
trace_events = false

# Warn once per frame epoch when this many events are pending (0 disables)
pending_event_warn_threshold = 100000

# Initial size of the reusable snapshot encode buffer, in bytes
initial_snapshot_capacity = 4096
"#
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the busy key is empty.
    pub fn validate(&self) -> SeqlogResult<()> {
        if self.busy_key.is_empty() {
            return Err(SeqlogError::Config("busy_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> SeqlogResult<Self> {
        let config: LoggerConfig = toml::from_str(content)
            .map_err(|e| SeqlogError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it cannot be
    /// parsed or holds invalid values.
    pub fn from_file(path: &Path) -> SeqlogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            SeqlogError::Config(msg) => {
                SeqlogError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> SeqlogResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SeqlogError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
