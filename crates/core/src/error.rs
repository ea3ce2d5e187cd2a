//! Error types for the setting logger
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absent keys are not errors for the typed getters, which return the type's
//! zero value. The `try_get_*` family reports them explicitly.

use crate::key::SettingKey;
use std::io;
use thiserror::Error;

/// Result type alias for logger operations
pub type SeqlogResult<T> = std::result::Result<T, SeqlogError>;

/// Error types for the setting logger
#[derive(Debug, Error)]
pub enum SeqlogError {
    /// Snapshot does not fit the caller's buffer; no state was changed
    #[error("Snapshot buffer too small: need {required} bytes, have {capacity}")]
    BufferTooSmall {
        /// Encoded snapshot size
        required: usize,
        /// Size of the destination buffer
        capacity: usize,
    },

    /// Key was never set
    #[error("Setting not found: {0}")]
    SettingNotFound(SettingKey),

    /// Key holds a different variant than requested
    #[error("Type mismatch for {key}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Setting that was queried
        key: SettingKey,
        /// Requested variant
        expected: &'static str,
        /// Stored variant
        actual: &'static str,
    },

    /// Snapshot encoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot bytes could not be decoded
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Invalid configuration value or file
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SeqlogError {
    /// Whether retrying with a larger buffer can succeed
    pub fn is_capacity(&self) -> bool {
        matches!(self, SeqlogError::BufferTooSmall { .. })
    }
}

impl From<rmp_serde::encode::Error> for SeqlogError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        SeqlogError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for SeqlogError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        SeqlogError::Deserialization(e.to_string())
    }
}
