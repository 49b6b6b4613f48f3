//! Error types for telemetry decoding and listening.
//!
//! Two layers of errors are used:
//!
//! - [`DecodeError`]: raised by the packet decoder. Every decode is atomic, so a
//!   `DecodeError` always means the whole datagram was rejected.
//! - [`TelemetryError`]: crate-level error for everything around the decoder
//!   (sockets, configuration, capture output, listener lifecycle).
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use pitlane::TelemetryError;
//!
//! let error = TelemetryError::listener_failed("socket closed");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Failure to turn a datagram into a typed packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("truncated datagram at offset {offset}: need {needed} bytes, {remaining} remaining")]
    Truncated { offset: usize, needed: usize, remaining: usize },

    #[error("unknown packet id {id}")]
    UnknownPacketId { id: u8 },

    #[error("unknown event code {:?}", String::from_utf8_lossy(.code))]
    UnknownEventCode { code: [u8; 4] },

    #[error("invalid UTF-8 text: {source}")]
    InvalidText {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("value {value} out of range for {field}")]
    OutOfRange { field: &'static str, value: i64 },
}

impl DecodeError {
    /// Helper constructor for out-of-range raw values.
    pub fn out_of_range(field: &'static str, value: impl Into<i64>) -> Self {
        DecodeError::OutOfRange { field, value: value.into() }
    }
}

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Capture output error: {path}")]
    Capture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Listener error: {reason}")]
    Listener {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TelemetryError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Io { .. } => true,
            TelemetryError::Listener { .. } => true,
            TelemetryError::Decode(_) => false,
            TelemetryError::Config { .. } => false,
            TelemetryError::Capture { .. } => false,
            TelemetryError::Serialization { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TelemetryError::Decode(_) => vec![
                "Check the game's UDP format is set to 2022",
                "Verify nothing else is sending to the telemetry port",
            ],
            TelemetryError::Io { .. } => vec![
                "Check the port is not already bound by another process",
                "Verify the bind address exists on this machine",
                "Retry after a short delay",
            ],
            TelemetryError::Config { .. } => vec![
                "Check the configuration file syntax",
                "Compare against the documented defaults",
            ],
            TelemetryError::Capture { .. } => vec![
                "Check the output directory exists and is writable",
                "Ensure sufficient disk space",
            ],
            TelemetryError::Serialization { .. } => vec![
                "Report the packet that failed to serialize",
            ],
            TelemetryError::Listener { .. } => vec![
                "Restart the listener",
                "Check the game is still sending telemetry",
            ],
        }
    }

    /// Helper constructor for I/O errors with context.
    pub fn io_error(context: impl Into<String>, source: std::io::Error) -> Self {
        TelemetryError::Io { context: context.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(reason: impl Into<String>) -> Self {
        TelemetryError::Config { reason: reason.into() }
    }

    /// Helper constructor for capture output errors.
    pub fn capture_error(path: PathBuf, source: std::io::Error) -> Self {
        TelemetryError::Capture { path, source }
    }

    /// Helper constructor for listener failures.
    pub fn listener_failed(reason: impl Into<String>) -> Self {
        TelemetryError::Listener { reason: reason.into(), source: None }
    }

    /// Helper constructor for listener failures with source.
    pub fn listener_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TelemetryError::Listener { reason: reason.into(), source: Some(source) }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::Io { context: "<unknown>".to_string(), source: err }
    }
}

impl From<serde_yaml_ng::Error> for TelemetryError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TelemetryError::Config { reason: err.to_string() }
    }
}
