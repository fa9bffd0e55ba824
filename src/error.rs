use std::io;
use thiserror::Error;

/// Invariant violations inside a buffer's log.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// A resolved append was attempted before the buffer had a filename.
    #[error("cannot push log entry for buffer {buffer_id}: no filename")]
    InvalidLogTarget { buffer_id: u64 },
}

/// Errors raised while loading a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("device_id must not be empty")]
    EmptyDeviceId,
}
