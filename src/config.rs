use crate::buffer::DEFAULT_DEBUG_TAIL;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Startup configuration of a logger instance.
///
/// Loaded from JSON:
///
/// ```text
/// { "device_id": "laptop-7f3a", "debug_tail": 10 }
/// ```
///
/// `debug_tail` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Opaque identity of this installation, copied into every entry.
    pub device_id: String,

    /// How many recent event types the debug trace lists after each append.
    /// Zero disables the trace.
    #[serde(default = "default_debug_tail")]
    pub debug_tail: usize,
}

fn default_debug_tail() -> usize {
    DEFAULT_DEBUG_TAIL
}

impl Config {
    pub fn new(device_id: impl Into<String>) -> Self {
        Config {
            device_id: device_id.into(),
            debug_tail: DEFAULT_DEBUG_TAIL,
        }
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::EmptyDeviceId`] when `device_id` is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use editlog::Config;
    ///
    /// let config = Config::from_json_str(r#"{"device_id": "laptop"}"#).unwrap();
    /// assert_eq!(config.device_id, "laptop");
    /// assert_eq!(config.debug_tail, 10);
    ///
    /// assert!(Config::from_json_str(r#"{"device_id": "  "}"#).is_err());
    /// ```
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Config::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.trim().is_empty() {
            return Err(ConfigError::EmptyDeviceId);
        }
        Ok(())
    }
}
