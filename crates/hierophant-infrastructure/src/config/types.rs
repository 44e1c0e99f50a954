//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_RESOLUTION_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Resolution engine settings
    pub container: ContainerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Resolution engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Fail with a dependency cycle error when a key is re-entered
    /// during its own resolution
    pub detect_cycles: bool,

    /// Maximum number of nested resolutions within one `resolve` call
    pub max_depth: usize,

    /// Emit debug events for every resolution
    pub trace_resolution: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            trace_resolution: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
