//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hierophant.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "hierophant";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "HIEROPHANT";

/// Separator between nested keys in configuration environment variables
/// (e.g. `HIEROPHANT_CONTAINER__MAX_DEPTH`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Default limit on nested resolutions within one `resolve` call
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 256;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "HIEROPHANT_LOG";

/// Log file stem used when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "hierophant";
