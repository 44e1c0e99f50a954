//! Configuration
//!
//! Layered configuration for the container and its logging:
//! defaults, then a TOML file, then `HIEROPHANT_`-prefixed environment
//! variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ContainerConfig, LoggingConfig};
