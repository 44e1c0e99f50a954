//! Installation modules
//!
//! A [`Module`] packages the definitions of one feature so independent
//! crates can contribute to the same container without knowing each other.
//!
//! ```text
//! Container::install_module(&LoggingModule)
//!         │
//!         ▼
//! LoggingModule::installation() ──▶ Container::install(..)
//! ```

use super::install::Installation;

/// A named bundle of definitions
pub trait Module: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Definitions to register
    fn installation(&self) -> Installation;
}
