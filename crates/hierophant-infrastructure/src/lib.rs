//! # Infrastructure Layer
//!
//! The resolution engine and the technical concerns around it.
//!
//! ## Module Categories
//!
//! ### Resolution Engine
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Registry store, `depend`, `resolve`, `install` and stock policies |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML/env configuration via figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers that convert foreign errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use error_ext::ErrorContext;
