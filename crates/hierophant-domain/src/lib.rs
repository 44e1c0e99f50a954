//! # Hierophant Domain
//!
//! Core types shared by every layer of the container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`key`] | Opaque capability identities |
//! | [`instance`] | Type-erased values flowing through resolution |
//! | [`error`] | Error taxonomy and `Result` alias |
//!
//! Nothing in this crate knows how values are produced; that lives in
//! `hierophant-infrastructure`.

pub mod error;
pub mod instance;
pub mod key;

pub use error::{Error, Result};
pub use instance::{Instance, downcast, instance};
pub use key::Key;
