//! # Hierophant
//!
//! A composable service-resolution registry.
//!
//! Values are looked up by [`Key`]. Each key collects *providers* (lazy
//! constructors), *decorators* (post-processors applied in registration
//! order) and at most one *aggregator* (the policy combining the
//! providers). Resolution is lazy and never memoized.
//!
//! ## Example
//!
//! ```
//! use hierophant::{Container, Key, depend, instance};
//!
//! let name = Key::new("name");
//! let greeting = Key::new("greeting");
//!
//! let container = Container::new();
//! container.provide_value(&name, String::from("world"));
//! container.provide(&greeting, depend(&[&name], |deps| {
//!     Ok(instance(format!("hello {}", deps.get::<String>(0)?)))
//! }));
//!
//! let value = container.resolve_as::<String>(&greeting).unwrap();
//! assert_eq!(value.as_str(), "hello world");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, opaque instances and the error type
//! - `infrastructure` - the resolution engine, configuration and logging
//! - [`demo`] - the logging/conversation wiring run by the `hierophant` binary

pub mod demo;

/// Domain layer - keys, instances and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use hierophant_domain::*;
}

/// Infrastructure layer - resolution engine, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use hierophant_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the engine surface at the crate root
pub use infrastructure::di::{
    Container, Installation, Module, aggregators, cached, depend, depend_aggregator,
    depend_decorator,
};
