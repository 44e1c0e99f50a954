//! Resolution Engine
//!
//! Maps [`Key`](hierophant_domain::Key)s to lazily constructed values.
//!
//! ## Architecture Overview
//!
//! ```text
//! provide / decorate / aggregate          resolve(key)
//!            │                                 │
//!            ▼                                 ▼
//! ┌─────────────────────────┐     ┌─────────────────────────────┐
//! │ Registry                │     │ Resolution (per call)       │
//! │  key → providers[]      │────▶│  1. guard cycles / depth    │
//! │        decorators[]     │     │  2. aggregator(providers)   │
//! │        aggregator       │     │  3. fold decorators in order│
//! └─────────────────────────┘     └─────────────────────────────┘
//!            ▲                                 │
//!            │            depend(keys, f) ◀────┘ recursive resolve
//!       install(batch)
//! ```
//!
//! ## Key Principles
//!
//! - **Explicit containers**: no process-wide registry; each [`Container`]
//!   owns its store and clones share it
//! - **Lazy providers**: aggregators receive uninvoked thunks and decide
//!   what to call
//! - **Singleton by default**: without a custom aggregator a key must have
//!   exactly one provider
//! - **No memoization**: every `resolve` rebuilds from scratch; opt into
//!   caching with [`caching::cached`]

pub mod aggregators;
pub mod caching;
pub mod container;
pub mod depend;
pub mod install;
pub mod modules;
pub mod registry;
pub mod report;
pub mod resolver;

pub use aggregators::FanOut;
pub use caching::cached;
pub use container::Container;
pub use depend::{Dependencies, depend, depend_aggregator, depend_decorator};
pub use install::{
    AggregatorFactory, DecoratorFactory, Definition, Installation, ProviderFactory,
};
pub use modules::Module;
pub use registry::{Aggregator, Decorator, Provider, aggregator, decorator, provider};
pub use report::{KeyReport, RegistryReport};
pub use resolver::{Deferred, Providers, Resolution};
