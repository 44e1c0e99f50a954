//! Container
//!
//! The public face of the engine. A [`Container`] is an explicit object:
//! create one per composition root, clone it freely (clones share one
//! registry) and drop it with the root.
//!
//! ## Usage
//!
//! ```
//! use hierophant_domain::{Key, instance};
//! use hierophant_infrastructure::di::Container;
//!
//! let container = Container::new();
//! let greeting = Key::new("greeting");
//! let shout = Key::new("shout");
//!
//! container.provide_value(&greeting, String::from("hello"));
//! container.provide(
//!     &shout,
//!     container.depend(&[&greeting], |deps| {
//!         let greeting = deps.get::<String>(0)?;
//!         Ok(instance(greeting.to_uppercase()))
//!     }),
//! );
//!
//! let shouted = container.resolve_as::<String>(&shout).unwrap();
//! assert_eq!(shouted.as_str(), "HELLO");
//! ```

use std::any::Any;
use std::sync::Arc;

use hierophant_domain::{Instance, Key, Result, downcast, instance};
use tracing::{debug, info};

use super::depend::{self, Dependencies};
use super::install::{self, Installation};
use super::modules::Module;
use super::registry::{self, Aggregator, Decorator, Provider, Registry};
use super::report::{KeyReport, RegistryReport};
use super::resolver::Resolution;
use crate::config::ContainerConfig;

struct ContainerInner {
    registry: Registry,
    config: ContainerConfig,
}

/// Service-resolution registry
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("keys", &self.inner.registry.keys().len())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Container {
    /// Create an empty container with default settings
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Create an empty container with explicit settings
    pub fn with_config(config: ContainerConfig) -> Self {
        debug!(
            detect_cycles = config.detect_cycles,
            max_depth = config.max_depth,
            "Created container"
        );
        Self {
            inner: Arc::new(ContainerInner {
                registry: Registry::default(),
                config,
            }),
        }
    }

    /// Engine settings
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Ensure `key` has an entry with empty lists and the default aggregator
    ///
    /// Has no effect on a key that is already known.
    pub fn learn(&self, key: &Key) {
        self.registry().learn(key);
    }

    /// Append a provider to `key`
    pub fn provide(&self, key: &Key, provider: Provider) {
        self.registry().provide(key, provider);
    }

    /// Append a provider built from a closure with no dependencies
    pub fn provide_fn<F>(&self, key: &Key, f: F)
    where
        F: Fn() -> Result<Instance> + Send + Sync + 'static,
    {
        self.provide(key, registry::provider(move |_| f()));
    }

    /// Append a provider that always yields `value`
    pub fn provide_value<T: Any + Send + Sync>(&self, key: &Key, value: T) {
        let value = instance(value);
        self.provide(key, registry::provider(move |_| Ok(Arc::clone(&value))));
    }

    /// Append a decorator to `key`
    pub fn decorate(&self, key: &Key, decorator: Decorator) {
        self.registry().decorate(key, decorator);
    }

    /// Append a decorator built from a closure with no dependencies
    pub fn decorate_fn<F>(&self, key: &Key, f: F)
    where
        F: Fn(Instance) -> Result<Instance> + Send + Sync + 'static,
    {
        self.decorate(key, registry::decorator(move |_, value| f(value)));
    }

    /// Replace the aggregator of `key`
    pub fn aggregate(&self, key: &Key, aggregator: Aggregator) {
        self.registry().aggregate(key, aggregator);
    }

    /// Build a provider that resolves `keys` and hands them to `factory`
    ///
    /// Shorthand for [`depend::depend`].
    pub fn depend<F>(&self, keys: &[&Key], factory: F) -> Provider
    where
        F: Fn(Dependencies) -> Result<Instance> + Send + Sync + 'static,
    {
        depend::depend(keys, factory)
    }

    /// Register every definition of `installation`
    pub fn install(&self, installation: Installation) {
        install::install(self, installation);
    }

    /// Register the definitions shipped by `module`
    pub fn install_module(&self, module: &dyn Module) {
        info!(module = module.name(), "Installing module");
        self.install(module.installation());
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the current value of `key`
    ///
    /// Rebuilds the value from scratch on every call.
    pub fn resolve(&self, key: &Key) -> Result<Instance> {
        Resolution::new(self).resolve(key)
    }

    /// Resolve `key` and downcast the result
    pub fn resolve_as<T: Any + Send + Sync>(&self, key: &Key) -> Result<Arc<T>> {
        let resolved = self.resolve(key)?;
        downcast(key, &resolved)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Every key this container has learned, in creation order
    pub fn keys(&self) -> Vec<Key> {
        self.registry().keys()
    }

    /// Registration counts for `key`, or `None` if it was never referenced
    pub fn describe(&self, key: &Key) -> Option<KeyReport> {
        self.registry().describe(key)
    }

    /// Registration counts for every learned key
    pub fn report(&self) -> RegistryReport {
        RegistryReport {
            keys: self.registry().reports(),
        }
    }
}
