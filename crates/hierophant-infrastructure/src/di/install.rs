//! Bulk Loader
//!
//! An [`Installation`] is a bag of definitions registered in one call. It
//! adds no semantics: each definition goes through `depend` and then the
//! matching `provide`, `decorate` or `aggregate` primitive.
//!
//! ## Usage
//!
//! ```
//! use hierophant_domain::{Key, instance};
//! use hierophant_infrastructure::di::{Container, Installation};
//!
//! let name = Key::new("name");
//! let greeting = Key::new("greeting");
//!
//! let installation = Installation::new()
//!     .provider(&name, &[], |_| Ok(instance(String::from("world"))))
//!     .provider(&greeting, &[&name], |deps| {
//!         Ok(instance(format!("hello {}", deps.get::<String>(0)?)))
//!     });
//!
//! let container = Container::new();
//! container.install(installation);
//!
//! assert_eq!(container.resolve_as::<String>(&greeting).unwrap().as_str(), "hello world");
//! ```

use std::sync::Arc;

use hierophant_domain::{Instance, Key, Result};
use tracing::debug;

use super::container::Container;
use super::depend::{self, Dependencies};
use super::resolver::Providers;

/// Factory of a provider definition
pub type ProviderFactory = Arc<dyn Fn(Dependencies) -> Result<Instance> + Send + Sync>;

/// Factory of a decorator definition
pub type DecoratorFactory = Arc<dyn Fn(Dependencies, Instance) -> Result<Instance> + Send + Sync>;

/// Factory of an aggregator definition
pub type AggregatorFactory =
    Arc<dyn Fn(Dependencies, Providers<'_>) -> Result<Instance> + Send + Sync>;

/// One definition: a key, the keys it depends on, and its factory
#[derive(Clone)]
pub struct Definition<F> {
    /// Key the definition contributes to
    pub key: Key,
    /// Keys resolved and passed positionally to the factory
    pub dependencies: Vec<Key>,
    /// Factory producing the contribution
    pub factory: F,
}

impl<F> Definition<F> {
    pub fn new(key: &Key, dependencies: &[&Key], factory: F) -> Self {
        Self {
            key: key.clone(),
            dependencies: dependencies.iter().map(|&key| key.clone()).collect(),
            factory,
        }
    }
}

impl<F> std::fmt::Debug for Definition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definition")
            .field("key", &self.key)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Definitions grouped by channel, each list in registration order
#[derive(Clone, Default, Debug)]
pub struct Installation {
    pub providers: Vec<Definition<ProviderFactory>>,
    pub decorators: Vec<Definition<DecoratorFactory>>,
    pub aggregators: Vec<Definition<AggregatorFactory>>,
}

impl Installation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider definition
    #[must_use]
    pub fn provider<F>(mut self, key: &Key, dependencies: &[&Key], factory: F) -> Self
    where
        F: Fn(Dependencies) -> Result<Instance> + Send + Sync + 'static,
    {
        let factory: ProviderFactory = Arc::new(factory);
        self.providers.push(Definition::new(key, dependencies, factory));
        self
    }

    /// Add a decorator definition
    #[must_use]
    pub fn decorator<F>(mut self, key: &Key, dependencies: &[&Key], factory: F) -> Self
    where
        F: Fn(Dependencies, Instance) -> Result<Instance> + Send + Sync + 'static,
    {
        let factory: DecoratorFactory = Arc::new(factory);
        self.decorators.push(Definition::new(key, dependencies, factory));
        self
    }

    /// Add an aggregator definition
    #[must_use]
    pub fn aggregator<F>(mut self, key: &Key, dependencies: &[&Key], factory: F) -> Self
    where
        F: Fn(Dependencies, Providers<'_>) -> Result<Instance> + Send + Sync + 'static,
    {
        let factory: AggregatorFactory = Arc::new(factory);
        self.aggregators.push(Definition::new(key, dependencies, factory));
        self
    }

    /// Append every definition of `other` after this installation's own
    #[must_use]
    pub fn merge(mut self, other: Installation) -> Self {
        self.providers.extend(other.providers);
        self.decorators.extend(other.decorators);
        self.aggregators.extend(other.aggregators);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.decorators.is_empty() && self.aggregators.is_empty()
    }
}

/// Register providers, then decorators, then aggregators, each in list order
pub(crate) fn install(container: &Container, installation: Installation) {
    let Installation {
        providers,
        decorators,
        aggregators,
    } = installation;

    debug!(
        providers = providers.len(),
        decorators = decorators.len(),
        aggregators = aggregators.len(),
        "Installing definitions"
    );

    for Definition {
        key,
        dependencies,
        factory,
    } in providers
    {
        container.provide(&key, depend::depend_keys(dependencies, move |deps| factory(deps)));
    }

    for Definition {
        key,
        dependencies,
        factory,
    } in decorators
    {
        container.decorate(
            &key,
            depend::depend_decorator_keys(dependencies, move |deps, value| factory(deps, value)),
        );
    }

    for Definition {
        key,
        dependencies,
        factory,
    } in aggregators
    {
        container.aggregate(
            &key,
            depend::depend_aggregator_keys(dependencies, move |deps, providers| {
                factory(deps, providers)
            }),
        );
    }
}
