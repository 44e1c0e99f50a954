//! Resolution Algorithm
//!
//! One [`Resolution`] lives for the duration of a single top-level
//! `resolve` call. It carries the in-progress key stack through every
//! nested dependency resolution so re-entry can be reported as a
//! [`Error::DependencyCycle`] instead of overflowing the call stack.
//!
//! The stack of the outermost resolution is published per thread. Any
//! resolution started on that thread while it runs, whether through
//! [`Deferred::call`] or a direct `Container::resolve` from inside a
//! provider, joins the same stack and depth count.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use hierophant_domain::{Error, Instance, Key, Result, downcast};
use tracing::{debug, warn};

use super::container::Container;
use super::registry::Provider;

type InProgress = Rc<RefCell<Vec<Key>>>;

thread_local! {
    static ACTIVE: RefCell<Option<InProgress>> = const { RefCell::new(None) };
}

/// Clears the published stack when the outermost resolution ends, unwinding included
struct ActiveGuard;

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        let _ = ACTIVE.try_with(|active| active.borrow_mut().take());
    }
}

/// State of one top-level resolution
pub struct Resolution<'a> {
    container: &'a Container,
    in_progress: InProgress,
    _root: Option<ActiveGuard>,
}

impl<'a> Resolution<'a> {
    /// Join the resolution running on this thread, or start a new one
    pub(crate) fn new(container: &'a Container) -> Self {
        if let Some(in_progress) = ACTIVE.with(|active| active.borrow().clone()) {
            return Self {
                container,
                in_progress,
                _root: None,
            };
        }

        let in_progress: InProgress = Rc::new(RefCell::new(Vec::new()));
        ACTIVE.with(|active| *active.borrow_mut() = Some(Rc::clone(&in_progress)));
        Self {
            container,
            in_progress,
            _root: Some(ActiveGuard),
        }
    }

    /// Container this resolution reads from
    pub fn container(&self) -> &'a Container {
        self.container
    }

    /// Keys currently being resolved, outermost first
    pub fn path(&self) -> Vec<Key> {
        self.in_progress.borrow().clone()
    }

    /// Number of nested resolutions in progress
    pub fn depth(&self) -> usize {
        self.in_progress.borrow().len()
    }

    /// Resolve `key` as part of this resolution
    ///
    /// Aggregates the key's providers, then threads the result through its
    /// decorators in registration order.
    pub fn resolve(&self, key: &Key) -> Result<Instance> {
        self.enter(key)?;
        let resolved = self.resolve_entry(key);
        self.in_progress.borrow_mut().pop();
        resolved
    }

    /// Resolve `key` and downcast the result
    pub fn resolve_as<T: Any + Send + Sync>(&self, key: &Key) -> Result<Arc<T>> {
        let resolved = self.resolve(key)?;
        downcast(key, &resolved)
    }

    fn enter(&self, key: &Key) -> Result<()> {
        let config = self.container.config();
        let mut stack = self.in_progress.borrow_mut();

        if config.detect_cycles && stack.contains(key) {
            let mut path = stack.clone();
            path.push(key.clone());
            warn!(key = %key, depth = stack.len(), "Dependency cycle detected");
            return Err(Error::dependency_cycle(path));
        }
        if stack.len() >= config.max_depth {
            warn!(key = %key, max_depth = config.max_depth, "Resolution depth limit reached");
            return Err(Error::depth_exceeded(key.clone(), config.max_depth));
        }

        stack.push(key.clone());
        Ok(())
    }

    fn resolve_entry(&self, key: &Key) -> Result<Instance> {
        let entry = self.container.registry().snapshot(key);
        let tracing_enabled = self.container.config().trace_resolution;

        if tracing_enabled {
            debug!(
                key = %key,
                providers = entry.providers.len(),
                decorators = entry.decorators.len(),
                depth = self.depth(),
                "Resolving"
            );
        }

        let aggregated = (entry.aggregator)(Providers::new(self, key, &entry.providers))?;
        let resolved = entry
            .decorators
            .iter()
            .try_fold(aggregated, |value, decorate| decorate(self, value))?;

        if tracing_enabled {
            debug!(key = %key, "Resolved");
        }
        Ok(resolved)
    }
}

/// Uninvoked provider thunks handed to an aggregator
///
/// Nothing is invoked until the aggregator asks for it.
pub struct Providers<'a> {
    resolution: &'a Resolution<'a>,
    key: &'a Key,
    providers: &'a [Provider],
}

impl<'a> Providers<'a> {
    pub(crate) fn new(resolution: &'a Resolution<'a>, key: &'a Key, providers: &'a [Provider]) -> Self {
        Self {
            resolution,
            key,
            providers,
        }
    }

    /// Key being aggregated
    pub fn key(&self) -> &'a Key {
        self.key
    }

    /// Resolution the providers run in
    pub fn resolution(&self) -> &'a Resolution<'a> {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Raw thunks in registration order
    pub fn as_slice(&self) -> &'a [Provider] {
        self.providers
    }

    /// Invoke the provider at `index`, if there is one
    pub fn invoke(&self, index: usize) -> Option<Result<Instance>> {
        self.providers
            .get(index)
            .map(|provider| provider(self.resolution))
    }

    /// Lazily invoke providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = Result<Instance>> + '_ {
        self.providers
            .iter()
            .map(move |provider| provider(self.resolution))
    }

    /// Invoke every provider in registration order, stopping at the first failure
    pub fn invoke_all(&self) -> Result<Vec<Instance>> {
        self.iter().collect()
    }

    /// Detach every provider from this resolution so it can be called later
    pub fn defer_all(&self) -> Vec<Deferred> {
        self.providers
            .iter()
            .map(|provider| Deferred::new(self.resolution.container().clone(), Arc::clone(provider)))
            .collect()
    }
}

/// A provider bound to its container, invokable after the resolution that
/// produced it has finished
///
/// A [`call`](Deferred::call) made while a resolution is running on the
/// current thread joins it, so cycles through a fan-out are still detected.
/// Otherwise it starts a fresh resolution.
#[derive(Clone)]
pub struct Deferred {
    container: Container,
    provider: Provider,
}

impl Deferred {
    pub(crate) fn new(container: Container, provider: Provider) -> Self {
        Self {
            container,
            provider,
        }
    }

    /// Invoke the provider
    pub fn call(&self) -> Result<Instance> {
        let resolution = Resolution::new(&self.container);
        (self.provider)(&resolution)
    }
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}
