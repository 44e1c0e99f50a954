//! Dependency Resolver
//!
//! Turns a list of keys plus a plain factory into a thunk. Invoking the
//! thunk resolves each key in listed order, synchronously and through the
//! same resolution, then calls the factory with the values positionally.

use std::any::Any;
use std::sync::Arc;

use hierophant_domain::{Error, Instance, Key, Result, downcast};

use super::registry::{self, Aggregator, Decorator, Provider};
use super::resolver::{Providers, Resolution};

/// Resolved dependency values, in the order their keys were declared
#[derive(Clone)]
pub struct Dependencies {
    keys: Vec<Key>,
    instances: Vec<Instance>,
}

impl Dependencies {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Declared keys
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Raw value at `index`
    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    /// Value at `index`, downcast to `T`
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let (Some(key), Some(value)) = (self.keys.get(index), self.instances.get(index)) else {
            return Err(Error::factory(format!(
                "Dependency index {index} out of range ({} declared)",
                self.len()
            )));
        };
        downcast(key, value)
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

fn resolve_all(resolution: &Resolution<'_>, keys: &[Key]) -> Result<Dependencies> {
    let instances = keys
        .iter()
        .map(|key| resolution.resolve(key))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dependencies {
        keys: keys.to_vec(),
        instances,
    })
}

/// Build a provider that resolves `keys` then calls `factory`
///
/// The factory's result is returned unchanged, errors included.
pub fn depend<F>(keys: &[&Key], factory: F) -> Provider
where
    F: Fn(Dependencies) -> Result<Instance> + Send + Sync + 'static,
{
    depend_keys(owned(keys), factory)
}

/// Build a decorator whose dependencies are resolved each time it is applied
pub fn depend_decorator<F>(keys: &[&Key], factory: F) -> Decorator
where
    F: Fn(Dependencies, Instance) -> Result<Instance> + Send + Sync + 'static,
{
    depend_decorator_keys(owned(keys), factory)
}

/// Build an aggregator whose dependencies are resolved before it combines
/// the providers
pub fn depend_aggregator<F>(keys: &[&Key], factory: F) -> Aggregator
where
    F: Fn(Dependencies, Providers<'_>) -> Result<Instance> + Send + Sync + 'static,
{
    depend_aggregator_keys(owned(keys), factory)
}

fn owned(keys: &[&Key]) -> Vec<Key> {
    keys.iter().map(|&key| key.clone()).collect()
}

pub(crate) fn depend_keys<F>(keys: Vec<Key>, factory: F) -> Provider
where
    F: Fn(Dependencies) -> Result<Instance> + Send + Sync + 'static,
{
    registry::provider(move |resolution| factory(resolve_all(resolution, &keys)?))
}

pub(crate) fn depend_decorator_keys<F>(keys: Vec<Key>, factory: F) -> Decorator
where
    F: Fn(Dependencies, Instance) -> Result<Instance> + Send + Sync + 'static,
{
    registry::decorator(move |resolution, value| factory(resolve_all(resolution, &keys)?, value))
}

pub(crate) fn depend_aggregator_keys<F>(keys: Vec<Key>, factory: F) -> Aggregator
where
    F: Fn(Dependencies, Providers<'_>) -> Result<Instance> + Send + Sync + 'static,
{
    registry::aggregator(move |providers| {
        let dependencies = resolve_all(providers.resolution(), &keys)?;
        factory(dependencies, providers)
    })
}
