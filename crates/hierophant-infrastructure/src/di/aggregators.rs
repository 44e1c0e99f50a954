//! Stock aggregation policies
//!
//! | Policy | Resolved value |
//! |--------|----------------|
//! | [`exactly_one`] | the single provider's value (default) |
//! | [`collect_all`] | `Vec<Instance>` in registration order |
//! | [`first`] | first-registered provider's value |
//! | [`last`] | last-registered provider's value |
//! | [`fan_out`] | [`FanOut`] of deferred providers |

use hierophant_domain::{Error, Instance, Key, Result, instance};

use super::registry::{Aggregator, aggregator};
use super::resolver::Deferred;

/// Require exactly one provider and return its value
pub fn exactly_one() -> Aggregator {
    aggregator(|providers| match providers.as_slice() {
        [] => Err(Error::no_providers(providers.key().clone())),
        [only] => only(providers.resolution()),
        many => Err(Error::too_many_providers(
            providers.key().clone(),
            many.len(),
        )),
    })
}

/// Invoke every provider and return their values as `Vec<Instance>`
///
/// An empty provider list yields an empty vector.
pub fn collect_all() -> Aggregator {
    aggregator(|providers| Ok(instance(providers.invoke_all()?)))
}

/// Invoke only the first-registered provider
pub fn first() -> Aggregator {
    aggregator(|providers| {
        providers
            .invoke(0)
            .unwrap_or_else(|| Err(Error::no_providers(providers.key().clone())))
    })
}

/// Invoke only the last-registered provider, so later registrations override earlier ones
pub fn last() -> Aggregator {
    aggregator(|providers| match providers.len().checked_sub(1) {
        Some(index) => providers
            .invoke(index)
            .unwrap_or_else(|| Err(Error::no_providers(providers.key().clone()))),
        None => Err(Error::no_providers(providers.key().clone())),
    })
}

/// Resolve to a [`FanOut`] without invoking any provider
pub fn fan_out() -> Aggregator {
    aggregator(|providers| {
        Ok(instance(FanOut {
            key: providers.key().clone(),
            members: providers.defer_all(),
        }))
    })
}

/// Providers of one key, invoked on demand
#[derive(Clone, Debug)]
pub struct FanOut {
    key: Key,
    members: Vec<Deferred>,
}

impl FanOut {
    /// Key whose providers this fan-out holds
    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Deferred] {
        &self.members
    }

    /// Invoke every member in registration order
    pub fn call_all(&self) -> Result<Vec<Instance>> {
        self.members.iter().map(Deferred::call).collect()
    }
}
