//! Registry Store
//!
//! Per key, three independent channels: an ordered provider list, an
//! ordered decorator list and a single aggregator slot. Lists only grow;
//! the aggregator is replaced, never stacked.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hierophant_domain::{Instance, Key, Result};
use tracing::trace;

use super::aggregators;
use super::report::KeyReport;
use super::resolver::{Providers, Resolution};

/// Deferred computation producing one candidate value for a key
pub type Provider = Arc<dyn Fn(&Resolution<'_>) -> Result<Instance> + Send + Sync>;

/// Wraps a value resolved for a key
pub type Decorator = Arc<dyn Fn(&Resolution<'_>, Instance) -> Result<Instance> + Send + Sync>;

/// Combines the raw provider thunks of a key into one value
pub type Aggregator = Arc<dyn Fn(Providers<'_>) -> Result<Instance> + Send + Sync>;

/// Build a [`Provider`] from a closure
pub fn provider<F>(f: F) -> Provider
where
    F: Fn(&Resolution<'_>) -> Result<Instance> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Build a [`Decorator`] from a closure
pub fn decorator<F>(f: F) -> Decorator
where
    F: Fn(&Resolution<'_>, Instance) -> Result<Instance> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Build an [`Aggregator`] from a closure
pub fn aggregator<F>(f: F) -> Aggregator
where
    F: Fn(Providers<'_>) -> Result<Instance> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registration entry for one key
struct Entry {
    providers: Vec<Provider>,
    decorators: Vec<Decorator>,
    aggregator: Aggregator,
    custom_aggregator: bool,
}

impl Entry {
    fn new() -> Self {
        Self {
            providers: Vec::new(),
            decorators: Vec::new(),
            aggregator: aggregators::exactly_one(),
            custom_aggregator: false,
        }
    }

    fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            providers: self.providers.clone(),
            decorators: self.decorators.clone(),
            aggregator: Arc::clone(&self.aggregator),
        }
    }

    fn report(&self, key: &Key) -> KeyReport {
        KeyReport {
            key: key.clone(),
            providers: self.providers.len(),
            decorators: self.decorators.len(),
            custom_aggregator: self.custom_aggregator,
        }
    }
}

/// Point-in-time copy of an entry, taken so that resolution runs without
/// holding the store lock
pub(crate) struct EntrySnapshot {
    pub(crate) providers: Vec<Provider>,
    pub(crate) decorators: Vec<Decorator>,
    pub(crate) aggregator: Aggregator,
}

/// Key-indexed store of providers, decorators and aggregators
#[derive(Default)]
pub(crate) struct Registry {
    entries: RwLock<HashMap<Key, Entry>>,
}

impl Registry {
    // Every mutation is a single push or replace, so a poisoned map is still consistent
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Key, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Key, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ensure an entry exists for `key` without touching an existing one
    pub(crate) fn learn(&self, key: &Key) {
        if self.read().contains_key(key) {
            return;
        }
        self.write().entry(key.clone()).or_insert_with(|| {
            trace!(key = %key, "Learned key");
            Entry::new()
        });
    }

    pub(crate) fn provide(&self, key: &Key, provider: Provider) {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.providers.push(provider);
        trace!(key = %key, providers = entry.providers.len(), "Registered provider");
    }

    pub(crate) fn decorate(&self, key: &Key, decorator: Decorator) {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.decorators.push(decorator);
        trace!(key = %key, decorators = entry.decorators.len(), "Registered decorator");
    }

    pub(crate) fn aggregate(&self, key: &Key, aggregator: Aggregator) {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.aggregator = aggregator;
        entry.custom_aggregator = true;
        trace!(key = %key, "Registered aggregator");
    }

    /// Learn `key` and copy its current registrations
    pub(crate) fn snapshot(&self, key: &Key) -> EntrySnapshot {
        if let Some(entry) = self.read().get(key) {
            return entry.snapshot();
        }
        self.write()
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .snapshot()
    }

    /// Learned keys in creation order
    pub(crate) fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.read().keys().cloned().collect();
        keys.sort_by_key(Key::id);
        keys
    }

    pub(crate) fn describe(&self, key: &Key) -> Option<KeyReport> {
        self.read().get(key).map(|entry| entry.report(key))
    }

    pub(crate) fn reports(&self) -> Vec<KeyReport> {
        let entries = self.read();
        let mut reports: Vec<KeyReport> = entries
            .iter()
            .map(|(key, entry)| entry.report(key))
            .collect();
        reports.sort_by_key(|report| report.key.id());
        reports
    }
}
