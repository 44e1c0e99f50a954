//! Opt-in provider caching
//!
//! The engine never memoizes. A provider that should build its value once
//! wraps itself with [`cached`]. The cache belongs to the wrapped provider,
//! not to a container.

use std::sync::Arc;

use hierophant_domain::Instance;
use once_cell::sync::OnceCell;

use super::registry::{self, Provider};

/// Wrap `provider` so its first successful value is reused by every later
/// invocation
///
/// Failures are not cached: the next invocation runs the provider again.
/// Registering the returned provider in several containers shares one value
/// between them, built against whichever container resolved it first.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use hierophant_domain::{Key, instance};
/// use hierophant_infrastructure::di::{Container, cached, provider};
///
/// let builds = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&builds);
/// let pool = Key::new("pool");
///
/// let container = Container::new();
/// container.provide(&pool, cached(provider(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(instance("connection pool"))
/// })));
///
/// container.resolve(&pool).unwrap();
/// container.resolve(&pool).unwrap();
/// assert_eq!(builds.load(Ordering::SeqCst), 1);
/// ```
pub fn cached(provider: Provider) -> Provider {
    let cell: Arc<OnceCell<Instance>> = Arc::new(OnceCell::new());
    registry::provider(move |resolution| {
        cell.get_or_try_init(|| provider(resolution))
            .map(Arc::clone)
    })
}
