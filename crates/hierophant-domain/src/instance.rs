//! Type-erased instances
//!
//! The container never inspects what it resolves. Values travel as
//! [`Instance`] and callers recover concrete types with [`downcast`].

use std::any::{Any, type_name};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::key::Key;

/// Opaque value produced by providers, aggregators and decorators
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrap a concrete value as an [`Instance`]
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Recover the concrete type of an instance resolved for `key`
///
/// # Example
///
/// ```
/// use hierophant_domain::{Key, downcast, instance};
///
/// let key = Key::new("answer");
/// let value = instance(42_u32);
///
/// assert_eq!(*downcast::<u32>(&key, &value).unwrap(), 42);
/// assert!(downcast::<String>(&key, &value).is_err());
/// ```
pub fn downcast<T: Any + Send + Sync>(key: &Key, instance: &Instance) -> Result<Arc<T>> {
    Arc::clone(instance)
        .downcast::<T>()
        .map_err(|_| Error::type_mismatch(key.clone(), type_name::<T>()))
}
