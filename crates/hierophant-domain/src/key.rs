//! Capability keys
//!
//! A [`Key`] names one abstract capability. Keys are compared by identity,
//! never by name: two keys created with the same label are different keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, process-unique identity of a capability
///
/// Cloning a key yields the same identity. The name is only a label for
/// diagnostics and error messages.
///
/// # Example
///
/// ```
/// use hierophant_domain::Key;
///
/// let a = Key::new("logger");
/// let b = Key::new("logger");
///
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Key {
    id: u64,
    name: Arc<str>,
}

impl Key {
    /// Create a fresh key with a diagnostic name
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    /// Numeric identity, unique for the lifetime of the process
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Diagnostic name given at creation
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({}#{})", self.name, self.id)
    }
}
