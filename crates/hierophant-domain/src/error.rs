//! Error handling types

use thiserror::Error;

use crate::key::Key;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Hierophant
///
/// Every failure surfaces synchronously at the `resolve` call that triggered
/// it. Errors raised by user factories travel through the engine unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The default aggregator found nothing registered for a key
    #[error("No providers for {key}")]
    NoProviders {
        /// Key that was resolved
        key: Key,
    },

    /// The default aggregator found several providers for a key
    #[error("Too many providers for {key} ({count} registered); register an aggregator to combine them")]
    TooManyProviders {
        /// Key that was resolved
        key: Key,
        /// Number of registered providers
        count: usize,
    },

    /// A key was re-entered while its own resolution was still in progress
    #[error("Dependency cycle detected: {}", display_path(.path))]
    DependencyCycle {
        /// In-progress chain, ending with the re-entered key
        path: Vec<Key>,
    },

    /// Resolution nested deeper than the configured limit
    #[error("Resolution of {key} exceeded the maximum depth of {depth}")]
    DepthExceeded {
        /// Key whose resolution would have exceeded the limit
        key: Key,
        /// Configured limit
        depth: usize,
    },

    /// Typed access on a value of another type
    #[error("Value resolved for {key} is not a {expected}")]
    TypeMismatch {
        /// Key the value was resolved for
        key: Key,
        /// Requested Rust type
        expected: &'static str,
    },

    /// Failure raised by a provider, decorator or aggregator
    #[error("Factory error: {message}")]
    Factory {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logging subscriber could not be installed
    #[error("Logging error: {message}")]
    Logging {
        /// Description of the logging error
        message: String,
    },
}

fn display_path(path: &[Key]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

// Resolution error creation methods
impl Error {
    /// Create a "no providers" error
    pub fn no_providers(key: Key) -> Self {
        Self::NoProviders { key }
    }

    /// Create a "too many providers" error
    pub fn too_many_providers(key: Key, count: usize) -> Self {
        Self::TooManyProviders { key, count }
    }

    /// Create a dependency cycle error from the in-progress chain
    pub fn dependency_cycle(path: Vec<Key>) -> Self {
        Self::DependencyCycle { path }
    }

    /// Create a depth limit error
    pub fn depth_exceeded(key: Key, depth: usize) -> Self {
        Self::DepthExceeded { key, depth }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(key: Key, expected: &'static str) -> Self {
        Self::TypeMismatch { key, expected }
    }
}

// Factory and ambient error creation methods
impl Error {
    /// Create a factory error
    pub fn factory<S: Into<String>>(message: S) -> Self {
        Self::Factory {
            message: message.into(),
            source: None,
        }
    }

    /// Create a factory error with source
    pub fn factory_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Factory {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a logging error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Error {
    /// Key this error is about, when it concerns a single key
    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::NoProviders { key }
            | Self::TooManyProviders { key, .. }
            | Self::DepthExceeded { key, .. }
            | Self::TypeMismatch { key, .. } => Some(key),
            Self::DependencyCycle { path } => path.last(),
            Self::Factory { .. } | Self::Configuration { .. } | Self::Logging { .. } => None,
        }
    }

    /// Whether the default exactly-one policy rejected the provider count
    pub fn is_cardinality(&self) -> bool {
        matches!(
            self,
            Self::NoProviders { .. } | Self::TooManyProviders { .. }
        )
    }
}
