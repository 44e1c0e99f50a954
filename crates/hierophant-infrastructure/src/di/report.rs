//! Registry introspection
//!
//! Read-only summaries of what a container knows. Useful for diagnostics
//! and startup logs; producing a report never learns new keys.

use std::fmt;

use hierophant_domain::Key;

/// Registration counts for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReport {
    /// Key described
    pub key: Key,
    /// Number of registered providers
    pub providers: usize,
    /// Number of registered decorators
    pub decorators: usize,
    /// Whether the default exactly-one aggregator was replaced
    pub custom_aggregator: bool,
}

/// Registration counts for every learned key, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryReport {
    /// One report per key
    pub keys: Vec<KeyReport>,
}

impl RegistryReport {
    /// Report for `key`, if it was learned
    pub fn get(&self, key: &Key) -> Option<&KeyReport> {
        self.keys.iter().find(|report| &report.key == key)
    }
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let aggregator = if self.custom_aggregator {
            "custom"
        } else {
            "exactly-one"
        };
        write!(
            f,
            "{}: {} provider(s), {} decorator(s), aggregator={}",
            self.key, self.providers, self.decorators, aggregator
        )
    }
}

impl fmt::Display for RegistryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registered Keys:")?;
        for report in &self.keys {
            writeln!(f, "  - {report}")?;
        }
        Ok(())
    }
}
