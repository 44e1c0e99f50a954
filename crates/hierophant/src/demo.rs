//! Logging/conversation wiring
//!
//! Two independent modules share the `log` key: one provides a logging
//! function, the other provides a conversation function that depends on it.
//! Any number of extra greeters may be registered under `greeting`; a
//! custom aggregator joins their output.

use std::sync::Arc;

use hierophant_domain::{Instance, Key, Result, instance};
use hierophant_infrastructure::config::ContainerConfig;
use hierophant_infrastructure::di::{Container, Installation, Module};
use tracing::info;

/// Logging function resolved for the `log` key
pub type Log = Arc<dyn Fn(&[&str]) + Send + Sync>;

/// Conversation function resolved for the `converse` key
pub type Converse = Arc<dyn Fn(&[&str]) -> String + Send + Sync>;

/// Keys wired by the demo modules
#[derive(Debug, Clone)]
pub struct DemoKeys {
    pub log: Key,
    pub converse: Key,
    pub greeting: Key,
}

impl DemoKeys {
    pub fn new() -> Self {
        Self {
            log: Key::new("log"),
            converse: Key::new("converse"),
            greeting: Key::new("greeting"),
        }
    }
}

impl Default for DemoKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides `log` as a function emitting one tracing event per call
pub struct LoggingModule {
    keys: DemoKeys,
}

impl LoggingModule {
    pub fn new(keys: &DemoKeys) -> Self {
        Self { keys: keys.clone() }
    }
}

impl Module for LoggingModule {
    fn name(&self) -> &str {
        "logging"
    }

    fn installation(&self) -> Installation {
        Installation::new().provider(&self.keys.log, &[], |_| {
            let log: Log = Arc::new(|messages: &[&str]| {
                info!(count = messages.len(), "{}", messages.join(" "));
            });
            Ok(instance(log))
        })
    }
}

/// Provides `converse` on top of `log`, plus two greeters joined by a
/// custom aggregator on `greeting`
pub struct ConversationModule {
    keys: DemoKeys,
}

impl ConversationModule {
    pub fn new(keys: &DemoKeys) -> Self {
        Self { keys: keys.clone() }
    }
}

impl Module for ConversationModule {
    fn name(&self) -> &str {
        "conversation"
    }

    fn installation(&self) -> Installation {
        Installation::new()
            .provider(&self.keys.converse, &[&self.keys.log], |deps| {
                let log = deps.get::<Log>(0)?;
                let converse: Converse = Arc::new(move |messages: &[&str]| {
                    log(messages);
                    format!("there were {} messages", messages.len())
                });
                Ok(instance(converse))
            })
            .provider(&self.keys.greeting, &[], |_| Ok(instance(String::from("A"))))
            .provider(&self.keys.greeting, &[], |_| Ok(instance(String::from("B"))))
            .aggregator(&self.keys.greeting, &[], |_, providers| {
                let parts = providers
                    .invoke_all()?
                    .iter()
                    .map(text)
                    .collect::<Result<Vec<_>>>()?;
                Ok(instance(parts.join(" | ")))
            })
    }
}

fn text(value: &Instance) -> Result<String> {
    value
        .downcast_ref::<String>()
        .cloned()
        .ok_or_else(|| hierophant_domain::Error::factory("greeter produced a non-string value"))
}

/// Build a container with both demo modules installed
pub fn container(config: ContainerConfig) -> (Container, DemoKeys) {
    let keys = DemoKeys::new();
    let container = Container::with_config(config);
    container.install_module(&LoggingModule::new(&keys));
    container.install_module(&ConversationModule::new(&keys));
    (container, keys)
}
