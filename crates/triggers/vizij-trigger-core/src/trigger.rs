//! Trigger callbacks and the registry that builds them from configuration.
//!
//! A trigger is the application side of an animation event: something that
//! runs when a behaviour decides to fire. Concrete kinds are registered by name
//! with a factory so that behaviour configuration can be loaded from JSON
//! without reflection.

use std::fmt;

use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{ConfigError, TriggerError};

/// Application callback invoked when a behaviour fires.
///
/// `C` is the animator context handed through from the host (the controlled
/// entity, an event sink, ...). Errors are returned untouched to the caller of
/// the state callback.
pub trait Trigger<C>: Send + Sync {
    /// Stable kind name, used in logs and error messages.
    fn kind(&self) -> &str;

    fn invoke(&mut self, ctx: &mut C) -> anyhow::Result<()>;
}

/// Ordered list of triggers owned by one behaviour.
pub struct TriggerList<C> {
    items: Vec<Box<dyn Trigger<C>>>,
}

impl<C> TriggerList<C> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, trigger: Box<dyn Trigger<C>>) {
        self.items.push(trigger);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Invoke every trigger in order. Stops at the first failure.
    pub fn invoke_all(&mut self, ctx: &mut C) -> Result<(), TriggerError> {
        for trigger in self.items.iter_mut() {
            trigger.invoke(ctx).map_err(|source| TriggerError::Invoke {
                trigger: trigger.kind().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

impl<C> Default for TriggerList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> From<Vec<Box<dyn Trigger<C>>>> for TriggerList<C> {
    fn from(items: Vec<Box<dyn Trigger<C>>>) -> Self {
        Self { items }
    }
}

impl<C> fmt::Debug for TriggerList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|t| t.kind()))
            .finish()
    }
}

/// Sample trigger that writes a line to the log.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogTrigger {
    #[serde(default)]
    pub message: Option<String>,
}

impl LogTrigger {
    pub const KIND: &'static str = "log";
}

impl<C> Trigger<C> for LogTrigger {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn invoke(&mut self, _ctx: &mut C) -> anyhow::Result<()> {
        let msg = self
            .message
            .as_deref()
            .unwrap_or("Animation event was invoked!");
        log::info!("{msg}");
        Ok(())
    }
}

pub type TriggerFactory<C> =
    dyn Fn(&JsonValue) -> Result<Box<dyn Trigger<C>>, ConfigError> + Send + Sync;

/// Kind name -> factory map.
pub struct TriggerRegistry<C> {
    factories: HashMap<String, Box<TriggerFactory<C>>>,
}

impl<C: 'static> TriggerRegistry<C> {
    /// Empty registry, no kinds known.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the built-in kinds (`"log"`).
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(LogTrigger::KIND, |params| {
            let t: LogTrigger = parse_params(LogTrigger::KIND, params)?;
            Ok(Box::new(t) as Box<dyn Trigger<C>>)
        });
        reg
    }

    /// Register a factory for a kind. An existing factory for that kind is replaced.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&JsonValue) -> Result<Box<dyn Trigger<C>>, ConfigError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn build(&self, kind: &str, params: &JsonValue) -> Result<Box<dyn Trigger<C>>, ConfigError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ConfigError::UnknownTriggerKind(kind.to_string()))?;
        factory(params)
    }
}

impl<C: 'static> Default for TriggerRegistry<C> {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Deserialize factory params, treating a missing/null payload as the default.
pub fn parse_params<T>(kind: &str, params: &JsonValue) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone()).map_err(|source| ConfigError::TriggerParams {
        kind: kind.to_string(),
        source,
    })
}
