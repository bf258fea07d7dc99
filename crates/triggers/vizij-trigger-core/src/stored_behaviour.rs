//! Behaviour configuration loaded from JSON.
//!
//! ```json
//! { "type": "timed", "trigger_time": 0.5, "once": false,
//!   "triggers": [ { "kind": "log", "params": { "message": "step" } } ] }
//! { "type": "transition", "on_enter": true, "on_exit": false, "triggers": [] }
//! ```
//!
//! Trigger kinds are resolved through a [`TriggerRegistry`]; unknown kinds and
//! out-of-range trigger times are rejected before any behaviour is built.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::behaviour::{BehaviourStack, StateMachineBehaviour};
use crate::config::{TimedTriggerConfig, TransitionTriggerConfig};
use crate::error::ConfigError;
use crate::timed::TimedTrigger;
use crate::transition::TransitionTrigger;
use crate::trigger::{TriggerList, TriggerRegistry};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TriggerSpec {
    pub kind: String,
    #[serde(default)]
    pub params: JsonValue,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviourSpec {
    Timed {
        trigger_time: f32,
        #[serde(default)]
        once: bool,
        #[serde(default)]
        triggers: Vec<TriggerSpec>,
    },
    Transition {
        #[serde(default)]
        on_enter: bool,
        #[serde(default)]
        on_exit: bool,
        #[serde(default)]
        triggers: Vec<TriggerSpec>,
    },
}

impl BehaviourSpec {
    pub fn triggers(&self) -> &[TriggerSpec] {
        match self {
            BehaviourSpec::Timed { triggers, .. } | BehaviourSpec::Transition { triggers, .. } => {
                triggers
            }
        }
    }

    /// Build the runtime behaviour, resolving every trigger kind through `registry`.
    pub fn build<C: 'static>(
        &self,
        registry: &TriggerRegistry<C>,
    ) -> Result<Box<dyn StateMachineBehaviour<C>>, ConfigError> {
        let mut list = TriggerList::new();
        for spec in self.triggers() {
            list.push(registry.build(&spec.kind, &spec.params)?);
        }
        match *self {
            BehaviourSpec::Timed {
                trigger_time, once, ..
            } => {
                let cfg = TimedTriggerConfig::new(trigger_time, once);
                cfg.validate()?;
                Ok(Box::new(TimedTrigger::new(cfg, list)))
            }
            BehaviourSpec::Transition {
                on_enter, on_exit, ..
            } => Ok(Box::new(TransitionTrigger::new(
                TransitionTriggerConfig { on_enter, on_exit },
                list,
            ))),
        }
    }
}

/// Parse one behaviour object.
pub fn parse_behaviour_json<C: 'static>(
    s: &str,
    registry: &TriggerRegistry<C>,
) -> Result<Box<dyn StateMachineBehaviour<C>>, ConfigError> {
    let spec: BehaviourSpec = serde_json::from_str(s)?;
    spec.build(registry)
}

/// Parse an array of behaviours into a stack, preserving order.
pub fn parse_behaviours_json<C: 'static>(
    s: &str,
    registry: &TriggerRegistry<C>,
) -> Result<BehaviourStack<C>, ConfigError> {
    let specs: Vec<BehaviourSpec> = serde_json::from_str(s)?;
    let mut stack = BehaviourStack::new();
    for spec in &specs {
        stack.push(spec.build(registry)?);
    }
    Ok(stack)
}
