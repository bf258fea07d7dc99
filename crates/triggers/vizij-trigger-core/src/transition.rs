//! Transition trigger: fires on the enter and/or exit edge of a state.

use crate::behaviour::{StateInfo, StateMachineBehaviour};
use crate::config::TransitionTriggerConfig;
use crate::error::TriggerError;
use crate::trigger::TriggerList;

pub struct TransitionTrigger<C> {
    config: TransitionTriggerConfig,
    triggers: TriggerList<C>,
}

impl<C> TransitionTrigger<C> {
    pub fn new(config: TransitionTriggerConfig, triggers: TriggerList<C>) -> Self {
        Self { config, triggers }
    }

    pub fn config(&self) -> &TransitionTriggerConfig {
        &self.config
    }
}

impl<C> std::fmt::Debug for TransitionTrigger<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionTrigger")
            .field("config", &self.config)
            .field("triggers", &self.triggers)
            .finish()
    }
}

impl<C> StateMachineBehaviour<C> for TransitionTrigger<C> {
    fn on_state_enter(&mut self, ctx: &mut C, _info: &StateInfo) -> Result<(), TriggerError> {
        if self.config.on_enter {
            log::debug!("transition trigger fired on enter");
            self.triggers.invoke_all(ctx)?;
        }
        Ok(())
    }

    fn on_state_exit(&mut self, ctx: &mut C, _info: &StateInfo) -> Result<(), TriggerError> {
        if self.config.on_exit {
            log::debug!("transition trigger fired on exit");
            self.triggers.invoke_all(ctx)?;
        }
        Ok(())
    }
}
