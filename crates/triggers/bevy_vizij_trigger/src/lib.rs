//! Bevy adapter for vizij-trigger-core.
//!
//! Entities carrying [`AnimatorStatePlayback`] and [`StateBehaviours`] get the
//! enter/update/exit protocol driven once per frame. Fired triggers surface as
//! [`TriggerFired`] events; failing triggers surface as [`TriggerFailed`].

use bevy::prelude::*;
use serde::Deserialize;
use vizij_trigger_core::trigger::parse_params;
use vizij_trigger_core::{Trigger, TriggerRegistry};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{AnimatorStatePlayback, StateBehaviours};
pub use resources::{FixedDt, VizijTriggerRegistry};
pub use systems::drive_state_behaviours_system;

/// Emitted for every `"event"` trigger that fires.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TriggerFired {
    pub entity: Entity,
    pub name: String,
}

/// Emitted when a trigger returns an error during a state callback.
#[derive(Event, Debug, Clone)]
pub struct TriggerFailed {
    pub entity: Entity,
    pub message: String,
}

/// Animator context handed to triggers: the animated entity plus the events
/// raised during this callback.
#[derive(Debug)]
pub struct TriggerContext {
    pub entity: Entity,
    pub fired: Vec<TriggerFired>,
}

impl TriggerContext {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            fired: Vec::new(),
        }
    }
}

/// Raises a named [`TriggerFired`] event for the animated entity.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventTrigger {
    #[serde(default)]
    pub name: String,
}

impl EventTrigger {
    pub const KIND: &'static str = "event";
}

impl Trigger<TriggerContext> for EventTrigger {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn invoke(&mut self, ctx: &mut TriggerContext) -> anyhow::Result<()> {
        ctx.fired.push(TriggerFired {
            entity: ctx.entity,
            name: self.name.clone(),
        });
        Ok(())
    }
}

/// Core built-ins plus the `"event"` kind.
pub fn trigger_registry() -> TriggerRegistry<TriggerContext> {
    let mut reg = TriggerRegistry::with_builtins();
    reg.register(EventTrigger::KIND, |params| {
        let t: EventTrigger = parse_params(EventTrigger::KIND, params)?;
        Ok(Box::new(t) as Box<dyn Trigger<TriggerContext>>)
    });
    reg
}

pub struct VizijTriggerPlugin;

impl Plugin for VizijTriggerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FixedDt>()
            .insert_resource(VizijTriggerRegistry(trigger_registry()))
            .add_event::<TriggerFired>()
            .add_event::<TriggerFailed>()
            .add_systems(Update, drive_state_behaviours_system);
    }
}
