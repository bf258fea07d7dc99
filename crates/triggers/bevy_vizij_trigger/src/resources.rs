use bevy::prelude::*;
use vizij_trigger_core::TriggerRegistry;

use crate::TriggerContext;

/// Fixed timestep configuration (seconds per tick).
#[derive(Resource)]
pub struct FixedDt(pub f32);

impl Default for FixedDt {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

/// Trigger kinds available when building [`crate::StateBehaviours`] from JSON.
#[derive(Resource)]
pub struct VizijTriggerRegistry(pub TriggerRegistry<TriggerContext>);
