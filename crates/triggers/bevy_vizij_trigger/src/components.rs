use bevy::prelude::*;
use vizij_trigger_core::{parse_behaviours_json, BehaviourStack, ConfigError, TriggerRegistry};

use crate::TriggerContext;

/// Host-side playback of the animator state an entity is in.
///
/// Setting `active` starts the state (enter on the next frame); clearing it
/// leaves the state (exit on the next frame).
#[derive(Component, Debug, Clone)]
pub struct AnimatorStatePlayback {
    pub active: bool,
    /// Unbounded normalized time; reset to 0 on enter.
    pub normalized_time: f32,
    pub speed: f32,
    /// Seconds per loop of the state's motion.
    pub clip_length: f32,
    pub layer_index: usize,
}

impl AnimatorStatePlayback {
    pub fn new(clip_length: f32) -> Self {
        Self {
            active: true,
            normalized_time: 0.0,
            speed: 1.0,
            clip_length,
            layer_index: 0,
        }
    }

    /// Normalized time advanced by one tick of `dt` seconds.
    pub fn frame_delta(&self, dt: f32) -> f32 {
        if self.clip_length > 0.0 {
            dt * self.speed / self.clip_length
        } else {
            0.0
        }
    }
}

/// Behaviours attached to the entity's current state.
#[derive(Component)]
pub struct StateBehaviours {
    pub stack: BehaviourStack<TriggerContext>,
    pub(crate) entered: bool,
}

impl StateBehaviours {
    pub fn new(stack: BehaviourStack<TriggerContext>) -> Self {
        Self {
            stack,
            entered: false,
        }
    }

    pub fn from_json(
        json: &str,
        registry: &TriggerRegistry<TriggerContext>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(parse_behaviours_json(json, registry)?))
    }

    /// Whether enter has run and exit has not.
    pub fn is_entered(&self) -> bool {
        self.entered
    }
}
