//! Animator controller data model (read-only from the core's point of view).
//!
//! Controllers are hierarchical: layers own a root state machine, state
//! machines own states and nested sub-machines, and states reference the
//! behaviours attached to them by [`BehaviourId`].

use serde::{Deserialize, Serialize};

use crate::ids::BehaviourId;

/// 2D vector used for freeform blend positions and blend parameter targets.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A single animation clip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub name: String,
    /// Length of one loop in seconds.
    #[serde(rename = "length")]
    pub length_s: f32,
}

/// How a blend tree derives child weights.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlendType {
    #[serde(rename = "simple_1d")]
    Simple1D,
    #[serde(rename = "freeform_cartesian_2d")]
    FreeformCartesian2D,
    #[serde(rename = "freeform_directional_2d")]
    FreeformDirectional2D,
}

/// One entry of a blend tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChildMotion {
    pub motion: Motion,
    /// 1-D blend threshold.
    #[serde(default)]
    pub threshold: f32,
    /// 2-D blend position.
    #[serde(default)]
    pub position: Vec2,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlendTree {
    pub name: String,
    pub blend_type: BlendType,
    /// Parameter driving the X axis (or the only axis for 1-D trees).
    #[serde(default)]
    pub blend_parameter: String,
    /// Parameter driving the Y axis of 2-D trees.
    #[serde(default)]
    pub blend_parameter_y: String,
    #[serde(default)]
    pub children: Vec<ChildMotion>,
}

impl BlendTree {
    /// Smallest child threshold; 0 for an empty tree.
    pub fn min_threshold(&self) -> f32 {
        self.children
            .iter()
            .map(|c| c.threshold)
            .reduce(f32::min)
            .unwrap_or(0.0)
    }

    /// Largest child threshold; 0 for an empty tree.
    pub fn max_threshold(&self) -> f32 {
        self.children
            .iter()
            .map(|c| c.threshold)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }
}

/// Motion played by a state: a clip or a (possibly nested) blend tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Motion {
    Clip(Clip),
    BlendTree(BlendTree),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimatorState {
    pub name: String,
    #[serde(default)]
    pub motion: Option<Motion>,
    #[serde(default)]
    pub behaviours: Vec<BehaviourId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StateMachine {
    pub name: String,
    #[serde(default)]
    pub states: Vec<AnimatorState>,
    /// Nested sub-state-machines, searched after the direct states.
    #[serde(default)]
    pub state_machines: Vec<StateMachine>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    pub name: String,
    pub state_machine: StateMachine,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimatorController {
    pub name: String,
    #[serde(default)]
    pub layers: Vec<Layer>,
}
