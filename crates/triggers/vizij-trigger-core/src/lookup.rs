//! Locating behaviours and clips inside an animator controller.

use crate::data::{AnimatorController, AnimatorState, Clip, Motion, StateMachine};
use crate::ids::BehaviourId;

/// Depth-first search for the state owning `behaviour`.
///
/// Direct states are checked before nested sub-machines; the first match wins.
pub fn find_matching_state(machine: &StateMachine, behaviour: BehaviourId) -> Option<&AnimatorState> {
    if let Some(state) = machine
        .states
        .iter()
        .find(|s| s.behaviours.contains(&behaviour))
    {
        return Some(state);
    }
    machine
        .state_machines
        .iter()
        .find_map(|sub| find_matching_state(sub, behaviour))
}

impl AnimatorController {
    /// First state across all layers (in layer order) owning `behaviour`.
    pub fn find_state(&self, behaviour: BehaviourId) -> Option<&AnimatorState> {
        self.layers
            .iter()
            .find_map(|layer| find_matching_state(&layer.state_machine, behaviour))
    }
}

/// The clip a motion plays, or the first resolvable clip of a blend tree.
///
/// Returns `None` for empty blend trees (including trees whose children are all
/// empty trees).
pub fn first_clip(motion: &Motion) -> Option<&Clip> {
    match motion {
        Motion::Clip(clip) => Some(clip),
        Motion::BlendTree(tree) => tree.children.iter().find_map(|c| first_clip(&c.motion)),
    }
}
