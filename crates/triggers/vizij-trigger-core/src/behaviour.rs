//! Host animator callback protocol.
//!
//! The host calls `on_state_enter` when a state becomes active, `on_state_update`
//! once per tick while it stays active, and `on_state_exit` when it is left.
//! Each call happens at most once per tick per active state instance.

use serde::{Deserialize, Serialize};

use crate::error::TriggerError;
use crate::ids::{BehaviourId, IdAllocator};

/// Per-tick snapshot of the state the behaviour is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    /// Unbounded normalized playback position; the integer part counts completed loops.
    pub normalized_time: f32,
    /// Host estimate of the normalized time the next tick would add.
    #[serde(default)]
    pub frame_delta: f32,
    #[serde(default)]
    pub layer_index: usize,
}

impl StateInfo {
    pub fn at(normalized_time: f32) -> Self {
        Self {
            normalized_time,
            ..Self::default()
        }
    }

    pub fn with_frame_delta(mut self, frame_delta: f32) -> Self {
        self.frame_delta = frame_delta;
        self
    }

    /// Position inside the current loop iteration, in [0, 1).
    #[inline]
    pub fn iteration_time(&self) -> f32 {
        self.normalized_time % 1.0
    }

    /// Completed loop iterations as a whole number.
    #[inline]
    pub fn iterations_completed(&self) -> f32 {
        self.normalized_time - self.iteration_time()
    }
}

/// Hook object receiving the enter/update/exit lifecycle of one animator state.
pub trait StateMachineBehaviour<C>: Send + Sync {
    fn on_state_enter(&mut self, _ctx: &mut C, _info: &StateInfo) -> Result<(), TriggerError> {
        Ok(())
    }

    fn on_state_update(&mut self, _ctx: &mut C, _info: &StateInfo) -> Result<(), TriggerError> {
        Ok(())
    }

    fn on_state_exit(&mut self, _ctx: &mut C, _info: &StateInfo) -> Result<(), TriggerError> {
        Ok(())
    }
}

/// Ordered behaviours attached to a single state.
///
/// Every behaviour receives each callback even when an earlier one fails; the
/// first error is returned after the whole stack has run. Each pushed behaviour
/// gets a [`BehaviourId`] that controllers list on the owning state.
pub struct BehaviourStack<C> {
    ids: IdAllocator,
    behaviours: Vec<(BehaviourId, Box<dyn StateMachineBehaviour<C>>)>,
}

impl<C> BehaviourStack<C> {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            behaviours: Vec::new(),
        }
    }

    pub fn push(&mut self, behaviour: Box<dyn StateMachineBehaviour<C>>) -> BehaviourId {
        let id = self.ids.alloc_behaviour();
        self.behaviours.push((id, behaviour));
        id
    }

    pub fn len(&self) -> usize {
        self.behaviours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviours.is_empty()
    }

    /// Ids in dispatch order.
    pub fn ids(&self) -> impl Iterator<Item = BehaviourId> + '_ {
        self.behaviours.iter().map(|(id, _)| *id)
    }

    pub fn enter(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        self.dispatch(|b| b.on_state_enter(ctx, info))
    }

    pub fn update(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        self.dispatch(|b| b.on_state_update(ctx, info))
    }

    pub fn exit(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        self.dispatch(|b| b.on_state_exit(ctx, info))
    }

    fn dispatch<F>(&mut self, mut call: F) -> Result<(), TriggerError>
    where
        F: FnMut(&mut dyn StateMachineBehaviour<C>) -> Result<(), TriggerError>,
    {
        let mut first = None;
        for (id, b) in self.behaviours.iter_mut() {
            if let Err(e) = call(b.as_mut()) {
                log::debug!("behaviour {} failed: {e}", id.0);
                if first.is_none() {
                    first = Some(e);
                } else {
                    log::warn!("additional behaviour failure on state: {e}");
                }
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl<C> Default for BehaviourStack<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> From<Vec<Box<dyn StateMachineBehaviour<C>>>> for BehaviourStack<C> {
    fn from(behaviours: Vec<Box<dyn StateMachineBehaviour<C>>>) -> Self {
        let mut stack = Self::new();
        for b in behaviours {
            stack.push(b);
        }
        stack
    }
}
