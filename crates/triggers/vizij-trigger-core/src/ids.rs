//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Identity of one behaviour instance attached to an animator state.
///
/// Controllers reference behaviours by id so that a behaviour can be located in
/// the state-machine graph without comparing object addresses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BehaviourId(pub u32);

/// Monotonic allocator for BehaviourId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_behaviour: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_behaviour(&mut self) -> BehaviourId {
        let id = BehaviourId(self.next_behaviour);
        self.next_behaviour = self.next_behaviour.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
