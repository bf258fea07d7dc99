//! Vizij Trigger Core (engine-agnostic)
//!
//! Behaviours attached to animator states that fire application callbacks at
//! normalized playback times or on state transitions, plus the blend weight
//! reconstruction used by the editor previewer. Adapters (Bevy) drive the
//! enter/update/exit protocol once per tick.

pub mod behaviour;
pub mod blend;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod preview;
pub mod stored_behaviour;
pub mod timed;
pub mod transition;
pub mod trigger;

// Re-exports for consumers (adapters)
pub use behaviour::{BehaviourStack, StateInfo, StateMachineBehaviour};
pub use blend::{reconstruct_weights, BlendParameters};
pub use config::{Config, TimedTriggerConfig, TransitionTriggerConfig};
pub use data::{
    AnimatorController, AnimatorState, BlendTree, BlendType, ChildMotion, Clip, Layer, Motion,
    StateMachine, Vec2,
};
pub use error::{ConfigError, PreviewError, TriggerError};
pub use ids::{BehaviourId, IdAllocator};
pub use lookup::{find_matching_state, first_clip};
pub use preview::{GraphHandle, MixerInput, PreviewGraph, PreviewHost, PreviewSession};
pub use stored_behaviour::{parse_behaviour_json, parse_behaviours_json, BehaviourSpec};
pub use timed::{TimedTrigger, TriggerRuntimeState};
pub use transition::TransitionTrigger;
pub use trigger::{LogTrigger, Trigger, TriggerList, TriggerRegistry};
