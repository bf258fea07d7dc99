//! Editor preview of the pose at a behaviour's trigger time.
//!
//! The session resolves the state owning a behaviour, then either samples its
//! clip directly or reconstructs blend weights and samples an offline mixer
//! graph created by the host. The session owns at most one live graph and
//! destroys it when replaced, on `stop`, and on drop.

use crate::blend::{reconstruct_weights, BlendParameters};
use crate::config::Config;
use crate::data::{AnimatorController, Clip, Motion};
use crate::error::PreviewError;
use crate::ids::BehaviourId;
use crate::lookup::first_clip;

/// Host-side identity of an offline evaluation graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphHandle(pub u32);

/// One clip input of the preview mixer.
#[derive(Clone, Debug, PartialEq)]
pub struct MixerInput {
    pub clip: Clip,
    pub weight: f32,
}

/// Offline mixer graph: clips and their reconstructed weights.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewGraph {
    pub handle: GraphHandle,
    pub inputs: Vec<MixerInput>,
}

/// Editor services the previewer depends on.
///
/// `controller` folds selection, animator and controller resolution into one
/// call; each failure maps to a [`PreviewError`] shown to the user.
pub trait PreviewHost {
    fn controller(&self) -> Result<&AnimatorController, PreviewError>;
    fn blend_parameters(&self) -> &dyn BlendParameters;

    fn start_animation_mode(&mut self);
    fn stop_animation_mode(&mut self);

    /// Sample a single clip at `time_s` seconds onto the selected object.
    fn sample_clip(&mut self, clip: &Clip, time_s: f32);

    fn create_graph(&mut self, name: &str) -> GraphHandle;
    fn destroy_graph(&mut self, handle: GraphHandle);
    fn sample_graph(&mut self, graph: &PreviewGraph, normalized_time: f32);

    /// Restore the selected object's rest (T) pose.
    fn enforce_rest_pose(&mut self);
}

enum Plan {
    Clip(Clip),
    Blend(Vec<MixerInput>),
}

pub struct PreviewSession<'h, H: PreviewHost> {
    host: &'h mut H,
    behaviour: BehaviourId,
    normalized_time: f32,
    config: Config,
    graph: Option<PreviewGraph>,
    previewing: bool,
    preview_time: f32,
}

impl<'h, H: PreviewHost> PreviewSession<'h, H> {
    pub fn new(host: &'h mut H, behaviour: BehaviourId, normalized_time: f32, config: Config) -> Self {
        Self {
            host,
            behaviour,
            normalized_time,
            config,
            graph: None,
            previewing: false,
            preview_time: 0.0,
        }
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Last sampled clip time in seconds.
    pub fn preview_time(&self) -> f32 {
        self.preview_time
    }

    pub fn graph(&self) -> Option<&PreviewGraph> {
        self.graph.as_ref()
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    /// Editor access while the session is open, e.g. to edit the controller
    /// between refreshes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Check that the behaviour resolves to a state with a playable clip.
    pub fn validate(&self) -> Result<(), PreviewError> {
        let ctrl = self.host.controller()?;
        let state = ctrl
            .find_state(self.behaviour)
            .ok_or(PreviewError::StateNotFound)?;
        state
            .motion
            .as_ref()
            .and_then(first_clip)
            .map(|_| ())
            .ok_or(PreviewError::NoClip)
    }

    pub fn start(&mut self) -> Result<(), PreviewError> {
        if self.previewing {
            return Ok(());
        }
        self.validate()?;
        self.previewing = true;
        self.host.start_animation_mode();
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.previewing {
            return;
        }
        self.host.enforce_rest_pose();
        self.previewing = false;
        self.host.stop_animation_mode();
        self.release_graph();
    }

    /// Sample the pose for the current frame. No-op unless previewing.
    pub fn refresh(&mut self) -> Result<(), PreviewError> {
        if !self.previewing {
            return Ok(());
        }
        let plan = self.plan()?;
        self.release_graph();
        match plan {
            Plan::Clip(clip) => {
                self.preview_time = self.normalized_time * clip.length_s;
                self.host.sample_clip(&clip, self.preview_time);
            }
            Plan::Blend(inputs) => {
                let handle = self.host.create_graph(&self.config.preview_graph_name);
                let graph = self.graph.insert(PreviewGraph { handle, inputs });
                self.host.sample_graph(graph, self.normalized_time);
            }
        }
        Ok(())
    }

    fn plan(&self) -> Result<Plan, PreviewError> {
        let ctrl = self.host.controller().map_err(|e| {
            log::info!("preview unavailable: {e}");
            e
        })?;
        let state = ctrl
            .find_state(self.behaviour)
            .ok_or(PreviewError::StateNotFound)?;
        match state.motion.as_ref() {
            Some(Motion::Clip(clip)) => Ok(Plan::Clip(clip.clone())),
            Some(Motion::BlendTree(tree)) => {
                let weights = reconstruct_weights(
                    tree,
                    self.normalized_time,
                    self.host.blend_parameters(),
                    &self.config,
                );
                let inputs = tree
                    .children
                    .iter()
                    .zip(weights)
                    .filter_map(|(child, weight)| match first_clip(&child.motion) {
                        Some(clip) => Some(MixerInput {
                            clip: clip.clone(),
                            weight,
                        }),
                        None => {
                            log::debug!("skipping blend child without a clip in '{}'", tree.name);
                            None
                        }
                    })
                    .collect();
                Ok(Plan::Blend(inputs))
            }
            None => Err(PreviewError::NoClip),
        }
    }

    fn release_graph(&mut self) {
        if let Some(graph) = self.graph.take() {
            self.host.destroy_graph(graph.handle);
        }
    }
}

impl<H: PreviewHost> Drop for PreviewSession<'_, H> {
    fn drop(&mut self) {
        self.release_graph();
        if self.previewing {
            self.previewing = false;
            self.host.stop_animation_mode();
        }
    }
}
