use std::collections::{HashMap, HashSet};

use serde_json::json;
use vizij_trigger_core::{
    AnimatorController, BehaviourId, BlendParameters, Clip, Config, GraphHandle, PreviewError,
    Motion, PreviewGraph, PreviewHost, PreviewSession,
};

/// Editor stand-in that records every call made by the session.
#[derive(Default)]
struct MockEditor {
    controller: Option<AnimatorController>,
    params: HashMap<String, f32>,
    animation_mode: bool,
    next_graph: u32,
    live_graphs: HashSet<GraphHandle>,
    graphs_created: u32,
    clip_samples: Vec<(String, f32)>,
    graph_samples: Vec<(Vec<(String, f32)>, f32)>,
    rest_poses: u32,
}

impl PreviewHost for MockEditor {
    fn controller(&self) -> Result<&AnimatorController, PreviewError> {
        self.controller.as_ref().ok_or(PreviewError::NoController)
    }
    fn blend_parameters(&self) -> &dyn BlendParameters {
        &self.params
    }
    fn start_animation_mode(&mut self) {
        self.animation_mode = true;
    }
    fn stop_animation_mode(&mut self) {
        self.animation_mode = false;
    }
    fn sample_clip(&mut self, clip: &Clip, time_s: f32) {
        self.clip_samples.push((clip.name.clone(), time_s));
    }
    fn create_graph(&mut self, name: &str) -> GraphHandle {
        assert_eq!(name, "BlendTreePreviewGraph");
        let h = GraphHandle(self.next_graph);
        self.next_graph += 1;
        self.graphs_created += 1;
        self.live_graphs.insert(h);
        h
    }
    fn destroy_graph(&mut self, handle: GraphHandle) {
        assert!(self.live_graphs.remove(&handle), "double destroy");
    }
    fn sample_graph(&mut self, graph: &PreviewGraph, normalized_time: f32) {
        assert!(self.live_graphs.contains(&graph.handle));
        let inputs = graph
            .inputs
            .iter()
            .map(|i| (i.clip.name.clone(), i.weight))
            .collect();
        self.graph_samples.push((inputs, normalized_time));
    }
    fn enforce_rest_pose(&mut self) {
        self.rest_poses += 1;
    }
}

fn controller() -> AnimatorController {
    serde_json::from_value(json!({
        "name": "Hero",
        "layers": [{
            "name": "Base",
            "state_machine": {
                "name": "Base",
                "states": [
                    { "name": "Jump", "behaviours": [1],
                      "motion": { "type": "clip", "name": "Jump", "length": 2.0 } },
                    { "name": "Empty", "behaviours": [5] },
                    { "name": "Hollow", "behaviours": [6],
                      "motion": { "type": "blend_tree", "name": "Nothing", "blend_type": "simple_1d" } }
                ],
                "state_machines": [{
                    "name": "Locomotion",
                    "states": [{
                        "name": "Move", "behaviours": [2],
                        "motion": {
                            "type": "blend_tree", "name": "Speed", "blend_type": "simple_1d",
                            "blend_parameter": "speed",
                            "children": [
                                { "threshold": 0.0, "motion": { "type": "clip", "name": "Idle", "length": 1.0 } },
                                { "threshold": 0.5, "motion": { "type": "clip", "name": "Walk", "length": 1.0 } },
                                { "threshold": 1.0, "motion": { "type": "clip", "name": "Run", "length": 1.0 } }
                            ]
                        }
                    }]
                }]
            }
        }]
    }))
    .unwrap()
}

fn editor() -> MockEditor {
    MockEditor {
        controller: Some(controller()),
        ..MockEditor::default()
    }
}

#[test]
fn clip_state_samples_at_trigger_time_in_seconds() {
    let mut host = editor();
    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(1), 0.25, Config::default());
        session.validate().unwrap();
        // not previewing yet: refresh does nothing
        session.refresh().unwrap();
        assert!(session.host().clip_samples.is_empty());

        session.start().unwrap();
        assert!(session.is_previewing());
        session.refresh().unwrap();
        assert_eq!(session.preview_time(), 0.5);
        session.stop();
        assert!(!session.is_previewing());
    }
    assert_eq!(host.clip_samples, vec![("Jump".to_string(), 0.5)]);
    assert_eq!(host.rest_poses, 1);
    assert!(!host.animation_mode);
}

#[test]
fn blend_state_samples_reconstructed_graph() {
    let mut host = editor();
    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(2), 0.25, Config::default());
        session.start().unwrap();
        session.refresh().unwrap();
        let graph = session.graph().expect("live graph");
        let weights: Vec<f32> = graph.inputs.iter().map(|i| i.weight).collect();
        assert_eq!(weights, vec![0.5, 0.5, 0.0]);
    }
    let (inputs, t) = &host.graph_samples[0];
    assert_eq!(*t, 0.25);
    assert_eq!(inputs[0].0, "Idle");
}

#[test]
fn graphs_are_released_on_every_exit_path() {
    let mut host = editor();
    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(2), 0.8, Config::default());
        session.start().unwrap();
        for _ in 0..5 {
            session.refresh().unwrap();
        }
        // dropped while still previewing
    }
    assert_eq!(host.graphs_created, 5);
    assert!(host.live_graphs.is_empty());
    assert!(!host.animation_mode);

    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(2), 0.8, Config::default());
        session.start().unwrap();
        session.refresh().unwrap();
        session.stop();
        assert!(session.graph().is_none());
    }
    assert!(host.live_graphs.is_empty());
}

#[test]
fn switching_blend_state_to_clip_releases_graph() {
    let mut host = editor();
    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(2), 0.5, Config::default());
        session.start().unwrap();
        session.refresh().unwrap();
        assert_eq!(session.host().live_graphs.len(), 1);

        let ctrl = session.host_mut().controller.as_mut().unwrap();
        ctrl.layers[0].state_machine.state_machines[0].states[0].motion = Some(Motion::Clip(Clip {
            name: "Stride".into(),
            length_s: 4.0,
        }));
        session.refresh().unwrap();
        assert!(session.graph().is_none());
        assert!(session.host().live_graphs.is_empty());
        assert_eq!(session.preview_time(), 2.0);
    }
    assert_eq!(host.graphs_created, 1);
    assert_eq!(host.clip_samples, vec![("Stride".to_string(), 2.0)]);
}

#[test]
fn configuration_absence_is_reported_not_fatal() {
    let mut host = editor();
    {
        let session = PreviewSession::new(&mut host, BehaviourId(99), 0.5, Config::default());
        assert_eq!(session.validate(), Err(PreviewError::StateNotFound));
    }
    {
        let mut session = PreviewSession::new(&mut host, BehaviourId(5), 0.5, Config::default());
        assert_eq!(session.start(), Err(PreviewError::NoClip));
        assert!(!session.is_previewing());
    }
    {
        let session = PreviewSession::new(&mut host, BehaviourId(6), 0.5, Config::default());
        assert_eq!(session.validate(), Err(PreviewError::NoClip));
    }
    assert!(!host.animation_mode);

    let mut no_ctrl = MockEditor::default();
    let mut session = PreviewSession::new(&mut no_ctrl, BehaviourId(1), 0.5, Config::default());
    assert_eq!(session.start(), Err(PreviewError::NoController));
    assert_eq!(
        PreviewError::NoController.to_string(),
        "The selected animator does not have a valid animator controller."
    );
}
