//! Core configuration for vizij-trigger-core.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables shared by the blend reconstructor and the preview session.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Added to child distances in freeform 2-D weight reconstruction.
    pub freeform_epsilon: f32,
    /// Name given to offline preview graphs created by the host.
    pub preview_graph_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            freeform_epsilon: 0.001,
            preview_graph_name: "BlendTreePreviewGraph".to_string(),
        }
    }
}

/// Immutable configuration of a timed trigger behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedTriggerConfig {
    /// Normalized fire threshold in [0, 1].
    pub trigger_time: f32,
    /// Fire only the first time the threshold is crossed per activation.
    #[serde(default)]
    pub once: bool,
}

impl TimedTriggerConfig {
    pub fn new(trigger_time: f32, once: bool) -> Self {
        Self { trigger_time, once }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.trigger_time.is_finite() || !(0.0..=1.0).contains(&self.trigger_time) {
            return Err(ConfigError::TriggerTimeOutOfRange(self.trigger_time));
        }
        Ok(())
    }
}

impl Default for TimedTriggerConfig {
    fn default() -> Self {
        Self {
            trigger_time: 0.0,
            once: false,
        }
    }
}

/// Configuration of a transition trigger behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTriggerConfig {
    #[serde(default)]
    pub on_enter: bool,
    #[serde(default)]
    pub on_exit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_time_range_is_enforced() {
        assert!(TimedTriggerConfig::new(0.0, false).validate().is_ok());
        assert!(TimedTriggerConfig::new(1.0, true).validate().is_ok());
        assert!(TimedTriggerConfig::new(1.5, false).validate().is_err());
        assert!(TimedTriggerConfig::new(-0.1, false).validate().is_err());
        assert!(TimedTriggerConfig::new(f32::NAN, false).validate().is_err());
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: Config = serde_json::from_str(r#"{ "freeform_epsilon": 0.01 }"#).unwrap();
        assert_eq!(cfg.freeform_epsilon, 0.01);
        assert_eq!(cfg.preview_graph_name, "BlendTreePreviewGraph");
    }
}
