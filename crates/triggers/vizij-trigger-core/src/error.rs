//! Error types for trigger invocation, configuration loading and preview.

use thiserror::Error;

/// A trigger callback failed while a behaviour was firing.
///
/// The core never recovers from these; they are returned to whoever drives the
/// state callbacks.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("trigger '{trigger}' failed: {source}")]
    Invoke {
        trigger: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors produced while building behaviours from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trigger_time must be finite and within [0, 1], got {0}")]
    TriggerTimeOutOfRange(f32),
    #[error("unknown trigger kind '{0}'")]
    UnknownTriggerKind(String),
    #[error("invalid params for trigger '{kind}': {source}")]
    TriggerParams {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("behaviour json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Informational conditions reported by the editor previewer.
///
/// None of these are fatal; the preview tool shows the message and stays idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("Please select an object with an animator to preview.")]
    NoSelection,
    #[error("The selected object does not have an animator.")]
    NoAnimator,
    #[error("The selected animator does not have a valid animator controller.")]
    NoController,
    #[error("No state in the animator controller owns this behaviour.")]
    StateNotFound,
    #[error("No valid animation clip found for the current state.")]
    NoClip,
}
