//! Timed trigger: fires at a normalized playback time.
//!
//! The decision logic lives on [`TriggerRuntimeState`] so it can be driven and
//! tested without any callbacks; [`TimedTrigger`] wires it to a trigger list.
//!
//! Regimes:
//! - `trigger_time <= 0`: fires on enter. A looping state fires it again on the
//!   first update past each later loop seam, like any threshold below one, so
//!   it is not once-per-activation unless `once` is set.
//! - `0 < trigger_time < 1`: fires on the first update of each loop iteration
//!   whose iteration time reaches the threshold.
//! - `trigger_time >= 1`: fires on the update that observes a newly completed
//!   iteration, with a fallback on exit when the boundary was not observed.

use crate::behaviour::{StateInfo, StateMachineBehaviour};
use crate::config::TimedTriggerConfig;
use crate::error::TriggerError;
use crate::trigger::TriggerList;

/// Mutable per-activation state. Reset on every enter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerRuntimeState {
    /// Fired within the iteration already credited by `triggered_count`.
    pub has_triggered: bool,
    /// Loop iterations credited with a fire during the current activation.
    pub triggered_count: u32,
}

impl TriggerRuntimeState {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn fires_on_enter(&self, cfg: &TimedTriggerConfig) -> bool {
        cfg.trigger_time <= 0.0
    }

    /// Decide whether this update tick fires.
    ///
    /// Clears `has_triggered` once playback has moved past the credited
    /// iteration, so a looping state can fire again.
    pub fn fires_on_update(&mut self, cfg: &TimedTriggerConfig, info: &StateInfo) -> bool {
        if cfg.once && self.has_triggered {
            return false;
        }

        let total = info.normalized_time;
        let iteration_time = info.iteration_time();
        let iterations_completed = info.iterations_completed();
        let credited = self.triggered_count as f32;

        if self.has_triggered {
            if total <= credited {
                return false;
            }
            self.has_triggered = false;
        }

        if cfg.trigger_time >= 1.0 {
            iterations_completed > credited
        } else {
            iteration_time >= cfg.trigger_time
        }
    }

    /// Exit fallback for boundary triggers: fire when the loop seam was crossed
    /// without an update observing it, or when the next tick would cross it.
    pub fn fires_on_exit(&self, cfg: &TimedTriggerConfig, info: &StateInfo) -> bool {
        if cfg.trigger_time < 1.0 || self.has_triggered {
            return false;
        }
        if info.iterations_completed() > self.triggered_count as f32 {
            return true;
        }
        info.iteration_time() + info.frame_delta >= 1.0
    }

    /// Credit a fire at `info`.
    ///
    /// The count advances by one and never lags behind the iteration that
    /// fired, so repeating a tick after a skipped loop cannot fire twice.
    pub fn record_fire(&mut self, cfg: &TimedTriggerConfig, info: &StateInfo) {
        let completed = info.iterations_completed();
        let credited = if cfg.trigger_time >= 1.0 {
            completed
        } else {
            completed + 1.0
        };
        self.has_triggered = true;
        self.triggered_count = self
            .triggered_count
            .saturating_add(1)
            .max(credited as u32);
    }
}

/// Behaviour firing its triggers at a configured normalized time.
pub struct TimedTrigger<C> {
    config: TimedTriggerConfig,
    triggers: TriggerList<C>,
    state: TriggerRuntimeState,
}

impl<C> TimedTrigger<C> {
    pub fn new(config: TimedTriggerConfig, triggers: TriggerList<C>) -> Self {
        Self {
            config,
            triggers,
            state: TriggerRuntimeState::default(),
        }
    }

    pub fn config(&self) -> &TimedTriggerConfig {
        &self.config
    }

    pub fn trigger_time(&self) -> f32 {
        self.config.trigger_time
    }

    pub fn state(&self) -> &TriggerRuntimeState {
        &self.state
    }

    pub fn triggers(&self) -> &TriggerList<C> {
        &self.triggers
    }

    /// Runtime state is only advanced when every trigger succeeded.
    fn fire(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        self.triggers.invoke_all(ctx)?;
        self.state.record_fire(&self.config, info);
        log::debug!(
            "timed trigger fired at t={} (threshold {}, count {})",
            info.normalized_time,
            self.config.trigger_time,
            self.state.triggered_count
        );
        Ok(())
    }
}

impl<C> std::fmt::Debug for TimedTrigger<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedTrigger")
            .field("config", &self.config)
            .field("triggers", &self.triggers)
            .field("state", &self.state)
            .finish()
    }
}

impl<C> StateMachineBehaviour<C> for TimedTrigger<C> {
    fn on_state_enter(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        self.state.reset();
        if self.state.fires_on_enter(&self.config) {
            self.fire(ctx, info)?;
        }
        Ok(())
    }

    fn on_state_update(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        if self.state.fires_on_update(&self.config, info) {
            self.fire(ctx, info)?;
        }
        Ok(())
    }

    fn on_state_exit(&mut self, ctx: &mut C, info: &StateInfo) -> Result<(), TriggerError> {
        if self.state.fires_on_exit(&self.config, info) {
            self.fire(ctx, info)?;
        }
        Ok(())
    }
}
