use bevy::prelude::*;
use vizij_trigger_core::StateInfo;

use crate::components::{AnimatorStatePlayback, StateBehaviours};
use crate::resources::FixedDt;
use crate::{TriggerContext, TriggerFailed, TriggerFired};

/// Drive enter/update/exit for every entity with attached behaviours.
///
/// Per entity and frame exactly one callback runs: enter when the state turns
/// active, update (after advancing time by one tick) while it stays active,
/// exit when it turns inactive.
pub fn drive_state_behaviours_system(
    dt: Res<FixedDt>,
    mut q: Query<(Entity, &mut AnimatorStatePlayback, &mut StateBehaviours)>,
    mut fired: EventWriter<TriggerFired>,
    mut failed: EventWriter<TriggerFailed>,
) {
    for (entity, mut playback, mut behaviours) in q.iter_mut() {
        let frame_delta = playback.frame_delta(dt.0);
        let mut ctx = TriggerContext::new(entity);

        let result = match (playback.active, behaviours.entered) {
            (true, false) => {
                playback.normalized_time = 0.0;
                behaviours.entered = true;
                let info = state_info(&playback, frame_delta);
                behaviours.stack.enter(&mut ctx, &info)
            }
            (true, true) => {
                playback.normalized_time += frame_delta;
                let info = state_info(&playback, frame_delta);
                behaviours.stack.update(&mut ctx, &info)
            }
            (false, true) => {
                behaviours.entered = false;
                let info = state_info(&playback, frame_delta);
                behaviours.stack.exit(&mut ctx, &info)
            }
            (false, false) => Ok(()),
        };

        fired.send_batch(ctx.fired);
        if let Err(e) = result {
            log::error!("state behaviour failed on {entity:?}: {e}");
            failed.send(TriggerFailed {
                entity,
                message: e.to_string(),
            });
        }
    }
}

fn state_info(playback: &AnimatorStatePlayback, frame_delta: f32) -> StateInfo {
    StateInfo {
        normalized_time: playback.normalized_time,
        frame_delta,
        layer_index: playback.layer_index,
    }
}
