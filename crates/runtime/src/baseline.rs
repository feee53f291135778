//! Default creature behavior the decision pipeline falls through to.

use creature_core::{Action, BaselineBehavior, DecisionContext};
use tracing::debug;

/// Closes in on the detected target and fights it.
///
/// Each tick, in order: throw a ranged spell if one is worth it, touch or
/// strike when within reach, otherwise walk toward where the target was
/// last seen.
#[derive(Debug, Clone, Copy)]
pub struct ChaseAndStrike {
    /// Distance at which melee and touch spells connect.
    pub reach: f32,
}

impl Default for ChaseAndStrike {
    fn default() -> Self {
        Self { reach: 2.25 }
    }
}

impl BaselineBehavior for ChaseAndStrike {
    fn take_action(&self, ctx: &mut DecisionContext<'_>) {
        if !ctx.agent.can_act() || ctx.agent.is_busy() || !ctx.agent.hostile {
            return;
        }
        let Some(target) = ctx.detected_target() else {
            return;
        };
        let target_id = target.id;
        let distance = ctx.agent.distance_to(target);

        if distance > self.reach
            && ctx.can_cast_ranged_spell(target_id)
            && ctx.cast_selected(target_id).is_ok()
        {
            return;
        }

        if distance <= self.reach {
            if ctx.can_cast_touch_spell(target_id) && ctx.cast_selected(target_id).is_ok() {
                return;
            }
            debug!(agent = %ctx.agent.id, target = %target_id, "melee");
            if let Some(motor) = ctx.agent.motor.as_mut() {
                motor.playing_one_shot = true;
            }
            ctx.emit(Action::Melee { target: target_id });
            return;
        }

        let destination = ctx
            .agent
            .mind
            .perception
            .last_known
            .unwrap_or(target.position);
        ctx.emit(Action::MoveToward { destination });
    }
}
