//! Hooks for walking and giving up.

use creature_core::{Action, PhysicsOracle, Roster};
use glam::Vec3;
use tracing::{debug, info};

use super::{ActionHook, HookContext, HookCriticality, HookError};

/// Walks the actor toward a destination on the ground plane.
///
/// Walls stop the move and raise the motor's obstacle flag, which the
/// levitate step reads on a later tick.
#[derive(Debug, Clone, Copy)]
pub struct MovementHook {
    /// Units per second.
    pub speed: f32,
    /// Distance at which the walker counts as arrived.
    pub stop_distance: f32,
    /// Body radius used for the wall sweep.
    pub radius: f32,
}

impl Default for MovementHook {
    fn default() -> Self {
        Self {
            speed: 4.0,
            stop_distance: 1.5,
            radius: 0.3,
        }
    }
}

impl ActionHook for MovementHook {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        matches!(ctx.action, Action::MoveToward { .. })
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        let Action::MoveToward { destination } = ctx.action else {
            return Ok(());
        };
        let physics = ctx.oracles.physics();
        let agent = roster
            .get_mut(ctx.actor)
            .ok_or(HookError::UnknownActor(ctx.actor))?;
        if !agent.can_act() {
            return Ok(());
        }
        let Some(motor) = agent.motor.as_mut() else {
            return Ok(());
        };

        let mut offset = *destination - agent.position;
        offset.y = 0.0;
        let remaining = offset.length() - self.stop_distance;
        if remaining <= 0.0 {
            motor.velocity = Vec3::ZERO;
            return Ok(());
        }
        let direction = offset / offset.length();
        let step = (self.speed * ctx.time.delta).min(remaining);
        let mut next = agent.position + direction * step;

        let waist = Vec3::Y * (motor.height / 2.0);
        if !physics.sweep_clear(agent.position + waist, next + waist, self.radius) {
            motor.obstacle_detected = true;
            motor.velocity = Vec3::ZERO;
            debug!(agent = %ctx.actor, "blocked by a wall");
            return Ok(());
        }
        motor.obstacle_detected = false;

        if !motor.levitating {
            let above = next + Vec3::Y * ctx.config.max_step_height;
            next.y = physics.ground_height(above).unwrap_or(agent.position.y);
            motor.last_grounded_y = next.y;
        }
        motor.velocity = direction * self.speed;
        agent.facing = direction;
        agent.position = next;
        Ok(())
    }
}

/// Stops a creature that gave up the fight.
#[derive(Debug, Clone, Copy)]
pub struct SurrenderHook;

impl ActionHook for SurrenderHook {
    fn name(&self) -> &'static str {
        "surrender"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        matches!(ctx.action, Action::Surrender)
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        let agent = roster
            .get_mut(ctx.actor)
            .ok_or(HookError::UnknownActor(ctx.actor))?;
        if let Some(motor) = agent.motor.as_mut() {
            motor.velocity = Vec3::ZERO;
        }
        agent.mind.perception.forget();
        info!(agent = %ctx.actor, health = agent.health.current, "stood down");
        Ok(())
    }
}
