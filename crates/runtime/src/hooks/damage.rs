//! Hooks that hurt agents and notice when they die.

use creature_core::magic::EffectKey;
use creature_core::state::Tolerance;
use creature_core::{Action, Roster};
use glam::Vec3;
use tracing::{debug, info};

use super::{ActionHook, HookContext, HookError};

/// Applies melee hits and damaging spells, then chains to the death check.
#[derive(Debug, Clone, Copy)]
pub struct DamageHook {
    pub melee_damage: u32,
}

impl Default for DamageHook {
    fn default() -> Self {
        Self { melee_damage: 8 }
    }
}

impl DamageHook {
    fn damages(key: EffectKey) -> bool {
        matches!(key, EffectKey::DamageHealth | EffectKey::ContinuousDamageHealth)
    }

    fn scaled(amount: u32, tolerance: Tolerance) -> u32 {
        match tolerance {
            Tolerance::Normal => amount,
            Tolerance::Immune => 0,
            Tolerance::Resistant => amount / 2,
            Tolerance::LowTolerance => amount + amount / 2,
            Tolerance::CriticalWeakness => amount * 2,
        }
    }
}

impl ActionHook for DamageHook {
    fn name(&self) -> &'static str {
        "damage"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        match ctx.action {
            Action::Melee { .. } => true,
            Action::Cast { spell, .. } => spell.effects.iter().copied().any(Self::damages),
            _ => false,
        }
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        match ctx.action {
            Action::Melee { target } => {
                let victim = roster
                    .get_mut(*target)
                    .filter(|a| a.is_alive())
                    .ok_or(HookError::UnknownTarget(*target))?;
                victim.health.spend(self.melee_damage);
                debug!(attacker = %ctx.actor, victim = %target, damage = self.melee_damage, health = victim.health.current, "melee hit");
            }
            Action::Cast { spell, .. } => {
                let Some(key) = spell.effects.iter().copied().find(|&k| Self::damages(k)) else {
                    return Ok(());
                };
                for id in ctx.affected_by(key, roster) {
                    if id == ctx.actor {
                        continue;
                    }
                    let Some(victim) = roster.get_mut(id) else {
                        continue;
                    };
                    let tolerance = victim.career.tolerances.for_element(spell.element);
                    let damage = Self::scaled(spell.magnitude, tolerance);
                    victim.health.spend(damage);
                    debug!(caster = %ctx.actor, victim = %id, spell = %spell.name, damage, health = victim.health.current, "spell hit");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn next_hook_names(&self) -> &[&'static str] {
        &["death_check"]
    }
}

/// Stops agents whose health ran out. Lookup-only: runs when chained.
#[derive(Debug, Clone, Copy)]
pub struct DeathCheckHook;

impl ActionHook for DeathCheckHook {
    fn name(&self) -> &'static str {
        "death_check"
    }

    fn should_trigger(&self, _ctx: &HookContext<'_>, roster: &Roster) -> bool {
        roster
            .iter()
            .any(|a| !a.is_alive() && a.motor.is_some_and(|m| m.can_act))
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        for agent in roster.iter_mut().filter(|a| !a.is_alive()) {
            let Some(motor) = agent.motor.as_mut().filter(|m| m.can_act) else {
                continue;
            };
            motor.can_act = false;
            motor.velocity = Vec3::ZERO;
            agent.mind.perception.forget();
            info!(agent = %agent.id, killer = %ctx.actor, "slain");
        }
        Ok(())
    }
}
