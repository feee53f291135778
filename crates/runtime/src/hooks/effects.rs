//! Hooks for the non-damaging side of a spell.

use creature_core::magic::EffectKey;
use creature_core::state::{Conditions, Tolerance};
use creature_core::{Agent, Roster};
use tracing::{debug, info};

use super::{ActionHook, HookContext, HookError};

/// Instant benefits: healing, cures and free action.
#[derive(Debug, Clone, Copy)]
pub struct RestorationHook;

impl RestorationHook {
    fn restores(key: EffectKey) -> bool {
        matches!(
            key,
            EffectKey::HealHealth
                | EffectKey::HealHealthArea
                | EffectKey::FreeAction
                | EffectKey::CurePoison
                | EffectKey::CureDisease
        )
    }

    fn restore(agent: &mut Agent, key: EffectKey, magnitude: u32) {
        match key {
            EffectKey::HealHealth | EffectKey::HealHealthArea => agent.health.restore(magnitude),
            EffectKey::FreeAction => agent.conditions.remove(Conditions::PARALYZED),
            EffectKey::CurePoison => agent.conditions.remove(Conditions::POISONED),
            EffectKey::CureDisease => agent.conditions.remove(Conditions::DISEASED),
            _ => {}
        }
    }
}

impl ActionHook for RestorationHook {
    fn name(&self) -> &'static str {
        "restoration"
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        ctx.spell()
            .is_some_and(|spell| spell.effects.iter().copied().any(Self::restores))
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        let Some(spell) = ctx.spell() else {
            return Ok(());
        };
        for key in spell.effects.iter().copied().filter(|&k| Self::restores(k)) {
            for id in ctx.affected_by(key, roster) {
                if let Some(agent) = roster.get_mut(id) {
                    Self::restore(agent, key, spell.magnitude);
                    debug!(caster = %ctx.actor, recipient = %id, effect = %key, health = agent.health.current, "restored");
                }
            }
        }
        Ok(())
    }
}

/// Effects with a duration: concealment, levitation, slowfall, light,
/// paralysis and the rest. Each recipient gets a timed entry and the
/// matching condition flag; the runtime drops both on expiry.
#[derive(Debug, Clone, Copy)]
pub struct TimedEffectHook;

impl TimedEffectHook {
    fn resists(agent: &Agent, key: EffectKey) -> bool {
        match key {
            EffectKey::Paralyze => agent.career.tolerances.paralysis == Tolerance::Immune,
            _ => false,
        }
    }
}

impl ActionHook for TimedEffectHook {
    fn name(&self) -> &'static str {
        "timed_effect"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        ctx.spell().is_some_and(|spell| spell.duration > 0.0)
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        let Some(spell) = ctx.spell() else {
            return Ok(());
        };
        let expires_at = ctx.time.now + f64::from(spell.duration);

        for &key in &spell.effects {
            for id in ctx.affected_by(key, roster) {
                let Some(agent) = roster.get_mut(id) else {
                    continue;
                };
                if Self::resists(agent, key) {
                    debug!(recipient = %id, effect = %key, "resisted");
                    continue;
                }
                agent.effects.add(key, expires_at);
                agent.conditions.insert(key.condition());
                if key == EffectKey::Levitate {
                    if let Some(motor) = agent.motor.as_mut() {
                        motor.levitating = true;
                    }
                }
                info!(caster = %ctx.actor, recipient = %id, effect = %key, until = expires_at, "effect applied");
            }
        }
        Ok(())
    }
}
