//! Hook that pays for a spell before it lands.

use creature_core::Roster;
use tracing::debug;

use super::{ActionHook, HookContext, HookCriticality, HookError};

/// Deducts the spell's cost from the caster's magicka.
///
/// The cast gate only checks that some magicka is left, so a spell can be
/// emitted that the caster cannot fully pay for. Such a cast fizzles: this
/// hook fails and, being critical, stops the spell from landing.
#[derive(Debug, Clone, Copy)]
pub struct SpellCostHook;

impl ActionHook for SpellCostHook {
    fn name(&self) -> &'static str {
        "spell_cost"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_trigger(&self, ctx: &HookContext<'_>, _roster: &Roster) -> bool {
        ctx.spell().is_some()
    }

    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        let Some(spell) = ctx.spell() else {
            return Ok(());
        };
        let caster = roster
            .get_mut(ctx.actor)
            .ok_or(HookError::UnknownActor(ctx.actor))?;

        let available = caster.magicka.current;
        if available < spell.cost {
            return Err(HookError::InsufficientMagicka {
                needed: spell.cost,
                available,
            });
        }
        caster.magicka.spend(spell.cost);
        debug!(agent = %ctx.actor, spell = %spell.name, cost = spell.cost, left = caster.magicka.current, "magicka spent");
        Ok(())
    }
}
