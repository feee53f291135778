//! The gate every spell attempt passes through.
//!
//! The gate decides whether and which spell is submitted. Deducting magicka
//! and applying effects belong to the host, which receives an
//! [`Action::Cast`].

use tracing::debug;

use super::{Action, DecisionContext};
use crate::error::{AiError, ErrorSeverity};
use crate::magic::{Spell, SpellRole};
use crate::state::{Agent, Conditions, EntityId};

/// Why a cast attempt was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("no magicka left")]
    NoMagicka,

    #[error("an uninterruptible animation is playing")]
    Busy,

    #[error("no usable spell")]
    NoSpell,

    #[error("silenced")]
    Silenced,
}

impl AiError for CastError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoMagicka => "CAST_NO_MAGICKA",
            Self::Busy => "CAST_BUSY",
            Self::NoSpell => "CAST_NO_SPELL",
            Self::Silenced => "CAST_SILENCED",
        }
    }
}

/// Checks the agent-side preconditions, in order: magicka, animation,
/// spell, silence. Paralysis is not checked; free action is cast while
/// paralyzed.
pub fn check(agent: &Agent, spell: Option<&Spell>) -> Result<(), CastError> {
    if agent.magicka.current == 0 {
        return Err(CastError::NoMagicka);
    }
    if agent.is_busy() {
        return Err(CastError::Busy);
    }
    if spell.is_none_or(Spell::is_inert) {
        return Err(CastError::NoSpell);
    }
    if agent.conditions.contains(Conditions::SILENCED) {
        return Err(CastError::Silenced);
    }
    Ok(())
}

impl DecisionContext<'_> {
    /// Casts a random spell from `role`'s bucket.
    pub fn cast_role(&mut self, role: SpellRole, target: Option<EntityId>) -> Result<(), CastError> {
        let mind = &mut self.agent.mind;
        let spell = mind.spellbook.pick(role, &mut mind.rng).cloned();
        self.cast_spell(spell, target)
    }

    /// Casts a specific spell, or reports [`CastError::NoSpell`] for `None`.
    pub fn cast_spell(&mut self, spell: Option<Spell>, target: Option<EntityId>) -> Result<(), CastError> {
        check(self.agent, spell.as_ref())?;
        let Some(spell) = spell else {
            return Err(CastError::NoSpell);
        };

        debug!(agent = %self.agent.id, spell = %spell.name, ?target, "casting");
        if let Some(motor) = self.agent.motor.as_mut() {
            motor.casting = true;
            motor.playing_one_shot = true;
        }
        self.emit(Action::Cast { spell, target });
        Ok(())
    }

    /// Casts whatever the ranged or touch callback left in `selected_spell`.
    pub fn cast_selected(&mut self, target: EntityId) -> Result<(), CastError> {
        let spell = self.agent.mind.selected_spell.take();
        let target = spell
            .as_ref()
            .filter(|s| !s.target.is_caster_centered())
            .map(|_| target);
        self.cast_spell(spell, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{EffectKey, Element, TargetType};
    use crate::state::{AgentKind, ResourceMeter, SpeciesId, Team};

    fn caster() -> Agent {
        let mut a = Agent::new(EntityId(5), AgentKind::Class, SpeciesId::MAGE, Team::KnightsAndMages);
        a.magicka = ResourceMeter::full(80);
        a
    }

    fn fireball() -> Spell {
        Spell::new("Fireball", TargetType::SingleTargetAtRange, Element::Fire, EffectKey::DamageHealth)
    }

    #[test]
    fn empty_pool_fails_first() {
        let mut a = caster();
        a.magicka.current = 0;
        a.conditions |= Conditions::SILENCED;
        assert_eq!(check(&a, Some(&fireball())), Err(CastError::NoMagicka));
    }

    #[test]
    fn gate_order_is_animation_spell_silence() {
        let mut a = caster();
        a.conditions |= Conditions::SILENCED;
        if let Some(m) = a.motor.as_mut() {
            m.playing_one_shot = true;
        }
        assert_eq!(check(&a, None), Err(CastError::Busy));

        if let Some(m) = a.motor.as_mut() {
            m.playing_one_shot = false;
        }
        assert_eq!(check(&a, Some(&Spell::inert())), Err(CastError::NoSpell));
        assert_eq!(check(&a, Some(&fireball())), Err(CastError::Silenced));
    }

    #[test]
    fn paralysis_does_not_block_casting() {
        let mut a = caster();
        a.conditions |= Conditions::PARALYZED;
        assert_eq!(check(&a, Some(&fireball())), Ok(()));
    }

    #[test]
    fn motorless_agent_counts_as_busy() {
        let mut a = caster();
        a.motor = None;
        assert_eq!(check(&a, Some(&fireball())), Err(CastError::Busy));
        assert_eq!(CastError::Busy.error_code(), "CAST_BUSY");
    }
}
