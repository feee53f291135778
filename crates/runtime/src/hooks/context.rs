//! Execution context provided to hooks during evaluation.

use creature_core::magic::{EffectKey, Relation, Spell, TargetType, relation};
use creature_core::{Action, AiConfig, AiError, EntityId, ErrorSeverity, GameTime, Roster};
use thiserror::Error;

use crate::oracle::OracleManager;

/// Why a hook could not apply an action.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum HookError {
    #[error("acting agent {0} is not in the roster")]
    UnknownActor(EntityId),

    #[error("target {0} is gone")]
    UnknownTarget(EntityId),

    #[error("spell costs {needed} magicka but only {available} is left")]
    InsufficientMagicka { needed: u32, available: u32 },
}

impl AiError for HookError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "HOOK_UNKNOWN_ACTOR",
            Self::UnknownTarget(_) => "HOOK_UNKNOWN_TARGET",
            Self::InsufficientMagicka { .. } => "HOOK_INSUFFICIENT_MAGICKA",
        }
    }
}

/// The action being applied, who emitted it, and when.
pub struct HookContext<'a> {
    pub actor: EntityId,
    pub action: &'a Action,
    pub time: GameTime,
    pub config: &'a AiConfig,
    pub oracles: &'a OracleManager,
}

impl<'a> HookContext<'a> {
    pub fn new(
        actor: EntityId,
        action: &'a Action,
        time: GameTime,
        config: &'a AiConfig,
        oracles: &'a OracleManager,
    ) -> Self {
        Self {
            actor,
            action,
            time,
            config,
            oracles,
        }
    }

    /// The spell being released, for cast actions.
    pub fn spell(&self) -> Option<&'a Spell> {
        match self.action {
            Action::Cast { spell, .. } => Some(spell),
            _ => None,
        }
    }

    /// Living agents a cast lands on, in id order.
    ///
    /// Caster-centered spells land on the caster, aimed spells on their
    /// target, area spells on everyone within the area radius.
    pub fn recipients(&self, roster: &Roster) -> Vec<EntityId> {
        let Action::Cast { spell, target } = self.action else {
            return Vec::new();
        };
        let Some(caster) = roster.living(self.actor) else {
            return Vec::new();
        };

        let center = match spell.target {
            TargetType::CasterOnly => return vec![caster.id],
            TargetType::ByTouch | TargetType::SingleTargetAtRange => {
                return target
                    .and_then(|id| roster.living(id))
                    .map(|a| vec![a.id])
                    .unwrap_or_default();
            }
            TargetType::AreaAroundCaster => caster.position,
            TargetType::AreaAtRange => target
                .and_then(|id| roster.living(id))
                .map_or(caster.position, |a| a.position),
        };
        roster
            .within(center, self.config.area_radius)
            .map(|a| a.id)
            .collect()
    }

    /// Recipients an effect actually touches: helpful effects reach the
    /// caster's friends, harmful ones everybody else.
    pub fn affected_by(&self, key: EffectKey, roster: &Roster) -> Vec<EntityId> {
        let Some(caster) = roster.get(self.actor) else {
            return Vec::new();
        };
        let Some(spell) = self.spell() else {
            return Vec::new();
        };

        self.recipients(roster)
            .into_iter()
            .filter(|&id| {
                if !spell.is_area() {
                    return true;
                }
                let friendly = id == caster.id
                    || roster
                        .get(id)
                        .is_some_and(|other| relation(caster, other) == Relation::Friend);
                friendly != is_harmful(key)
            })
            .collect()
    }
}

/// Effects that hurt whoever they land on.
pub fn is_harmful(key: EffectKey) -> bool {
    matches!(
        key,
        EffectKey::DamageHealth
            | EffectKey::ContinuousDamageHealth
            | EffectKey::Paralyze
            | EffectKey::Silence
    )
}
