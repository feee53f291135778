//! Guessing what a spell would do to a particular creature.
//!
//! Creatures do not know each other's resistances. A creature passes an
//! intelligence roll to reason about the real tolerance; otherwise it guesses
//! immunity on a coin flip. Dim creatures therefore waste spells on immune
//! targets and skip ones that would have worked.

use super::{EffectKey, Spell};
use crate::env::AgentRng;
use crate::state::{Agent, AgentKind, Team, Tolerance};

/// Standing of one agent toward another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Relation {
    Friend,
    Opponent,
    /// Neither side: a pacified creature, or anyone when the observer has
    /// surrendered.
    Bystander,
}

/// Outcome of landing a spell on a candidate target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TargetEffect {
    /// Hurts an opponent.
    Harmful,
    /// Lands on a friend.
    Beneficial,
    /// Wasted: immune target or a bystander.
    Neutral,
}

/// The parts of an agent that decide who it fights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing {
    pub kind: AgentKind,
    pub team: Team,
    pub hostile: bool,
}

impl Standing {
    pub fn of(agent: &Agent) -> Self {
        Self {
            kind: agent.kind,
            team: agent.team,
            hostile: agent.hostile,
        }
    }

    /// How this side regards `other`.
    pub fn toward(&self, other: &Agent) -> Relation {
        let ally = self.team == Team::PlayerAlly;

        if other.kind == AgentKind::Player {
            return if ally {
                Relation::Friend
            } else if self.hostile {
                Relation::Opponent
            } else {
                Relation::Bystander
            };
        }

        if other.team == self.team {
            return Relation::Friend;
        }

        if self.kind == AgentKind::Player {
            return if other.team == Team::PlayerAlly {
                Relation::Friend
            } else if other.hostile {
                Relation::Opponent
            } else {
                Relation::Bystander
            };
        }

        // Player allies only fight creatures still hostile to the player, and
        // a surrendered creature stops fighting the player's side.
        if ally {
            return if other.hostile {
                Relation::Opponent
            } else {
                Relation::Bystander
            };
        }
        if other.team == Team::PlayerAlly && !self.hostile {
            return Relation::Bystander;
        }

        Relation::Opponent
    }
}

/// The observer's view of `other`.
pub fn relation(observer: &Agent, other: &Agent) -> Relation {
    Standing::of(observer).toward(other)
}

/// Judges targets on behalf of a caster.
///
/// Holds a copy of what it needs from the caster, so the caster's own random
/// stream can be borrowed mutably while judging.
#[derive(Clone, Copy, Debug)]
pub struct TargetEffectAnalyzer {
    standing: Standing,
    intelligence: u32,
}

impl TargetEffectAnalyzer {
    pub fn new(observer: &Agent) -> Self {
        Self {
            standing: Standing::of(observer),
            intelligence: observer.attributes.intelligence,
        }
    }

    /// Estimates what `spell` does to `target`.
    pub fn analyze(&self, rng: &mut AgentRng, target: &Agent, spell: &Spell) -> TargetEffect {
        match self.standing.toward(target) {
            Relation::Bystander => TargetEffect::Neutral,
            Relation::Opponent if !self.believes_immune(rng, target, spell) => {
                TargetEffect::Harmful
            }
            Relation::Friend if !self.believes_immune(rng, target, spell) => {
                TargetEffect::Beneficial
            }
            _ => TargetEffect::Neutral,
        }
    }

    /// Whether the caster thinks `target` shrugs off `spell`.
    pub fn believes_immune(&self, rng: &mut AgentRng, target: &Agent, spell: &Spell) -> bool {
        if rng.success_roll(self.intelligence) {
            resisting_tolerance(target, spell) == Tolerance::Immune
        } else {
            rng.coin()
        }
    }
}

fn resisting_tolerance(target: &Agent, spell: &Spell) -> Tolerance {
    let tolerances = &target.career.tolerances;
    match spell.key() {
        Some(EffectKey::Paralyze) => tolerances.paralysis,
        _ => tolerances.for_element(spell.element),
    }
}
