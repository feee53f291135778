//! Spell-readiness predicates the baseline behavior asks before attacking.
//!
//! On success the chosen spell is left in the agent's `selected_spell` for
//! [`DecisionContext::cast_selected`] to release.

use glam::Vec3;
use tracing::debug;

use super::DecisionContext;
use crate::magic::{Spell, SpellRole, TargetEffect, TargetEffectAnalyzer};
use crate::state::{Agent, EntityId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
    Ranged,
    Touch,
}

impl Delivery {
    fn roles(self) -> (SpellRole, SpellRole) {
        match self {
            Delivery::Ranged => (SpellRole::RangedArea, SpellRole::RangedSingle),
            Delivery::Touch => (SpellRole::TouchArea, SpellRole::TouchSingle),
        }
    }
}

impl DecisionContext<'_> {
    /// Is there a ranged spell worth throwing at `target` right now?
    pub fn can_cast_ranged_spell(&mut self, target: EntityId) -> bool {
        self.select_spell(target, Delivery::Ranged)
    }

    /// Is there a touch spell worth landing on `target` right now?
    pub fn can_cast_touch_spell(&mut self, target: EntityId) -> bool {
        self.select_spell(target, Delivery::Touch)
    }

    fn select_spell(&mut self, target: EntityId, delivery: Delivery) -> bool {
        self.agent.mind.selected_spell = None;
        if self.agent.magicka.current == 0 {
            return false;
        }
        let Some(target) = self.others.living(target) else {
            return false;
        };

        let Some(spell) = self.choose(target, delivery) else {
            return false;
        };
        if spell.key().is_some_and(|key| target.effects.has(key)) {
            return false;
        }
        if delivery == Delivery::Ranged && !self.throw_path_clear(target) {
            return false;
        }

        debug!(agent = %self.agent.id, target = %target.id, spell = %spell.name, "spell selected");
        self.agent.mind.selected_spell = Some(spell);
        true
    }

    /// An area spell when enough of its victims are enemies, otherwise a
    /// single-target spell the caster expects to hurt.
    fn choose(&mut self, target: &Agent, delivery: Delivery) -> Option<Spell> {
        let (area_role, single_role) = delivery.roles();
        let analyzer = TargetEffectAnalyzer::new(self.agent);
        let has_single = self.agent.mind.spellbook.has(single_role);

        let mind = &mut self.agent.mind;
        if let Some(area) = mind.spellbook.pick(area_role, &mut mind.rng).cloned() {
            let center = match delivery {
                Delivery::Ranged => target.position,
                Delivery::Touch => self.agent.position,
            };
            let mut tally = 0i32;
            for victim in self.others.within(center, self.senses.config.area_radius) {
                match analyzer.analyze(&mut self.agent.mind.rng, victim, &area) {
                    TargetEffect::Harmful => tally += 1,
                    TargetEffect::Beneficial => tally -= 1,
                    TargetEffect::Neutral => {}
                }
            }
            if tally >= 2 || (tally >= 1 && !has_single) {
                return Some(area);
            }
        }

        let mind = &mut self.agent.mind;
        let single = mind.spellbook.pick(single_role, &mut mind.rng).cloned()?;
        match analyzer.analyze(&mut self.agent.mind.rng, target, &single) {
            TargetEffect::Harmful => Some(single),
            _ => None,
        }
    }

    fn throw_path_clear(&self, target: &Agent) -> bool {
        let config = self.senses.config;
        let from = self.agent.eye();
        let aim = lead_point(from, target, config.ranged_spell_speed);
        if from.distance(aim) > config.ranged_spell_range {
            return false;
        }
        self.senses
            .env
            .sweep_clear_or_blocked(from, aim, config.ranged_spell_radius)
    }
}

/// Where `target` will be when a projectile thrown from `from` at `speed`
/// reaches it, assuming it keeps its current velocity.
fn lead_point(from: Vec3, target: &Agent, speed: f32) -> Vec3 {
    let torso = target.torso();
    let velocity = target.motor.map(|m| m.velocity).unwrap_or(Vec3::ZERO);
    if speed <= 0.0 || velocity == Vec3::ZERO {
        return torso;
    }
    let flight = from.distance(torso) / speed;
    torso + velocity * flight
}
