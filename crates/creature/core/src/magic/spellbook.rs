//! Spawn-time spellbook rebuilding.
//!
//! Human casters forget whatever spells the spawn table handed them and learn
//! a set that fits their magic skills instead. A few monster species may pick
//! up levitation on top of their innate spells.

use tracing::debug;

use super::{CustomSpell, Spell, SpellCatalog};
use crate::env::AgentRng;
use crate::state::{Agent, AgentKind, Skill, SpeciesId, Team};

/// Schools below this skill teach nothing.
const MIN_SCHOOL_SKILL: u32 = 25;

const FROSTBITE: u16 = 3;
const LEVITATE: u16 = 4;
const INVISIBILITY: u16 = 6;
const WIZARDS_FIRE: u16 = 7;
const SHOCK: u16 = 8;
const FREE_ACTION: u16 = 10;
const FIREBALL: u16 = 14;
const ICE_BOLT: u16 = 16;
const ICE_STORM: u16 = 20;
const SPELL_SHIELD: u16 = 22;
const SILENCE: u16 = 23;
const FIRE_STORM: u16 = 25;
const TOXIC_CLOUD: u16 = 29;
const LIGHTNING: u16 = 31;
const WIZARD_REND: u16 = 34;
const SLOWFALL: u16 = 37;
const SPELL_RESISTANCE: u16 = 39;
const CHAMELEON: u16 = 44;
const SHADOW: u16 = 45;
const SPELL_REFLECTION: u16 = 46;
const SPELL_ABSORPTION: u16 = 47;
const PARALYSIS: u16 = 50;
const HAND_OF_SLEEP: u16 = 53;
const HEAL_SELF: u16 = 97;

/// Rebuilds or extends the agent's raw spell list. Custom species keep their
/// authored spells and are not passed here.
pub fn adjust_spells(agent: &mut Agent, catalog: &SpellCatalog, rng: &mut AgentRng) {
    if agent.kind == AgentKind::Class {
        agent.spells = SpellbookBuilder::new(catalog, rng).build_for(agent);
        debug!(agent = %agent.id, spells = agent.spells.len(), "rebuilt class spellbook");
        return;
    }

    let levitate_chance = match agent.species {
        SpeciesId::LICH => 70,
        SpeciesId::ANCIENT_LICH => 85,
        SpeciesId::VAMPIRE_ANCIENT => 60,
        _ => return,
    };
    if rng.success_roll(levitate_chance) {
        agent.spells.push(catalog.resolve_classic(LEVITATE));
    }
}

/// Grants spells school by school.
pub struct SpellbookBuilder<'a> {
    catalog: &'a SpellCatalog,
    rng: &'a mut AgentRng,
    spells: Vec<Spell>,
}

impl<'a> SpellbookBuilder<'a> {
    pub fn new(catalog: &'a SpellCatalog, rng: &'a mut AgentRng) -> Self {
        Self {
            catalog,
            rng,
            spells: Vec::new(),
        }
    }

    /// Fresh spell list for a class caster.
    pub fn build_for(mut self, agent: &Agent) -> Vec<Spell> {
        for school in Skill::MAGIC_SCHOOLS {
            let skill = agent.skills.get(school);
            if skill < MIN_SCHOOL_SKILL {
                continue;
            }
            match school {
                Skill::Alteration => self.alteration(agent, skill),
                Skill::Destruction => self.destruction(skill),
                Skill::Illusion => self.illusion(agent, skill),
                Skill::Mysticism => self.mysticism(skill),
                Skill::Restoration => self.restoration(agent, skill),
                Skill::Thaumaturgy => self.thaumaturgy(skill),
                _ => {}
            }
        }
        self.spells
    }

    /// Grants classic spell `id` when `skill` clears `above` and a
    /// `chance`% roll succeeds.
    fn grant(&mut self, skill: u32, above: u32, chance: u32, id: u16) -> bool {
        if skill > above && self.rng.success_roll(chance) {
            self.spells.push(self.catalog.resolve_classic(id));
            return true;
        }
        false
    }

    fn grant_custom(&mut self, skill: u32, above: u32, chance: u32, which: CustomSpell) {
        if skill > above && self.rng.success_roll(chance) {
            self.spells.push(self.catalog.custom(which));
        }
    }

    fn alteration(&mut self, agent: &Agent, skill: u32) {
        self.grant(skill, 35, 70, SLOWFALL);
        self.grant(skill, 75, 50, PARALYSIS);
        if agent.skills.get(Skill::Destruction) > 85 {
            self.grant(skill, 85, 50, WIZARD_REND);
        }
    }

    fn destruction(&mut self, skill: u32) {
        self.grant(skill, 30, 65, FROSTBITE);
        self.grant(skill, 37, 65, SHOCK);
        self.grant(skill, 40, 65, WIZARDS_FIRE);
        self.grant(skill, 50, 60, FIREBALL);
        self.grant(skill, 55, 60, LIGHTNING);
        self.grant(skill, 60, 40, HAND_OF_SLEEP);
        self.grant(skill, 65, 45, FIRE_STORM);
        self.grant(skill, 70, 45, ICE_BOLT);
        self.grant(skill, 70, 40, TOXIC_CLOUD);
        self.grant(skill, 80, 45, ICE_STORM);
    }

    fn illusion(&mut self, agent: &Agent, skill: u32) {
        self.grant(skill, 30, 50, SHADOW);
        self.grant(skill, 35, 50, CHAMELEON);
        if agent.team == Team::KnightsAndMages {
            self.grant_custom(skill, 40, 60, CustomSpell::MageLight);
        }
        self.grant(skill, 45, 50, INVISIBILITY);
        self.grant_custom(skill, 50, 50, CustomSpell::TrueShadow);
        self.grant_custom(skill, 55, 50, CustomSpell::TrueChameleon);
        self.grant_custom(skill, 70, 40, CustomSpell::TrueInvisibility);
    }

    fn mysticism(&mut self, skill: u32) {
        self.grant(skill, 70, 65, SILENCE);
    }

    fn restoration(&mut self, agent: &Agent, skill: u32) {
        self.grant(skill, 30, skill + 20, FREE_ACTION);
        self.grant(skill, 35, skill + 30, HEAL_SELF);
        if skill > 50 && agent.species == SpeciesId::HEALER {
            self.spells.push(self.catalog.custom(CustomSpell::HealingAura));
        }
        if !agent.career.spell_absorption {
            self.grant(skill, 85, 65, SPELL_ABSORPTION);
        }
    }

    fn thaumaturgy(&mut self, skill: u32) {
        self.grant(skill, 45, 70, LEVITATE);
        if !self.grant(skill, 87, 60, SPELL_SHIELD) {
            self.grant(skill, 75, 40, SPELL_RESISTANCE);
        }
        self.grant(skill, 90, 60, SPELL_REFLECTION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::EffectKey;
    use crate::state::{EntityId, Skills};

    fn class(species: SpeciesId, skills: Skills) -> Agent {
        let mut agent = Agent::new(EntityId(9), AgentKind::Class, species, Team::KnightsAndMages);
        agent.skills = skills;
        agent
    }

    #[test]
    fn weak_schools_teach_nothing() {
        let mut agent = class(SpeciesId::MAGE, Skills::new().with(Skill::Destruction, 24));
        agent.spells.push(Spell::inert());
        adjust_spells(&mut agent, &SpellCatalog::builtin(), &mut AgentRng::seeded(1));
        assert!(agent.spells.is_empty());
    }

    #[test]
    fn master_restorer_always_heals() {
        // skill + 30 >= 100 makes the heal grant certain.
        let skills = Skills::new().with(Skill::Restoration, 80);
        for seed in 0..20 {
            let mut agent = class(SpeciesId::HEALER, skills.clone());
            adjust_spells(&mut agent, &SpellCatalog::builtin(), &mut AgentRng::seeded(seed));
            let keys: Vec<_> = agent.spells.iter().filter_map(Spell::key).collect();
            assert!(keys.contains(&EffectKey::HealHealth));
            assert!(keys.contains(&EffectKey::HealHealthArea));
        }
    }

    #[test]
    fn only_undead_casters_gain_levitation() {
        let catalog = SpellCatalog::builtin();
        let mut rat = Agent::new(EntityId(1), AgentKind::Monster, SpeciesId::RAT, Team::Beasts);
        adjust_spells(&mut rat, &catalog, &mut AgentRng::seeded(1));
        assert!(rat.spells.is_empty());

        let learned = (0..200)
            .filter(|&seed| {
                let mut lich =
                    Agent::new(EntityId(2), AgentKind::Monster, SpeciesId::ANCIENT_LICH, Team::Undead);
                adjust_spells(&mut lich, &catalog, &mut AgentRng::seeded(seed));
                !lich.spells.is_empty()
            })
            .count();
        assert!(learned > 140, "ancient liches learning levitate: {learned}");
    }
}
