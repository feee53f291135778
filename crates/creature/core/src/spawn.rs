//! One-shot preparation of a freshly spawned creature.

use tracing::debug;

use crate::env::{AgentRng, AiEnv, compute_seed};
use crate::equipment::EquipmentAdvisor;
use crate::magic::{ClassifiedSpellbook, SpellCatalog, adjust_spells};
use crate::perception::SensorRegistry;
use crate::state::{Agent, AgentKind, PerceptionState, SpeciesId, Team, Tolerance};

/// Monsters that carry and use real weapons.
const WEAPON_WIELDERS: [SpeciesId; 6] = [
    SpeciesId::ORC,
    SpeciesId::ORC_SERGEANT,
    SpeciesId::ORC_SHAMAN,
    SpeciesId::ORC_WARLORD,
    SpeciesId::CENTAUR,
    SpeciesId::SKELETAL_WARRIOR,
];

/// Applies spawn-time adjustments: random stream, equipment, magicka,
/// spellbook, career traits and senses.
pub struct SpawnAdjuster<'a> {
    catalog: &'a SpellCatalog,
    sensors: &'a SensorRegistry,
    world_seed: u64,
    player_level: u32,
}

impl<'a> SpawnAdjuster<'a> {
    pub fn new(catalog: &'a SpellCatalog, sensors: &'a SensorRegistry, world_seed: u64) -> Self {
        Self {
            catalog,
            sensors,
            world_seed,
            player_level: 1,
        }
    }

    pub fn with_player_level(mut self, level: u32) -> Self {
        self.player_level = level;
        self
    }

    /// Prepares `agent`. Safe to call on a creature restored from a save:
    /// the random stream is rebuilt from the stable load id and magicka is
    /// not topped up while a load is in progress.
    pub fn prepare(&self, agent: &mut Agent, env: AiEnv<'_>) {
        let seed = compute_seed(self.world_seed, agent.load_id, agent.id.0, 0);
        let mut rng = AgentRng::seeded(seed);

        if agent.kind == AgentKind::Class || WEAPON_WIELDERS.contains(&agent.species) {
            EquipmentAdvisor::adjust(agent, self.player_level, &mut rng);
        }

        let custom = agent.species.is_custom();
        if agent.kind == AgentKind::Class && !custom {
            let maximum = (agent.career.spell_point_multiplier * agent.attributes.intelligence as f32) as u32;
            agent.magicka.maximum = maximum;
            if !env.load_in_progress() {
                agent.magicka.current = maximum;
            } else {
                agent.magicka.current = agent.magicka.current.min(maximum);
            }
        }
        if !custom {
            adjust_spells(agent, self.catalog, &mut rng);
        }

        adjust_career(agent);
        agent.senses = self.sensors.lookup(agent.species);
        agent.mind.spellbook = ClassifiedSpellbook::classify(&agent.spells, env.in_dungeon(), &mut rng);
        agent.mind.perception = PerceptionState::new(agent.senses.fov_standard);
        agent.mind.rng = rng;

        debug!(
            agent = %agent.id,
            species = %agent.species,
            spells = agent.mind.spellbook.len(),
            magicka = agent.magicka.maximum,
            "prepared creature"
        );
    }
}

/// Bloodless creatures cannot be poisoned, sickened or paralyzed; undead do
/// not catch diseases and are hurt by holy ground.
fn adjust_career(agent: &mut Agent) {
    let tolerances = &mut agent.career.tolerances;
    if agent.bloodless {
        tolerances.disease = Tolerance::Immune;
        tolerances.paralysis = Tolerance::Immune;
        tolerances.poison = Tolerance::Immune;
    }
    if agent.team == Team::Undead {
        tolerances.disease = Tolerance::Immune;
        agent.career.damage_from_holy_places = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, WorldOracle};
    use crate::magic::SpellRole;
    use crate::state::{EntityId, Skill, Skills};

    struct Loading;
    impl WorldOracle for Loading {
        fn in_dungeon(&self) -> bool {
            true
        }
        fn player_in_darkness(&self) -> bool {
            false
        }
        fn load_in_progress(&self) -> bool {
            true
        }
    }

    fn healer() -> Agent {
        let mut agent = Agent::new(EntityId(12), AgentKind::Class, SpeciesId::HEALER, Team::KnightsAndMages);
        agent.skills = Skills::new().with(Skill::Restoration, 80);
        agent.career.spell_point_multiplier = 2.0;
        agent.attributes.intelligence = 60;
        agent
    }

    #[test]
    fn class_casters_get_magicka_and_a_classified_book() {
        let catalog = SpellCatalog::builtin();
        let sensors = SensorRegistry::builtin();
        let mut agent = healer();
        SpawnAdjuster::new(&catalog, &sensors, 42).prepare(&mut agent, AiEnv::empty());

        assert_eq!(agent.magicka.maximum, 120);
        assert_eq!(agent.magicka.current, 120);
        assert!(agent.mind.spellbook.has(SpellRole::HealSelf));
        assert!(agent.mind.spellbook.has(SpellRole::HealArea));
    }

    #[test]
    fn restored_magicka_survives_a_load() {
        let catalog = SpellCatalog::builtin();
        let sensors = SensorRegistry::builtin();
        let loading = Loading;
        let env: AiEnv<'_> = Env::new(None, None, Some(&loading as &dyn WorldOracle));

        let mut agent = healer();
        agent.magicka.current = 35;
        SpawnAdjuster::new(&catalog, &sensors, 42).prepare(&mut agent, env);
        assert_eq!(agent.magicka.current, 35);
    }

    #[test]
    fn same_seed_same_creature() {
        let catalog = SpellCatalog::builtin();
        let sensors = SensorRegistry::builtin();
        let adjuster = SpawnAdjuster::new(&catalog, &sensors, 7);

        let mut a = healer();
        let mut b = healer();
        adjuster.prepare(&mut a, AiEnv::empty());
        adjuster.prepare(&mut b, AiEnv::empty());
        assert_eq!(a.spells, b.spells);
        assert_eq!(a.mind.rng, b.mind.rng);
    }

    #[test]
    fn undead_and_bloodless_become_immune() {
        let catalog = SpellCatalog::builtin();
        let sensors = SensorRegistry::builtin();
        let mut wraith = Agent::new(EntityId(3), AgentKind::Monster, SpeciesId::WRAITH, Team::Undead);
        wraith.bloodless = true;
        SpawnAdjuster::new(&catalog, &sensors, 1).prepare(&mut wraith, AiEnv::empty());

        let t = wraith.career.tolerances;
        assert_eq!(t.disease, Tolerance::Immune);
        assert_eq!(t.poison, Tolerance::Immune);
        assert_eq!(t.paralysis, Tolerance::Immune);
        assert!(wraith.career.damage_from_holy_places);
        assert_eq!(wraith.senses, sensors.lookup(SpeciesId::WRAITH));
    }
}
