use std::path::PathBuf;

use creature_content::ContentFactory;
use creature_core::{SpeciesId, SpellRole};

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn shipped_content_loads() {
    let factory = factory();
    let config = factory.load_config().unwrap();
    let sensors = factory.load_sensors().unwrap();
    let spells = factory.load_spells().unwrap();
    let skirmish = factory.load_skirmish("crossroads").unwrap();

    assert_eq!(config.light_detection_period, 87);
    assert_eq!(sensors.lookup(SpeciesId::CITY_WATCH).hearing_radius, 20.0);
    assert_eq!(spells.resolve_classic(97).magnitude, 25);
    assert_eq!(skirmish.creatures.len(), 4);
}

#[test]
fn shaman_spells_resolve() {
    let factory = factory();
    let spells = factory.load_spells().unwrap();
    let skirmish = factory.load_skirmish("crossroads").unwrap();

    let creatures = skirmish.creature_agents(&spells);
    let shaman = creatures
        .iter()
        .find(|agent| agent.species == SpeciesId::ORC_SHAMAN)
        .expect("shaman in layout");
    assert_eq!(shaman.spells.len(), 3);
    assert!(shaman.spells.iter().all(|spell| !spell.is_inert()));

    let mut rng = creature_core::AgentRng::seeded(1);
    let book = creature_core::ClassifiedSpellbook::classify(&shaman.spells, skirmish.in_dungeon, &mut rng);
    assert!(book.has(SpellRole::RangedSingle));
    assert!(book.has(SpellRole::HealSelf));
    assert!(book.has(SpellRole::FreeAction));
}
