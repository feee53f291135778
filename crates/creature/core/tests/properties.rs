use creature_core::state::{ArmorClass, EquipSlot, Hands, Material, ShieldShape};
use creature_core::{
    Agent, AgentKind, AgentRng, AiConfig, AiEnv, ClassifiedSpellbook, EffectKey, Element, EntityId,
    Item, ItemKind, SenseContext, Skill, SpeciesId, Spell, SpellCatalog, SpellRole, Team,
    TargetType, can_equip, can_hear, compute_noise, detection_threshold, should_equip,
};
use creature_core::perception::{MAX_NOISE, MIN_NOISE};
use glam::Vec3;
use proptest::prelude::*;

fn material() -> impl Strategy<Value = Material> {
    prop::sample::select(Material::ALL.to_vec())
}

fn item() -> impl Strategy<Value = Item> {
    let weapon = (prop::sample::select(Skill::MELEE.to_vec()), any::<bool>()).prop_map(|(skill, both)| {
        ItemKind::Weapon {
            skill,
            hands: if both { Hands::Both } else { Hands::One },
        }
    });
    let armor = (
        prop::sample::select(EquipSlot::ARMOR.to_vec()),
        prop::sample::select(vec![ArmorClass::Leather, ArmorClass::Chain, ArmorClass::Plate]),
    )
        .prop_map(|(slot, class)| ItemKind::Armor { slot, class });
    let shield = prop::sample::select(vec![
        ShieldShape::Buckler,
        ShieldShape::Round,
        ShieldShape::Kite,
        ShieldShape::Tower,
    ])
    .prop_map(|shape| ItemKind::Shield { shape });
    let kind = prop_oneof![weapon, armor, shield, Just(ItemKind::Arrow)];

    (kind, material(), 0u32..=100, any::<bool>()).prop_map(|(kind, material, condition, enchanted)| {
        let mut item = Item::new("loot", kind, material).with_condition(condition);
        item.enchanted = enchanted;
        item
    })
}

fn walker(speed: f32, stealth: u32, crouching: bool) -> Agent {
    let mut agent = Agent::player(Vec3::ZERO);
    agent.skills.set(Skill::Stealth, stealth);
    if let Some(motor) = agent.motor.as_mut() {
        motor.velocity = Vec3::new(speed, 0.0, 0.0);
        motor.crouching = crouching;
    }
    agent
}

proptest! {
    #[test]
    fn noise_stays_in_range(speed in 0.0f32..50.0, stealth in 0u32..=150, crouching in any::<bool>()) {
        let noise = compute_noise(&walker(speed, stealth, crouching));
        prop_assert!((MIN_NOISE..=MAX_NOISE).contains(&noise), "noise {noise}");
    }

    #[test]
    fn threshold_grows_with_distance(near in 1.0f32..200.0, gap in 0.01f32..200.0, acuity in 0.1f32..5.0, wary in any::<bool>()) {
        let config = AiConfig::default();
        let a = detection_threshold(near, acuity, wary, &config);
        let b = detection_threshold(near + gap, acuity, wary, &config);
        prop_assert!(b >= a);
    }

    #[test]
    fn wariness_never_raises_the_threshold(distance in 1.0f32..200.0, acuity in 0.1f32..5.0) {
        let config = AiConfig::default();
        prop_assert!(detection_threshold(distance, acuity, true, &config)
            <= detection_threshold(distance, acuity, false, &config));
    }

    #[test]
    fn nothing_beyond_the_hearing_radius_is_heard(extra in 0.01f32..100.0, speed in 0.0f32..20.0) {
        let config = AiConfig::default();
        let senses = SenseContext::new(AiEnv::open_ground(), &config, None);
        let listener = Agent::new(EntityId(1), AgentKind::Monster, SpeciesId::ORC, Team::Orcs);
        let mut target = walker(speed, 0, false);
        target.position = Vec3::new(0.0, 0.0, listener.senses.hearing_radius + extra);
        prop_assert!(!can_hear(&listener, &target, &senses));
    }

    #[test]
    fn classified_spells_come_from_the_book(ids in prop::collection::vec(prop::sample::select(vec![
        3u16, 4, 6, 7, 8, 10, 14, 16, 20, 22, 23, 25, 29, 31, 34, 37, 39, 44, 45, 46, 47, 50, 53, 97,
    ]), 0..12), in_dungeon in any::<bool>(), seed in any::<u64>()) {
        let catalog = SpellCatalog::builtin();
        let mut spells: Vec<_> = ids.iter().map(|&id| catalog.resolve_classic(id)).collect();
        let self_harm = Spell::new("Inner Fire", TargetType::CasterOnly, Element::Fire, EffectKey::DamageHealth);
        let mut keyless = Spell::new("Empty Words", TargetType::SingleTargetAtRange, Element::Magic, EffectKey::DamageHealth);
        keyless.effects.clear();
        spells.push(self_harm.clone());
        spells.push(keyless.clone());
        let mut rng = AgentRng::seeded(seed);
        let book = ClassifiedSpellbook::classify(&spells, in_dungeon, &mut rng);

        prop_assert!(book.len() <= ids.len());
        prop_assert!(book.get(SpellRole::CombatPrep).len() <= 1);
        let mut placed: Vec<(&Spell, SpellRole)> = Vec::new();
        for (role, bucket) in book.iter() {
            for spell in bucket {
                prop_assert!(spells.contains(spell));
                prop_assert!(spell != &self_harm && spell != &keyless);
                let elsewhere = placed.iter().any(|(seen, seen_role)| *seen == spell && *seen_role != role);
                prop_assert!(!elsewhere, "{} sits in more than one bucket", spell.name);
                placed.push((spell, role));
            }
        }
    }

    #[test]
    fn only_equippable_items_are_wanted(item in item(), skill in 0u32..=100, plate in any::<bool>()) {
        let mut agent = Agent::new(EntityId(4), AgentKind::Class, SpeciesId::WARRIOR, Team::KnightsAndMages);
        for melee in Skill::MELEE {
            agent.skills.set(melee, skill);
        }
        if !plate {
            agent.career.forbidden_armors = ArmorClass::Plate.flag();
            agent.career.forbidden_materials = Material::Daedric.flag();
        }
        if should_equip(&agent, &item) {
            prop_assert!(can_equip(&agent, &item));
        }
    }
}
