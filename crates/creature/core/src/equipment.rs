//! Spawn-time equipment review.
//!
//! Creatures spawn with whatever the loot tables gave them, often worn in the
//! wrong order or not at all. [`EquipmentAdvisor::adjust`] makes sure a
//! creature carries a weapon it is trained in and wears the best of what it
//! owns.

use tracing::debug;

use crate::env::AgentRng;
use crate::state::{
    Agent, ArmorClass, EquipSlot, Hands, Item, ItemKind, ItemUid, Material, Skill, SpeciesId,
};

const ENCHANTMENT_BONUS: i32 = 15;
const WORN_OUT_CONDITION: u32 = 10;
const WORN_OUT_PENALTY: i32 = 10;
/// A weapon this far below the best melee skill still counts as suitable.
const SKILL_SLACK: u32 = 10;

/// Chance weight of each material, in [`Material::ALL`] order. Sums to 100.
const MATERIAL_WEIGHTS: [i32; 10] = [30, 35, 10, 8, 6, 4, 3, 2, 1, 1];

/// A re-equip performed by [`EquipmentAdvisor::adjust`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reequip {
    pub slot: EquipSlot,
    pub item: ItemUid,
}

pub struct EquipmentAdvisor;

impl EquipmentAdvisor {
    /// Ensures a suitable weapon exists, then swaps in every carried item
    /// that beats what is worn in its slot.
    pub fn adjust(agent: &mut Agent, player_level: u32, rng: &mut AgentRng) -> Vec<Reequip> {
        Self::ensure_skilled_weapon(agent, player_level, rng);

        let mut changes = Vec::new();
        for uid in agent.inventory.uids() {
            let Some(item) = agent.inventory.get(uid) else {
                continue;
            };
            if agent.inventory.is_equipped(uid) || !should_equip(agent, item) {
                continue;
            }
            let Some(slot) = slot_for(item) else {
                continue;
            };
            agent.inventory.unequip(slot);
            agent.inventory.equip(uid, slot);
            changes.push(Reequip { slot, item: uid });
        }

        if !changes.is_empty() {
            debug!(agent = %agent.id, changes = changes.len(), "re-equipped");
        }
        changes
    }

    /// Gives the agent a weapon for its best melee skill if it has none.
    /// Fist fighters are disarmed instead.
    pub fn ensure_skilled_weapon(agent: &mut Agent, player_level: u32, rng: &mut AgentRng) {
        let (best_skill, best) = best_melee_skill(agent);
        if best_skill == Skill::HandToHand {
            agent.inventory.unequip(EquipSlot::RightHand);
            return;
        }

        let required = best.saturating_sub(SKILL_SLACK);
        let has_suitable = agent.inventory.iter().any(|(_, item)| {
            item.weapon_skill()
                .filter(|skill| Skill::MELEE.contains(skill))
                .is_some_and(|skill| agent.skills.get(skill) >= required)
        });
        if has_suitable {
            return;
        }

        let level = if agent.species == SpeciesId::CITY_WATCH {
            1
        } else {
            player_level
        };
        let weapon = starter_weapon(best_skill, random_material(level, rng));
        debug!(agent = %agent.id, weapon = %weapon.name, material = %weapon.material, "created weapon");
        agent.inventory.add(weapon);
    }
}

fn best_melee_skill(agent: &Agent) -> (Skill, u32) {
    let mut best_skill = Skill::HandToHand;
    let mut best = 0;
    for skill in Skill::MELEE {
        let value = agent.skills.get(skill);
        if value > best {
            best = value;
            best_skill = skill;
        }
    }
    (best_skill, best)
}

fn starter_weapon(skill: Skill, material: Material) -> Item {
    let (name, skill, hands) = match skill {
        Skill::Axe => ("Battle Axe", Skill::Axe, Hands::Both),
        Skill::BluntWeapon => ("Mace", Skill::BluntWeapon, Hands::One),
        Skill::LongBlade => ("Broadsword", Skill::LongBlade, Hands::One),
        _ => ("Dagger", Skill::ShortBlade, Hands::One),
    };
    Item::new(name, ItemKind::Weapon { skill, hands }, material)
}

/// Material for a freshly made item; better materials get likelier with
/// level.
pub fn random_material(level: u32, rng: &mut AgentRng) -> Material {
    let level = level as i32 - 10;
    let modifier = if level >= 0 { level * 2 } else { level * 4 };
    let mut roll = (rng.index(100) as i32 + modifier).clamp(0, 99);

    for (material, weight) in Material::ALL.into_iter().zip(MATERIAL_WEIGHTS) {
        if roll < weight {
            return material;
        }
        roll -= weight;
    }
    Material::Daedric
}

/// Whether career restrictions and wear allow the agent to use `item`.
pub fn can_equip(agent: &Agent, item: &Item) -> bool {
    if item.condition < 1 {
        return false;
    }

    let career = &agent.career;
    match item.kind {
        ItemKind::Arrow => false,
        ItemKind::Weapon { skill, .. } => {
            !career.forbidden_proficiencies.intersects(skill.proficiency())
                && !career.forbidden_materials.intersects(item.material.flag())
        }
        ItemKind::Shield { shape } => !career.forbidden_shields.intersects(shape.flag()),
        ItemKind::Armor { class, .. } => {
            if career.forbidden_armors.intersects(class.flag()) {
                return false;
            }
            class != ArmorClass::Plate || !career.forbidden_materials.intersects(item.material.flag())
        }
        ItemKind::Accessory { .. } | ItemKind::Misc => true,
    }
}

/// How useful a weapon is to this agent. `None` stands for bare hands.
pub fn weapon_value(agent: &Agent, item: Option<&Item>) -> i32 {
    let Some(item) = item else {
        return agent.skills.get(Skill::HandToHand) as i32;
    };
    let Some(skill) = item.weapon_skill() else {
        return 0;
    };
    if !can_equip(agent, item) {
        return 0;
    }

    let mut value = agent.skills.get(skill) as i32;
    value += item.material.weapon_modifier() * 5;
    if item.enchanted {
        value += ENCHANTMENT_BONUS;
    }
    if item.condition < WORN_OUT_CONDITION {
        value -= WORN_OUT_PENALTY;
    }
    value
}

/// Protection an armor piece or shield offers this agent.
pub fn armor_value(agent: &Agent, item: Option<&Item>) -> i32 {
    let Some(item) = item.filter(|item| can_equip(agent, item)) else {
        return 0;
    };
    let base = match item.kind {
        ItemKind::Armor { class, .. } => match class {
            ArmorClass::Leather => 3,
            ArmorClass::Chain => 6,
            ArmorClass::Plate => item.material.plate_armor_value(),
        },
        ItemKind::Shield { shape } => shape.armor_value(),
        _ => return 0,
    };
    if item.enchanted {
        base + ENCHANTMENT_BONUS
    } else {
        base
    }
}

/// Slot `item` is worn in, or `None` for things that cannot be worn.
pub fn slot_for(item: &Item) -> Option<EquipSlot> {
    match item.kind {
        ItemKind::Weapon {
            skill: Skill::Archery,
            ..
        } => Some(EquipSlot::LeftHand),
        ItemKind::Weapon { .. } => Some(EquipSlot::RightHand),
        ItemKind::Armor { slot, .. } | ItemKind::Accessory { slot } => Some(slot),
        ItemKind::Shield { .. } => Some(EquipSlot::LeftHand),
        ItemKind::Arrow | ItemKind::Misc => None,
    }
}

/// Whether `item` is usable and better than what the agent wears now.
pub fn should_equip(agent: &Agent, item: &Item) -> bool {
    if !can_equip(agent, item) {
        return false;
    }

    let inventory = &agent.inventory;
    let right = inventory.equipped_in(EquipSlot::RightHand);
    let left = inventory.equipped_in(EquipSlot::LeftHand);
    let two_handed = right.is_some_and(Item::is_two_handed);

    match item.kind {
        ItemKind::Weapon { skill, .. } => {
            let current = if skill == Skill::Archery {
                if two_handed {
                    return false;
                }
                match left {
                    None => return true,
                    Some(_) => weapon_value(agent, left),
                }
            } else {
                weapon_value(agent, right)
            };
            weapon_value(agent, Some(item)) > current
        }
        ItemKind::Shield { .. } => {
            if two_handed || left.is_some_and(Item::is_archery) {
                return false;
            }
            armor_value(agent, Some(item)) > armor_value(agent, left)
        }
        ItemKind::Armor { slot, .. } => {
            armor_value(agent, Some(item)) > armor_value(agent, inventory.equipped_in(slot))
        }
        _ => item.enchanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentKind, EntityId, Materials, ShieldShape, Shields, Team};

    fn knight() -> Agent {
        Agent::new(EntityId(4), AgentKind::Class, SpeciesId::KNIGHT, Team::KnightsAndMages)
    }

    fn sword(material: Material) -> Item {
        Item::new(
            "Longsword",
            ItemKind::Weapon {
                skill: Skill::LongBlade,
                hands: Hands::One,
            },
            material,
        )
    }

    #[test]
    fn broken_items_are_never_equipped() {
        let agent = knight();
        assert!(!can_equip(&agent, &sword(Material::Steel).with_condition(0)));
        assert!(can_equip(&agent, &sword(Material::Steel).with_condition(1)));
    }

    #[test]
    fn forbidden_material_blocks_weapons_and_plate_only() {
        let mut agent = knight();
        agent.career.forbidden_materials = Materials::EBONY;
        assert!(!can_equip(&agent, &sword(Material::Ebony)));

        let plate = Item::new(
            "Cuirass",
            ItemKind::Armor {
                slot: EquipSlot::Chest,
                class: ArmorClass::Plate,
            },
            Material::Ebony,
        );
        let chain = Item::new(
            "Hauberk",
            ItemKind::Armor {
                slot: EquipSlot::Chest,
                class: ArmorClass::Chain,
            },
            Material::Ebony,
        );
        assert!(!can_equip(&agent, &plate));
        assert!(can_equip(&agent, &chain));
    }

    #[test]
    fn better_material_replaces_worn_weapon() {
        let mut agent = knight();
        agent.skills.set(Skill::LongBlade, 50);
        agent
            .inventory
            .add_equipped(sword(Material::Iron), EquipSlot::RightHand);
        let daedric = agent.inventory.add(sword(Material::Daedric));

        let changes = EquipmentAdvisor::adjust(&mut agent, 10, &mut AgentRng::seeded(1));
        assert_eq!(
            changes,
            vec![Reequip {
                slot: EquipSlot::RightHand,
                item: daedric
            }]
        );
        assert_eq!(agent.inventory.slot_of(daedric), Some(EquipSlot::RightHand));
    }

    #[test]
    fn two_handed_weapon_blocks_shield() {
        let mut agent = knight();
        agent.inventory.add_equipped(
            Item::new(
                "Claymore",
                ItemKind::Weapon {
                    skill: Skill::LongBlade,
                    hands: Hands::Both,
                },
                Material::Steel,
            ),
            EquipSlot::RightHand,
        );
        let kite = Item::new(
            "Kite Shield",
            ItemKind::Shield {
                shape: ShieldShape::Kite,
            },
            Material::Steel,
        );
        assert!(!should_equip(&agent, &kite));

        agent.inventory.unequip(EquipSlot::RightHand);
        assert!(should_equip(&agent, &kite));
        agent.career.forbidden_shields = Shields::KITE;
        assert!(!should_equip(&agent, &kite));
    }

    #[test]
    fn missing_weapon_is_created_for_best_skill() {
        let mut agent = knight();
        agent.skills.set(Skill::Axe, 60);
        agent.skills.set(Skill::ShortBlade, 30);
        EquipmentAdvisor::adjust(&mut agent, 5, &mut AgentRng::seeded(3));

        let wielded = agent.inventory.equipped_in(EquipSlot::RightHand);
        assert_eq!(wielded.and_then(Item::weapon_skill), Some(Skill::Axe));
        assert!(wielded.is_some_and(Item::is_two_handed));
    }

    #[test]
    fn fist_fighters_are_disarmed() {
        let mut agent = knight();
        agent.skills.set(Skill::HandToHand, 80);
        agent
            .inventory
            .add_equipped(sword(Material::Steel), EquipSlot::RightHand);
        EquipmentAdvisor::ensure_skilled_weapon(&mut agent, 1, &mut AgentRng::seeded(1));
        assert!(agent.inventory.equipped_in(EquipSlot::RightHand).is_none());
    }

    #[test]
    fn arrows_stay_in_the_quiver() {
        let agent = knight();
        let arrow = Item::new("Arrow", ItemKind::Arrow, Material::Iron);
        assert!(!can_equip(&agent, &arrow));
        assert!(slot_for(&arrow).is_none());
    }

    #[test]
    fn high_level_rolls_better_materials() {
        let mut rng = AgentRng::seeded(11);
        let low: i32 = (0..200).map(|_| random_material(1, &mut rng) as i32).sum();
        let high: i32 = (0..200).map(|_| random_material(30, &mut rng) as i32).sum();
        assert!(high > low);
    }
}
