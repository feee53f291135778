//! How loud an agent is.

use crate::state::{Agent, EquipSlot, ItemKind};

/// Quietest an agent can be: breathing, body heat, smell.
pub const MIN_NOISE: f32 = 1.0;
pub const MAX_NOISE: f32 = 20.0;

const LEATHER_LOUDNESS: f32 = 0.3;
const METAL_LOUDNESS: f32 = 0.9;

/// Noise from worn armor, movement speed and stealth, in `[1, 20]`.
///
/// An agent without a motor is treated as standing still in the open and
/// makes only the floor amount of noise.
pub fn compute_noise(target: &Agent) -> f32 {
    let Some(motor) = target.motor else {
        return MIN_NOISE;
    };

    let mut loudness = 1.0;
    for slot in EquipSlot::ARMOR {
        let Some(item) = target.inventory.equipped_in(slot) else {
            continue;
        };
        if !matches!(item.kind, ItemKind::Armor { .. }) {
            continue;
        }

        let mut piece = if item.is_leather() {
            LEATHER_LOUDNESS
        } else {
            METAL_LOUDNESS
        };
        match slot {
            EquipSlot::Feet if motor.grounded => piece *= 4.0,
            EquipSlot::Legs if motor.grounded => piece *= 2.0,
            EquipSlot::Head => piece *= 0.5,
            _ => {}
        }
        loudness += piece;
    }

    let movement = 1.0 + motor.velocity.length();
    let mut noise = loudness * movement / 2.0;

    let stealth = target.stealth() as f32;
    noise *= (120.0 - stealth) / 100.0;
    if stealth >= 100.0 {
        noise /= 2.0;
    }

    if noise.is_nan() {
        return MIN_NOISE;
    }
    noise.clamp(MIN_NOISE, MAX_NOISE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentKind, ArmorClass, EntityId, Item, Material, Skill, SpeciesId, Team};
    use glam::Vec3;

    fn armored(class: ArmorClass) -> Agent {
        let mut agent = Agent::new(EntityId(1), AgentKind::Class, SpeciesId::KNIGHT, Team::KnightsAndMages);
        for slot in EquipSlot::ARMOR {
            agent
                .inventory
                .add_equipped(Item::new("piece", ItemKind::Armor { slot, class }, Material::Steel), slot);
        }
        agent
    }

    #[test]
    fn plate_is_louder_than_leather() {
        let mut plate = armored(ArmorClass::Plate);
        let mut leather = armored(ArmorClass::Leather);
        for motor in [&mut plate, &mut leather].into_iter().filter_map(|a| a.motor.as_mut()) {
            motor.velocity = Vec3::new(3.0, 0.0, 0.0);
        }
        assert!(compute_noise(&plate) > compute_noise(&leather));
    }

    #[test]
    fn boots_are_quiet_in_the_air() {
        let mut agent = armored(ArmorClass::Plate);
        let grounded = compute_noise(&agent);
        if let Some(m) = agent.motor.as_mut() {
            m.grounded = false;
        }
        assert!(compute_noise(&agent) < grounded);
    }

    #[test]
    fn stealth_master_halves_noise() {
        let mut agent = armored(ArmorClass::Chain);
        if let Some(m) = agent.motor.as_mut() {
            m.velocity = Vec3::new(10.0, 0.0, 0.0);
        }
        agent.skills.set(Skill::Stealth, 99);
        let near_master = compute_noise(&agent);
        agent.skills.set(Skill::Stealth, 100);
        assert!(compute_noise(&agent) < near_master / 1.9);
    }

    #[test]
    fn missing_motor_is_floor_noise() {
        let mut agent = armored(ArmorClass::Plate);
        agent.motor = None;
        assert_eq!(compute_noise(&agent), MIN_NOISE);
    }
}
