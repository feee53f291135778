//! Hearing checks and the stealth chance that mirrors them.

use super::{SenseContext, compute_noise};
use crate::config::AiConfig;
use crate::state::Agent;

/// Loudness the listener perceives from `noise` at `distance`.
///
/// Zero outside the hearing radius. Acute hearing careers scale the result.
pub fn perceived_loudness(listener: &Agent, noise: f32, distance: f32, config: &AiConfig) -> f32 {
    let radius = listener.senses.hearing_radius;
    if distance > radius {
        return 0.0;
    }

    let mut loudness = (radius - distance + 1.0).sqrt() * noise;
    if listener.career.improved_acute_hearing {
        loudness *= config.improved_acute_hearing_multiplier;
    } else if listener.career.acute_hearing {
        loudness *= config.acute_hearing_multiplier;
    }
    loudness
}

/// Whether `listener` hears `target` this tick.
///
/// Sound does not carry through static geometry; a wall anywhere between the
/// two blocks it.
pub fn can_hear(listener: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
    let distance = listener.distance_to(target);
    if distance > listener.senses.hearing_radius {
        return false;
    }

    if !senses.env.line_clear_or_blocked(listener.position, target.position) {
        return false;
    }

    let noise = compute_noise(target);
    perceived_loudness(listener, noise, distance, senses.config) > senses.config.hearing_threshold
}

/// Percent chance that `sneaker` goes unnoticed by something at `distance`.
///
/// Grows with stealth skill and with distance relative to noise, and is
/// bounded by luck on both ends.
pub fn stealth_chance(sneaker: &Agent, distance: f32) -> u32 {
    let noise = compute_noise(sneaker);
    let luck = sneaker.attributes.luck as f32 / 10.0;
    let stealth = sneaker.stealth() as f32;

    let chance = (stealth + 10.0) * (distance / noise).log10();
    if chance.is_nan() {
        return luck as u32;
    }
    chance.clamp(luck, 90.0 + luck) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AiEnv, Env, PhysicsOracle, RayHit};
    use crate::state::{AgentKind, EntityId, SpeciesId, Team};
    use glam::Vec3;

    struct Wall {
        z: f32,
    }

    impl PhysicsOracle for Wall {
        fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
            if direction.z <= 0.0 {
                return None;
            }
            let distance = (self.z - origin.z) / direction.z;
            (distance >= 0.0 && distance <= max_distance).then(|| RayHit {
                point: origin + direction * distance,
                distance,
            })
        }

        fn ground_height(&self, _at: Vec3) -> Option<f32> {
            Some(0.0)
        }
    }

    fn listener() -> Agent {
        Agent::new(EntityId(3), AgentKind::Monster, SpeciesId::ORC, Team::Orcs)
    }

    fn running_player(z: f32) -> Agent {
        let mut player = Agent::player(Vec3::new(0.0, 0.0, z));
        if let Some(m) = player.motor.as_mut() {
            m.velocity = Vec3::new(8.0, 0.0, 0.0);
        }
        player
    }

    fn senses<'a>(env: AiEnv<'a>, config: &'a AiConfig) -> SenseContext<'a> {
        SenseContext {
            env,
            config,
            player: None,
        }
    }

    #[test]
    fn running_player_is_heard_nearby() {
        let config = AiConfig::default();
        assert!(can_hear(&listener(), &running_player(4.0), &senses(AiEnv::open_ground(), &config)));
    }

    #[test]
    fn nothing_is_heard_without_physics() {
        let config = AiConfig::default();
        assert!(!can_hear(&listener(), &running_player(4.0), &senses(AiEnv::empty(), &config)));
    }

    #[test]
    fn walls_block_sound() {
        let config = AiConfig::default();
        let wall = Wall { z: 2.0 };
        let env: AiEnv<'_> = Env::new(None, Some(&wall as &dyn PhysicsOracle), None);
        assert!(!can_hear(&listener(), &running_player(4.0), &senses(env, &config)));
    }

    #[test]
    fn nothing_is_heard_past_the_radius() {
        let config = AiConfig::default();
        let ear = listener();
        let far = running_player(ear.senses.hearing_radius + 0.01);
        assert!(!can_hear(&ear, &far, &senses(AiEnv::open_ground(), &config)));
    }

    #[test]
    fn acute_hearing_amplifies() {
        let config = AiConfig::default();
        let mut ear = listener();
        let plain = perceived_loudness(&ear, 3.0, 5.0, &config);
        ear.career.acute_hearing = true;
        let acute = perceived_loudness(&ear, 3.0, 5.0, &config);
        ear.career.improved_acute_hearing = true;
        let improved = perceived_loudness(&ear, 3.0, 5.0, &config);
        assert!(plain < acute && acute < improved);
    }

    #[test]
    fn stealth_chance_is_bounded_by_luck() {
        let mut sneak = Agent::player(Vec3::ZERO);
        sneak.attributes.luck = 50;
        assert_eq!(stealth_chance(&sneak, 0.01), 5);

        sneak.skills.set(crate::state::Skill::Stealth, 100);
        assert_eq!(stealth_chance(&sneak, 1.0e6), 95);
    }
}
