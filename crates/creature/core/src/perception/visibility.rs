//! Whether an observer picks a target out of its surroundings.
//!
//! Two tests run against the same threshold. The direct test asks how bright
//! and opaque the target looks under the light falling on it. The silhouette
//! test asks how well the target stands out against whatever lies behind it.
//! Both are scaled by stealth and by how much the target sweeps across the
//! observer's view.

use glam::Vec3;

use super::SenseContext;
use crate::config::AiConfig;
use crate::geometry::{Color, angle_degrees};
use crate::state::{Agent, Conditions, Team};

const SHADE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.12);
const INVISIBLE_ALPHA_DIVISOR: f32 = 25.0;
const BLENDING_ALPHA_DIVISOR: f32 = 10.0;
const BACKGROUND_OFFSET: f32 = 0.01;
const BACKGROUND_RAY_RANGE: f32 = 1000.0;

/// Visibility a target must exceed to be seen at `distance`.
///
/// Grows with the log of distance; sharper eyes and wariness lower it.
pub fn detection_threshold(distance: f32, acuity: f32, wary: bool, config: &AiConfig) -> f32 {
    let wariness = if wary { config.wary_multiplier } else { 1.0 };
    distance.log10() / config.threshold_divisor / wariness / acuity
}

/// Multipliers shared by both visibility tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exposure {
    pub stealth: f32,
    pub movement: f32,
    pub crouch: f32,
}

impl Exposure {
    pub fn of(observer: &Agent, target: &Agent, config: &AiConfig) -> Self {
        let velocity = target.motor.map_or(Vec3::ZERO, |m| m.velocity);
        let toward_observer = (observer.position - target.position).normalize_or_zero();
        let angle = angle_degrees(toward_observer, velocity).max(config.minimum_movement_angle);
        let movement =
            1.0 + angle.to_radians().sin() * velocity.length() / config.movement_exposure_divisor;

        // log10 of 1 is zero; the floor keeps untrained targets finite.
        let stealth_skill = (target.stealth() as f32).max(2.0);
        let stealth = 1.5 / stealth_skill.log10();

        let crouching = target.is_player() && target.motor.is_some_and(|m| m.crouching);
        let crouch = if crouching { config.crouch_modifier } else { 1.0 };

        Self {
            stealth,
            movement,
            crouch,
        }
    }
}

/// The target's apparent color under `lighting`, alpha included.
pub fn apparent_color(target: &Agent, lighting: Color) -> Color {
    let shade = target.conditions.contains(Conditions::SHADE);
    let mut color = if shade {
        SHADE_COLOR
    } else {
        target.appearance
    };

    if target.conditions.contains(Conditions::INVISIBLE) {
        color.a = (1.0 - lighting.grayscale()) / INVISIBLE_ALPHA_DIVISOR;
    } else if target.conditions.contains(Conditions::BLENDING) {
        color.a = (1.0 - lighting.grayscale()) / BLENDING_ALPHA_DIVISOR;
    } else if !shade {
        color = color * lighting;
    }

    // Spellcasting lights the player up.
    if target.is_player() && target.motor.is_some_and(|m| m.casting) {
        color = Color::GRAY;
    }
    color
}

pub fn direct_visibility(color: Color, exposure: Exposure) -> f32 {
    color.grayscale() * color.a * exposure.stealth * exposure.movement * exposure.crouch
}

/// Light on whatever lies behind the target along the observer's gaze. A miss
/// means open sky.
pub fn background_light(observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> Color {
    let torso = target.torso();
    let Some(gaze) = (torso - observer.eye()).try_normalize() else {
        return Color::WHITE * senses.env.daylight_or_dark();
    };
    match senses.env.raycast_or_miss(torso, gaze, BACKGROUND_RAY_RANGE) {
        Some(hit) => senses
            .env
            .light_or_gray(hit.point - gaze * BACKGROUND_OFFSET),
        None => Color::WHITE * senses.env.daylight_or_dark(),
    }
}

pub fn silhouette_visibility(
    color: Color,
    background_light: Color,
    exposure: Exposure,
    config: &AiConfig,
) -> f32 {
    let background = background_light * config.background_reflectance;
    let contrast = color.over(background).contrast(background);
    contrast * exposure.stealth * exposure.movement / config.silhouette_divisor
}

/// Undead cannot look at anyone standing near a player's holy candle.
pub fn holy_ward_blocks(observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
    if observer.team != Team::Undead {
        return false;
    }
    let Some(player) = senses.player else {
        return false;
    };
    player.light_source.is_some_and(|light| light.holy)
        && target.position.distance(player.position) < senses.config.holy_ward_radius
}

/// Full sight check.
///
/// `line_of_sight` is the host's own occlusion and view-cone test; it runs
/// after the point-blank shortcut and before anything else. A target without
/// a motor is never seen.
pub fn can_see(
    observer: &Agent,
    target: &Agent,
    senses: &SenseContext<'_>,
    line_of_sight: impl FnOnce() -> bool,
) -> bool {
    let config = senses.config;
    if target.motor.is_none() {
        return false;
    }

    let distance = observer.position.distance(target.position);
    if distance < config.point_blank_distance {
        return true;
    }
    if !line_of_sight() {
        return false;
    }
    if holy_ward_blocks(observer, target, senses) {
        return false;
    }
    if observer.senses.acuity.is_infinite() {
        return true;
    }
    if distance < config.auto_detect_distance {
        return true;
    }

    let wary = observer.mind.perception.is_wary;
    let threshold = detection_threshold(distance, observer.senses.acuity.value(), wary, config);
    let exposure = Exposure::of(observer, target, config);
    let color = apparent_color(target, senses.env.light_or_gray(target.torso()));

    if direct_visibility(color, exposure) > threshold {
        return true;
    }

    let behind = background_light(observer, target, senses);
    silhouette_visibility(color, behind, exposure, config) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AiEnv, Env, LightingOracle, OracleError};
    use crate::perception::SightAcuity;
    use crate::state::{AgentKind, EntityId, LightSource, SpeciesId};

    struct Uniform(Color);
    impl LightingOracle for Uniform {
        fn light_at(&self, _point: Vec3) -> Result<Color, OracleError> {
            Ok(self.0)
        }
        fn daylight(&self) -> f32 {
            0.0
        }
    }

    fn observer(acuity: SightAcuity) -> Agent {
        let mut a = Agent::new(EntityId(1), AgentKind::Monster, SpeciesId::ORC, Team::Orcs);
        a.senses.acuity = acuity;
        a
    }

    fn player_at(z: f32) -> Agent {
        Agent::player(Vec3::new(0.0, 0.0, z))
    }

    fn senses<'a>(env: AiEnv<'a>, config: &'a AiConfig) -> SenseContext<'a> {
        SenseContext {
            env,
            config,
            player: None,
        }
    }

    #[test]
    fn threshold_rises_with_distance_and_falls_with_wariness() {
        let config = AiConfig::default();
        let near = detection_threshold(5.0, 1.0, false, &config);
        let far = detection_threshold(50.0, 1.0, false, &config);
        assert!(far > near);
        assert!(detection_threshold(50.0, 1.0, true, &config) < far);
        assert!(detection_threshold(50.0, 2.0, false, &config) < far);
    }

    #[test]
    fn bright_player_is_seen_dark_player_is_not() {
        let config = AiConfig::default();
        let lit = Uniform(Color::WHITE);
        let dark = Uniform(Color::BLACK);
        let eye = observer(SightAcuity::Finite(1.0));
        let mut player = player_at(30.0);
        player.skills.set(crate::state::Skill::Stealth, 60);

        let env: AiEnv<'_> = Env::new(Some(&lit as &dyn LightingOracle), None, None);
        assert!(can_see(&eye, &player, &senses(env, &config), || true));

        let env: AiEnv<'_> = Env::new(Some(&dark as &dyn LightingOracle), None, None);
        assert!(!can_see(&eye, &player, &senses(env, &config), || true));
    }

    #[test]
    fn omniscient_eyes_ignore_light_but_not_walls() {
        let config = AiConfig::default();
        let dark = Uniform(Color::BLACK);
        let env: AiEnv<'_> = Env::new(Some(&dark as &dyn LightingOracle), None, None);
        let eye = observer(SightAcuity::Infinite);
        let mut player = player_at(40.0);
        player.conditions |= Conditions::INVISIBLE;

        assert!(can_see(&eye, &player, &senses(env, &config), || true));
        assert!(!can_see(&eye, &player, &senses(env, &config), || false));
    }

    #[test]
    fn point_blank_skips_line_of_sight() {
        let config = AiConfig::default();
        let eye = observer(SightAcuity::Finite(0.1));
        let player = player_at(0.5);
        assert!(can_see(&eye, &player, &senses(AiEnv::empty(), &config), || false));
    }

    #[test]
    fn motorless_target_is_never_seen() {
        let config = AiConfig::default();
        let eye = observer(SightAcuity::Infinite);
        let mut target = player_at(0.5);
        target.motor = None;
        assert!(!can_see(&eye, &target, &senses(AiEnv::empty(), &config), || true));
    }

    #[test]
    fn holy_candle_blinds_undead() {
        let config = AiConfig::default();
        let mut ghoul = observer(SightAcuity::Infinite);
        ghoul.team = Team::Undead;
        let mut player = player_at(10.0);
        player.light_source = Some(LightSource::holy_candle());

        let ctx = SenseContext {
            env: AiEnv::empty(),
            config: &config,
            player: Some(&player),
        };
        assert!(!can_see(&ghoul, &player, &ctx, || true));

        ghoul.team = Team::Orcs;
        assert!(can_see(&ghoul, &player, &ctx, || true));
    }

    #[test]
    fn crossing_movement_is_more_visible_than_approach() {
        let config = AiConfig::default();
        let eye = observer(SightAcuity::Finite(1.0));
        let mut crossing = player_at(20.0);
        let mut approaching = player_at(20.0);
        if let Some(m) = crossing.motor.as_mut() {
            m.velocity = Vec3::new(4.0, 0.0, 0.0);
        }
        if let Some(m) = approaching.motor.as_mut() {
            m.velocity = Vec3::new(0.0, 0.0, -4.0);
        }
        let a = Exposure::of(&eye, &crossing, &config).movement;
        let b = Exposure::of(&eye, &approaching, &config).movement;
        assert!(a > b);
    }
}
