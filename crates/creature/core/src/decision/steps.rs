//! Gates and action nodes that make up the decision pipeline.
//!
//! Gates are plain functions lifted into [`Condition`] nodes; they only read
//! the context. Anything that rolls dice or emits actions is a node struct.

use std::sync::Arc;

use behavior_tree::{Behavior, Condition, Status};
use glam::Vec3;
use tracing::{debug, info};

use super::{Action, CastError, DecisionContext, Step};
use crate::config::AiConfig;
use crate::env::PhysicsOracle;
use crate::error::AiError;
use crate::magic::{EffectKey, Relation, Spell, SpellRole, relation};
use crate::policy::BaselineBehavior;
use crate::state::{AgentKind, Conditions, SpeciesId, Team};

pub(super) type Node = Box<dyn for<'a> Behavior<DecisionContext<'a>>>;

/// Monster species that may give up a fight.
const SURRENDERING_SPECIES: [SpeciesId; 14] = [
    SpeciesId::CENTAUR,
    SpeciesId::DRAGONLING,
    SpeciesId::DREUGH,
    SpeciesId::GARGOYLE,
    SpeciesId::GRIZZLY_BEAR,
    SpeciesId::HARPY,
    SpeciesId::IMP,
    SpeciesId::LAMIA,
    SpeciesId::NYMPH,
    SpeciesId::ORC,
    SpeciesId::ORC_SERGEANT,
    SpeciesId::ORC_SHAMAN,
    SpeciesId::ORC_WARLORD,
    SpeciesId::SPRIGGAN,
];

pub(super) fn gate(predicate: fn(&DecisionContext<'_>) -> bool) -> Node {
    Box::new(Condition::new(predicate))
}

fn refused(ctx: &DecisionContext<'_>, err: CastError) -> Status {
    debug!(agent = %ctx.agent.id, code = err.error_code(), "cast refused");
    Status::Failure
}

fn cast_status(ctx: &DecisionContext<'_>, result: Result<(), CastError>) -> Status {
    match result {
        Ok(()) => Status::Success,
        Err(err) => refused(ctx, err),
    }
}

/// Records which step ended the tick.
pub(super) struct Mark(pub Step);

impl Behavior<DecisionContext<'_>> for Mark {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        ctx.outcome = Some(self.0);
        Status::Success
    }
}

/// Random reaction delay whose width comes from the configuration.
pub(super) struct DelayGate(pub fn(&AiConfig) -> f32);

impl Behavior<DecisionContext<'_>> for DelayGate {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let width = (self.0)(ctx.config());
        Status::from_bool(ctx.delay_gate(width))
    }
}

/// Casts a random spell from one bucket on the caster itself.
pub(super) struct CastOnSelf(pub SpellRole);

impl Behavior<DecisionContext<'_>> for CastOnSelf {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let result = ctx.cast_role(self.0, None);
        cast_status(ctx, result)
    }
}

/// The host's own per-tick behavior.
pub(super) struct RunBaseline(pub Arc<dyn BaselineBehavior>);

impl Behavior<DecisionContext<'_>> for RunBaseline {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        self.0.take_action(ctx);
        Status::Success
    }
}

// ===== surrender =====

pub(super) fn may_surrender(ctx: &DecisionContext<'_>) -> bool {
    let agent = &*ctx.agent;
    let config = ctx.config();

    if !agent.can_act() || agent.is_busy() {
        return false;
    }
    if !agent.health.at_or_below(config.surrender_health_fraction) {
        return false;
    }
    let last_stand = agent.mind.spellbook.has(SpellRole::HealSelf)
        && agent.magicka.current > config.last_stand_magicka;
    if last_stand || agent.quest_critical {
        return false;
    }
    // Half of all creatures fight to the death, the same half every load.
    if agent.load_id % 2 == 0 {
        return false;
    }

    match agent.kind {
        AgentKind::Class => {
            agent.species != SpeciesId::KNIGHT && agent.species != SpeciesId::BARBARIAN
        }
        _ => SURRENDERING_SPECIES.contains(&agent.species),
    }
}

pub(super) struct Surrender;

impl Behavior<DecisionContext<'_>> for Surrender {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let agent = &mut *ctx.agent;
        if agent.team != Team::PlayerAlly {
            agent.hostile = false;
        }
        info!(agent = %agent.id, health = agent.health.current, "surrendering");
        ctx.emit(Action::Surrender);

        if !ctx.agent.conditions.is_concealed() {
            let spell = escape_spell(ctx);
            if let Err(err) = ctx.cast_spell(spell, None) {
                debug!(agent = %ctx.agent.id, code = err.error_code(), "no escape spell");
            }
        }
        Status::Success
    }
}

/// Shadow only hides someone standing in the dark; otherwise any escape
/// spell will do.
fn escape_spell(ctx: &mut DecisionContext<'_>) -> Option<Spell> {
    let dark = ctx.env().player_in_darkness();
    let mind = &mut ctx.agent.mind;
    let bucket = mind.spellbook.get(SpellRole::Escape);

    let shadows: Vec<_> = bucket
        .iter()
        .filter(|s| s.key().is_some_and(EffectKey::is_shadow))
        .collect();
    if dark && !shadows.is_empty() {
        return Some(shadows[mind.rng.index(shadows.len())].clone());
    }
    mind.spellbook.pick(SpellRole::Escape, &mut mind.rng).cloned()
}

// ===== falling =====

pub(super) fn in_freefall(ctx: &DecisionContext<'_>) -> bool {
    let agent = &*ctx.agent;
    let Some(motor) = agent.motor else {
        return false;
    };
    let mitigated = Conditions::SLOW_FALLING | Conditions::LEVITATING | Conditions::PARALYZED;
    motor.falls
        && !motor.grounded
        && !motor.levitating
        && !agent.conditions.intersects(mitigated)
        && motor.last_grounded_y - agent.position.y >= ctx.config().fall_height_threshold
}

// ===== free action =====

pub(super) fn paralyzed_with_remedy(ctx: &DecisionContext<'_>) -> bool {
    let agent = &*ctx.agent;
    agent.conditions.contains(Conditions::PARALYZED)
        && !agent.is_busy()
        && agent.mind.spellbook.has(SpellRole::FreeAction)
}

// ===== combat prep =====

pub(super) fn ready_for_combat_prep(ctx: &DecisionContext<'_>) -> bool {
    let agent = &*ctx.agent;
    if !agent.can_act() || agent.is_busy() || agent.team == Team::PlayerAlly {
        return false;
    }
    let Some(buff) = agent.mind.spellbook.combat_prep() else {
        return false;
    };
    let Some(target) = ctx.detected_target() else {
        return false;
    };
    if agent.mind.prepared_against == Some(target.id) {
        return false;
    }
    if buff.key().is_some_and(|key| agent.effects.has(key)) {
        return false;
    }
    // No point buffing against something that cannot be reached.
    ctx.env().line_clear_or_blocked(agent.eye(), target.torso())
}

pub(super) struct PrepareForCombat;

impl Behavior<DecisionContext<'_>> for PrepareForCombat {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let Some(target) = ctx.detected_target() else {
            return Status::Failure;
        };
        let buff = ctx.agent.mind.spellbook.combat_prep().cloned();
        match ctx.cast_spell(buff, None) {
            Ok(()) => {
                ctx.agent.mind.prepared_against = Some(target.id);
                Status::Success
            }
            Err(err) => refused(ctx, err),
        }
    }
}

// ===== light =====

pub(super) fn needs_light(ctx: &DecisionContext<'_>) -> bool {
    let config = ctx.config();
    let agent = &*ctx.agent;
    if !ctx.time.every(config.light_check_period) || !agent.mind.spellbook.has(SpellRole::Light) {
        return false;
    }
    if agent.effects.has(EffectKey::Light) || agent.effects.has(EffectKey::MageLight) {
        return false;
    }
    let Some(last_known) = ctx
        .detected_target()
        .and(agent.mind.perception.last_known)
    else {
        return false;
    };
    ctx.env().light_or_gray(last_known).grayscale() < config.light_threshold
}

// ===== healing =====

/// Area heal, self heal, then cure, no more often than the heal cooldown
/// allows.
pub(super) struct Heal;

impl Heal {
    fn area_heal_wanted(ctx: &DecisionContext<'_>) -> bool {
        let agent = &*ctx.agent;
        let config = ctx.config();
        if !agent.mind.spellbook.has(SpellRole::HealArea) {
            return false;
        }

        let mut needy_allies = 0;
        let mut enemies = 0;
        for other in ctx.others.within(agent.position, config.area_radius) {
            match relation(agent, other) {
                Relation::Friend if other.health.below(config.area_heal_need_fraction) => {
                    needy_allies += 1
                }
                Relation::Opponent => enemies += 1,
                _ => {}
            }
        }
        needy_allies > 0 && enemies == 0
    }

    fn cure(ctx: &DecisionContext<'_>) -> Option<Spell> {
        let agent = &*ctx.agent;
        let wanted = |key: EffectKey| match key {
            EffectKey::CurePoison => agent.conditions.contains(Conditions::POISONED),
            EffectKey::CureDisease => agent.conditions.contains(Conditions::DISEASED),
            _ => false,
        };
        agent
            .mind
            .spellbook
            .get(SpellRole::Cure)
            .iter()
            .find(|spell| spell.key().is_some_and(wanted))
            .cloned()
    }
}

impl Behavior<DecisionContext<'_>> for Heal {
    fn tick(&self, ctx: &mut DecisionContext<'_>) -> Status {
        let config = ctx.config();
        if ctx.time.now < ctx.agent.mind.next_heal_check {
            return Status::Failure;
        }
        let cooldown = ctx
            .agent
            .mind
            .rng
            .range_f32(config.heal_cooldown_min, config.heal_cooldown_max);
        ctx.agent.mind.next_heal_check = ctx.time.now + f64::from(cooldown);

        if !ctx.agent.can_act() || ctx.agent.is_busy() {
            return Status::Failure;
        }

        if Self::area_heal_wanted(ctx) {
            let result = ctx.cast_role(SpellRole::HealArea, None);
            return cast_status(ctx, result);
        }

        if ctx.agent.health.at_or_below(config.self_heal_fraction)
            && ctx.agent.mind.spellbook.has(SpellRole::HealSelf)
        {
            let result = ctx.cast_role(SpellRole::HealSelf, None);
            return cast_status(ctx, result);
        }

        if ctx.agent.conditions.is_afflicted() {
            let cure = Self::cure(ctx);
            if cure.is_some() {
                let result = ctx.cast_spell(cure, None);
                return cast_status(ctx, result);
            }
        }
        Status::Failure
    }
}

// ===== levitation =====

pub(super) fn needs_levitation(ctx: &DecisionContext<'_>) -> bool {
    let agent = &*ctx.agent;
    let config = ctx.config();
    let Some(motor) = agent.motor else {
        return false;
    };
    if motor.levitating
        || agent.conditions.contains(Conditions::LEVITATING)
        || !agent.mind.perception.in_sight
        || !agent.mind.spellbook.has(SpellRole::Levitate)
    {
        return false;
    }
    let (Some(target), Some(last_known)) = (ctx.detected_target(), agent.mind.perception.last_known)
    else {
        return false;
    };
    if (target.position.y - agent.position.y).abs() < config.levitate_vertical_threshold {
        return false;
    }

    match ctx.env().physics() {
        Ok(physics) => !walkable(
            physics,
            agent.position,
            last_known,
            config.path_sample_step,
            config.max_step_height,
        ),
        Err(_) => motor.obstacle_detected,
    }
}

/// Samples the ground along the straight line from `from` to `to` and
/// rejects missing ground or steps taller than `max_step`.
pub fn walkable(physics: &dyn PhysicsOracle, from: Vec3, to: Vec3, step: f32, max_step: f32) -> bool {
    let flat = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    let samples = (flat.length() / step.max(f32::EPSILON)).ceil().max(1.0) as usize;
    let sample_y = from.y.max(to.y) + max_step;

    let Some(mut previous) = physics.ground_height(Vec3::new(from.x, sample_y, from.z)) else {
        return false;
    };
    for i in 1..=samples {
        let point = from + flat * (i as f32 / samples as f32);
        let Some(height) = physics.ground_height(Vec3::new(point.x, sample_y, point.z)) else {
            return false;
        };
        if (height - previous).abs() > max_step {
            return false;
        }
        previous = height;
    }
    true
}
