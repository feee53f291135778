//! Per-tick perception update and the ally alert broadcast.

use tracing::{debug, info};

use super::SenseContext;
use crate::env::GameTime;
use crate::magic::{EffectKey, Relation, relation};
use crate::policy::CreaturePolicy;
use crate::state::{Agent, Awareness, EntityId, Roster};

/// What changed during one perception update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerceptionReport {
    /// A new target was picked this tick.
    pub acquired: Option<EntityId>,
    /// The agent went from not seeing its target to seeing it.
    pub became_aware: bool,
    /// The agent lost its target, through death or fading memory.
    pub forgot: bool,
    /// Passive light detection forced the player into view.
    pub lit_up: bool,
}

/// Drives an agent's [`PerceptionState`](crate::state::PerceptionState)
/// between unaware, wary and aware.
pub struct PerceptionController;

impl PerceptionController {
    /// Runs one perception tick for `agent` against everyone in `others`.
    ///
    /// The agent must not be in `others`.
    pub fn update<P>(
        agent: &mut Agent,
        others: &Roster,
        senses: &SenseContext<'_>,
        policy: &P,
        time: GameTime,
    ) -> PerceptionReport
    where
        P: CreaturePolicy + ?Sized,
    {
        let mut report = PerceptionReport::default();
        let was = agent.mind.perception.awareness();

        Self::validate_target(agent, others, senses.config.target_memory, time, &mut report);

        if !agent.mind.perception.detected {
            Self::acquire_target(agent, others, &mut report);
        }

        let target = agent
            .mind
            .perception
            .target
            .and_then(|id| others.living(id));
        match target {
            Some(target) => Self::sense(agent, target, senses, policy, time),
            None => agent.mind.perception.in_sight = false,
        }

        if time.every(senses.config.light_detection_period) && Self::detect_by_light(agent, senses) {
            report.lit_up = true;
            agent.mind.perception.last_sensed_at = time.now;
        }

        let perception = &mut agent.mind.perception;
        perception.is_wary = perception.detected && !perception.in_sight;
        perception.field_of_view = agent.senses.field_of_view(perception.is_wary);

        let now = perception.awareness();
        if now == Awareness::Aware && was != Awareness::Aware {
            report.became_aware = true;
            debug!(agent = %agent.id, target = ?perception.target, "target in sight");
        }
        report
    }

    fn validate_target(
        agent: &mut Agent,
        others: &Roster,
        memory: f32,
        time: GameTime,
        report: &mut PerceptionReport,
    ) {
        let perception = &mut agent.mind.perception;
        let Some(id) = perception.target else {
            return;
        };

        let stale = perception.detected
            && !perception.in_sight
            && time.now - perception.last_sensed_at > f64::from(memory);
        if others.living(id).is_none() || stale {
            debug!(agent = %agent.id, target = %id, stale, "forgetting target");
            perception.forget();
            report.forgot = true;
        }
    }

    fn acquire_target(agent: &mut Agent, others: &Roster, report: &mut PerceptionReport) {
        let closest = others
            .within(agent.position, agent.senses.sight_radius)
            .filter(|other| relation(agent, other) == Relation::Opponent)
            .min_by(|a, b| agent.distance_to(a).total_cmp(&agent.distance_to(b)))
            .map(|other| other.id);

        if closest.is_some() && closest != agent.mind.perception.target {
            report.acquired = closest;
        }
        agent.mind.perception.target = closest;
    }

    fn sense<P>(agent: &mut Agent, target: &Agent, senses: &SenseContext<'_>, policy: &P, time: GameTime)
    where
        P: CreaturePolicy + ?Sized,
    {
        if policy.can_see_target(agent, target, senses) {
            let perception = &mut agent.mind.perception;
            perception.detected = true;
            perception.in_sight = true;
            perception.mark_position(target.position);
            perception.last_sensed_at = time.now;
            return;
        }

        agent.mind.perception.in_sight = false;
        if policy.can_hear_target(agent, target, senses)
            || policy.can_detect_otherwise(agent, target, senses)
        {
            let perception = &mut agent.mind.perception;
            perception.detected = true;
            perception.last_sensed_at = time.now;
        }
    }

    /// A player carrying or casting a light gives away their position to
    /// anything whose eyes the light reaches.
    fn detect_by_light(agent: &mut Agent, senses: &SenseContext<'_>) -> bool {
        let config = senses.config;
        let Some(player) = senses.player else {
            return false;
        };
        if agent.mind.perception.detected || relation(agent, player) != Relation::Opponent {
            return false;
        }

        let distance = agent.distance_to(player);
        if distance > config.light_detection_max_distance {
            return false;
        }

        let range = match player.light_source {
            Some(light) => light.range,
            None if player.effects.has(EffectKey::Light) || player.effects.has(EffectKey::MageLight) => {
                config.default_light_range
            }
            None => return false,
        };
        let reach = (range - config.light_detection_margin).min(agent.senses.sight_radius);
        if distance > reach {
            return false;
        }

        if !senses.env.line_clear_or_blocked(agent.eye(), player.torso()) {
            return false;
        }

        let perception = &mut agent.mind.perception;
        perception.target = Some(player.id);
        perception.detected = true;
        perception.in_sight = true;
        perception.mark_position(player.position);
        info!(agent = %agent.id, distance, "spotted the player's light");
        true
    }
}

/// Alerts idle teammates of `alerter` about its target.
///
/// Teammates within the alert radius that have no target of their own and an
/// unobstructed line to the alerter adopt the target along with the
/// alerter's last known position. Returns the alerted ids.
pub fn alert_allies(alerter: &Agent, others: &mut Roster, senses: &SenseContext<'_>) -> Vec<EntityId> {
    let Some(target) = alerter.mind.perception.target else {
        return Vec::new();
    };
    let last_known = alerter.mind.perception.last_known;
    let radius = senses.config.ally_alert_radius;

    let mut alerted = Vec::new();
    for ally in others.iter_mut() {
        if ally.team != alerter.team
            || ally.id == target
            || !ally.is_alive()
            || ally.mind.perception.target.is_some()
            || ally.distance_to(alerter) > radius
        {
            continue;
        }
        if !senses.env.line_clear_or_blocked(ally.eye(), alerter.eye()) {
            continue;
        }

        let perception = &mut ally.mind.perception;
        perception.target = Some(target);
        perception.detected = true;
        perception.last_known = last_known;
        perception.predicted = last_known;
        alerted.push(ally.id);
    }

    if !alerted.is_empty() {
        debug!(alerter = %alerter.id, count = alerted.len(), "alerted allies");
    }
    alerted
}
