//! The seam between this crate and the host's creature controller.
//!
//! The host keeps a [`BaselineBehavior`] of its own (movement, melee, its
//! original sensory checks). A [`CreaturePolicy`] wraps it: the host calls
//! the policy wherever it used to call its defaults, and the policy decides
//! when to chain through.

use std::sync::Arc;

use crate::decision::{DecisionContext, DecisionEngine, Step};
use crate::geometry::angle_degrees;
use crate::perception::{SenseContext, can_hear, can_see};
use crate::state::{Agent, EntityId};

/// Line of sight inside the observer's sight radius and view cone.
pub fn line_of_sight(observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
    let offset = target.position - observer.position;
    if offset.length() > observer.senses.sight_radius {
        return false;
    }
    if angle_degrees(observer.facing, offset) > observer.mind.perception.field_of_view / 2.0 {
        return false;
    }
    senses.env.line_clear_or_blocked(observer.eye(), target.torso())
}

/// The host's default creature logic.
pub trait BaselineBehavior: Send + Sync {
    /// Default movement and attack logic for one tick.
    fn take_action(&self, ctx: &mut DecisionContext<'_>);

    fn can_see_target(&self, observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
        line_of_sight(observer, target, senses)
    }

    fn can_hear_target(&self, _listener: &Agent, _target: &Agent, _senses: &SenseContext<'_>) -> bool {
        false
    }

    fn can_detect_otherwise(&self, _observer: &Agent, _target: &Agent, _senses: &SenseContext<'_>) -> bool {
        false
    }
}

/// Callbacks the host routes through in place of its defaults.
pub trait CreaturePolicy: Send + Sync {
    /// Runs the decision pipeline; returns the step that fired.
    fn take_action(&self, ctx: &mut DecisionContext<'_>) -> Option<Step>;

    /// On `true`, the agent's `selected_spell` holds the spell to throw.
    fn can_cast_ranged_spell(&self, ctx: &mut DecisionContext<'_>, target: EntityId) -> bool;

    /// On `true`, the agent's `selected_spell` holds the spell to touch with.
    fn can_cast_touch_spell(&self, ctx: &mut DecisionContext<'_>, target: EntityId) -> bool;

    fn can_see_target(&self, observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool;

    fn can_hear_target(&self, listener: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool;

    fn can_detect_otherwise(&self, observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool;

    /// Concealment is part of the visibility model, so the host's own
    /// concealment check never blocks anything.
    fn blocked_by_concealment(&self, _observer: &Agent, _target: &Agent) -> bool {
        false
    }
}

/// The policy every creature runs.
pub struct MonsterPolicy {
    baseline: Arc<dyn BaselineBehavior>,
    engine: DecisionEngine,
}

impl MonsterPolicy {
    pub fn new(baseline: Arc<dyn BaselineBehavior>) -> Self {
        let engine = DecisionEngine::new(Arc::clone(&baseline));
        Self { baseline, engine }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }
}

impl CreaturePolicy for MonsterPolicy {
    fn take_action(&self, ctx: &mut DecisionContext<'_>) -> Option<Step> {
        self.engine.run(ctx)
    }

    fn can_cast_ranged_spell(&self, ctx: &mut DecisionContext<'_>, target: EntityId) -> bool {
        ctx.can_cast_ranged_spell(target)
    }

    fn can_cast_touch_spell(&self, ctx: &mut DecisionContext<'_>, target: EntityId) -> bool {
        ctx.can_cast_touch_spell(target)
    }

    fn can_see_target(&self, observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
        can_see(observer, target, senses, || {
            self.baseline.can_see_target(observer, target, senses)
        })
    }

    fn can_hear_target(&self, listener: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
        can_hear(listener, target, senses) || self.baseline.can_hear_target(listener, target, senses)
    }

    fn can_detect_otherwise(&self, observer: &Agent, target: &Agent, senses: &SenseContext<'_>) -> bool {
        self.baseline.can_detect_otherwise(observer, target, senses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::env::AiEnv;
    use crate::state::{AgentKind, SpeciesId, Team};
    use glam::Vec3;

    fn orc() -> Agent {
        Agent::new(EntityId(2), AgentKind::Monster, SpeciesId::ORC, Team::Orcs)
    }

    #[test]
    fn view_cone_limits_line_of_sight() {
        let config = AiConfig::default();
        let senses = SenseContext::new(AiEnv::open_ground(), &config, None);
        let mut eye = orc();
        eye.mind.perception.field_of_view = 90.0;

        let ahead = Agent::player(Vec3::new(0.0, 0.0, 10.0));
        let behind = Agent::player(Vec3::new(0.0, 0.0, -10.0));
        assert!(line_of_sight(&eye, &ahead, &senses));
        assert!(!line_of_sight(&eye, &behind, &senses));

        let far = Agent::player(Vec3::new(0.0, 0.0, eye.senses.sight_radius + 1.0));
        assert!(!line_of_sight(&eye, &far, &senses));
    }

    #[test]
    fn no_physics_means_no_line_of_sight() {
        let config = AiConfig::default();
        let senses = SenseContext::new(AiEnv::empty(), &config, None);
        let eye = orc();
        let ahead = Agent::player(Vec3::new(0.0, 0.0, 10.0));
        assert!(!line_of_sight(&eye, &ahead, &senses));
    }
}
