use glam::Vec3;

use crate::config::AiConfig;
use crate::env::{AiEnv, GameTime};
use crate::magic::Spell;
use crate::perception::SenseContext;
use crate::state::{Agent, EntityId, Roster};

/// Something the host should carry out on the agent's behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Release `spell`. `None` targets the caster or the area around it.
    Cast {
        spell: Spell,
        target: Option<EntityId>,
    },
    /// Stop fighting.
    Surrender,
    MoveToward { destination: Vec3 },
    Melee { target: EntityId },
}

/// The pipeline step that ended a decision tick.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Step {
    Surrender,
    FallingSpell,
    FreeAction,
    CombatPrep,
    Light,
    Heal,
    Levitate,
}

/// Mutable view of one agent's decision tick.
///
/// The agent is borrowed exclusively; everyone else is visible read-only
/// through `others`. Emitted actions accumulate in `actions` for the host to
/// apply once the tick is over.
pub struct DecisionContext<'a> {
    pub agent: &'a mut Agent,
    pub others: &'a Roster,
    pub senses: SenseContext<'a>,
    pub time: GameTime,
    pub actions: Vec<Action>,
    pub outcome: Option<Step>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(agent: &'a mut Agent, others: &'a Roster, senses: SenseContext<'a>, time: GameTime) -> Self {
        Self {
            agent,
            others,
            senses,
            time,
            actions: Vec::new(),
            outcome: None,
        }
    }

    pub fn config(&self) -> &'a AiConfig {
        self.senses.config
    }

    pub fn env(&self) -> AiEnv<'a> {
        self.senses.env
    }

    /// The agent's current target, if it is still alive.
    ///
    /// Steps call this each time they need the target rather than caching it,
    /// so a target that died earlier in the tick is never acted on.
    pub fn target(&self) -> Option<&'a Agent> {
        let others: &'a Roster = self.others;
        self.agent
            .mind
            .perception
            .target
            .and_then(|id| others.living(id))
    }

    /// Living target that the agent currently knows about.
    pub fn detected_target(&self) -> Option<&'a Agent> {
        if !self.agent.mind.perception.detected {
            return None;
        }
        self.target()
    }

    /// Uniform `[0, width)` roll against the frame delta.
    ///
    /// Over many frames this fires after about `width / 2` seconds on
    /// average, which spreads otherwise simultaneous reactions apart.
    pub fn delay_gate(&mut self, width: f32) -> bool {
        self.agent.mind.rng.range_f32(0.0, width) <= self.time.delta
    }

    pub fn emit(&mut self, action: Action) {
        self.actions.push(action);
    }
}
