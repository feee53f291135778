use creature_core::{Action, EntityId, GameTime, PerceptionReport, Step};

/// What one creature did during a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentTick {
    pub agent: EntityId,
    pub perception: PerceptionReport,
    /// Pipeline step that fired, `None` when the baseline ran.
    pub step: Option<Step>,
    pub actions: Vec<Action>,
    /// Teammates that picked up this agent's target.
    pub alerted: Vec<EntityId>,
    /// Actions a critical hook refused to apply.
    pub rejected: usize,
}

impl AgentTick {
    pub(crate) fn new(agent: EntityId) -> Self {
        Self {
            agent,
            perception: PerceptionReport::default(),
            step: None,
            actions: Vec::new(),
            alerted: Vec::new(),
            rejected: 0,
        }
    }
}

/// Everything that happened in one frame, in tick order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub time: GameTime,
    pub ticks: Vec<AgentTick>,
    /// Agents whose health reached zero this frame.
    pub deaths: Vec<EntityId>,
}

impl FrameReport {
    pub fn tick(&self, agent: EntityId) -> Option<&AgentTick> {
        self.ticks.iter().find(|t| t.agent == agent)
    }

    /// Ticks where a pipeline step preempted the baseline.
    pub fn steps(&self) -> impl Iterator<Item = (EntityId, Step)> + '_ {
        self.ticks
            .iter()
            .filter_map(|t| t.step.map(|step| (t.agent, step)))
    }
}
