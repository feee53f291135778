use std::collections::BTreeMap;

use glam::Vec3;

use super::{Agent, EntityId};

/// All live agents, keyed by id, plus the spatial query the model needs.
///
/// During an agent's tick the scheduler takes it out with [`Roster::take`],
/// hands the rest of the roster to perception and decision code as "the
/// others", and puts the agent back with [`Roster::restore`]. Area queries
/// therefore never return the acting agent itself.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    agents: BTreeMap<EntityId, Agent>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, agent: Agent) -> Option<Agent> {
        self.agents.insert(agent.id, agent)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    /// Temporarily removes an agent for its own tick.
    pub fn take(&mut self, id: EntityId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    pub fn restore(&mut self, agent: Agent) {
        self.agents.insert(agent.id, agent);
    }

    pub fn get(&self, id: EntityId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// A living agent, or `None` for dead, despawned or unknown ids.
    pub fn living(&self, id: EntityId) -> Option<&Agent> {
        self.get(id).filter(|a| a.is_alive())
    }

    pub fn player(&self) -> Option<&Agent> {
        self.get(EntityId::PLAYER)
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.agents.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.values_mut()
    }

    /// Living agents within `radius` of `center`, in id order.
    pub fn within(&self, center: Vec3, radius: f32) -> impl Iterator<Item = &Agent> {
        self.agents
            .values()
            .filter(move |a| a.is_alive() && a.position.distance(center) <= radius)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentKind, SpeciesId, Team};

    fn rat(id: u32, x: f32) -> Agent {
        let mut a = Agent::new(EntityId(id), AgentKind::Monster, SpeciesId::RAT, Team::Beasts);
        a.position = Vec3::new(x, 0.0, 0.0);
        a
    }

    #[test]
    fn taken_agent_is_absent_from_area_queries() {
        let mut roster = Roster::new();
        roster.insert(rat(1, 0.0));
        roster.insert(rat(2, 1.0));

        let me = roster.take(EntityId(1)).expect("present");
        let near: Vec<_> = roster.within(me.position, 5.0).map(|a| a.id).collect();
        assert_eq!(near, vec![EntityId(2)]);

        roster.restore(me);
        assert_eq!(roster.within(Vec3::ZERO, 5.0).count(), 2);
    }

    #[test]
    fn dead_agents_are_not_living() {
        let mut roster = Roster::new();
        let mut corpse = rat(3, 0.0);
        corpse.health.current = 0;
        roster.insert(corpse);
        assert!(roster.get(EntityId(3)).is_some());
        assert!(roster.living(EntityId(3)).is_none());
        assert_eq!(roster.within(Vec3::ZERO, 1.0).count(), 0);
    }
}
