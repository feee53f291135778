//! Skirmish layout loader.
//!
//! A skirmish places the player and a handful of creatures on flat ground,
//! with optional wall boxes and point lights for the reference host.

use std::path::Path;

use creature_core::state::{Attributes, LightSource, Skills};
use creature_core::{
    Agent, AgentKind, CustomSpell, EntityId, ResourceMeter, SpeciesId, SpellCatalog, Team,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn default_daylight() -> f32 {
    1.0
}

fn default_health() -> u32 {
    100
}

fn default_level() -> u32 {
    1
}

fn default_facing() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

/// The player avatar's starting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub position: [f32; 3],
    #[serde(default)]
    pub velocity: [f32; 3],
    #[serde(default = "default_health")]
    pub health: u32,
    #[serde(default)]
    pub stealth: u32,
    #[serde(default)]
    pub crouching: bool,
    #[serde(default)]
    pub light: Option<LightSource>,
}

/// One creature to spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSpec {
    pub name: String,
    pub species: u16,
    pub kind: AgentKind,
    pub team: Team,
    pub position: [f32; 3],
    #[serde(default = "default_facing")]
    pub facing: [f32; 3],
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_health")]
    pub health: u32,
    #[serde(default)]
    pub magicka: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub spell_point_multiplier: Option<f32>,
    /// Classic spell ids; unknown ids become inert spells.
    #[serde(default)]
    pub spells: Vec<u16>,
    #[serde(default)]
    pub custom_spells: Vec<CustomSpell>,
    #[serde(default)]
    pub bloodless: bool,
    #[serde(default)]
    pub quest_critical: bool,
}

/// Axis-aligned box that blocks rays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WallSpec {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Point light with linear falloff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightSpec {
    pub position: [f32; 3],
    pub radius: f32,
    pub intensity: f32,
}

/// Skirmish structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skirmish {
    pub name: String,
    #[serde(default)]
    pub world_seed: u64,
    #[serde(default = "default_daylight")]
    pub daylight: f32,
    #[serde(default)]
    pub in_dungeon: bool,
    pub player: PlayerSpec,
    pub creatures: Vec<CreatureSpec>,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub lights: Vec<LightSpec>,
}

impl Skirmish {
    pub fn player_agent(&self) -> Agent {
        let spec = &self.player;
        let mut player = Agent::player(Vec3::from(spec.position));
        player.health = ResourceMeter::full(spec.health);
        player.skills.set(creature_core::Skill::Stealth, spec.stealth);
        player.light_source = spec.light;
        if let Some(motor) = player.motor.as_mut() {
            motor.velocity = Vec3::from(spec.velocity);
            motor.crouching = spec.crouching;
        }
        player
    }

    /// Creatures numbered from 1 in file order, with spells resolved
    /// against `catalog`. Spawn adjustment is left to the caller.
    pub fn creature_agents(&self, catalog: &SpellCatalog) -> Vec<Agent> {
        self.creatures
            .iter()
            .zip(1u32..)
            .map(|(spec, id)| spec.build(EntityId(id), catalog))
            .collect()
    }
}

impl CreatureSpec {
    fn build(&self, id: EntityId, catalog: &SpellCatalog) -> Agent {
        let mut agent = Agent::new(id, self.kind, SpeciesId(self.species), self.team);
        agent.position = Vec3::from(self.position);
        agent.facing = Vec3::from(self.facing).try_normalize().unwrap_or(Vec3::Z);
        agent.level = self.level;
        agent.health = ResourceMeter::full(self.health);
        agent.magicka = ResourceMeter::full(self.magicka);
        agent.attributes = self.attributes;
        agent.skills = self.skills.clone();
        agent.bloodless = self.bloodless;
        agent.quest_critical = self.quest_critical;
        if let Some(multiplier) = self.spell_point_multiplier {
            agent.career.spell_point_multiplier = multiplier;
        }
        agent.spells = self
            .spells
            .iter()
            .map(|&id| catalog.resolve_classic(id))
            .chain(self.custom_spells.iter().map(|&which| catalog.custom(which)))
            .collect();
        agent
    }
}

/// Loader for skirmish layouts from RON files.
pub struct SkirmishLoader;

impl SkirmishLoader {
    pub fn load(path: &Path) -> LoadResult<Skirmish> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Skirmish> {
        let skirmish: Skirmish = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skirmish RON: {}", e))?;

        if skirmish.creatures.is_empty() {
            anyhow::bail!("Skirmish '{}' has no creatures", skirmish.name);
        }
        for wall in &skirmish.walls {
            if (0..3).any(|axis| wall.min[axis] > wall.max[axis]) {
                anyhow::bail!("Skirmish '{}' has an inverted wall box", skirmish.name);
            }
        }
        Ok(skirmish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"
        (
            name: "gate",
            world_seed: 11,
            player: (position: (0.0, 0.0, 0.0), light: Some((range: 10.0, holy: false))),
            creatures: [
                (name: "archer", species: 141, kind: Class, team: KnightsAndMages, position: (0.0, 0.0, 12.0),
                 facing: (0.0, 0.0, -1.0), spells: [7, 999], skills: { Destruction: 60 }),
                (name: "orc", species: 7, kind: Monster, team: Orcs, position: (4.0, 0.0, 10.0)),
            ],
            walls: [(min: (-1.0, 0.0, 5.0), max: (1.0, 3.0, 6.0))],
        )
    "#;

    #[test]
    fn creatures_are_numbered_in_file_order() {
        let skirmish = SkirmishLoader::parse(LAYOUT).unwrap();
        let agents = skirmish.creature_agents(&SpellCatalog::builtin());

        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].id, EntityId(1));
        assert_eq!(agents[0].species, SpeciesId::ARCHER);
        assert_eq!(agents[0].facing, Vec3::NEG_Z);
        assert_eq!(agents[1].species, SpeciesId::ORC);
        assert_eq!(agents[1].team, Team::Orcs);
    }

    #[test]
    fn unknown_spell_ids_become_inert() {
        let skirmish = SkirmishLoader::parse(LAYOUT).unwrap();
        let archer = &skirmish.creature_agents(&SpellCatalog::builtin())[0];
        assert_eq!(archer.spells[0].name, "Wizard's Fire");
        assert!(archer.spells[1].is_inert());
    }

    #[test]
    fn player_carries_the_torch() {
        let skirmish = SkirmishLoader::parse(LAYOUT).unwrap();
        let player = skirmish.player_agent();
        assert!(player.is_player());
        assert_eq!(player.light_source, Some(LightSource::torch()));
        assert_eq!(skirmish.daylight, 1.0);
    }

    #[test]
    fn inverted_wall_is_rejected() {
        let bad = LAYOUT.replace("max: (1.0, 3.0, 6.0)", "max: (1.0, 3.0, 4.0)");
        assert!(SkirmishLoader::parse(&bad).is_err());
    }
}
