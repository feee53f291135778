use glam::Vec3;

use super::{
    ActiveEffects, AgentKind, Attributes, Career, Conditions, EntityId, Inventory, LightSource,
    Mind, Motor, ResourceMeter, Skills, SpeciesId, Team,
};
use crate::geometry::Color;
use crate::magic::Spell;
use crate::perception::SensorProfile;

/// Default color of a creature body under neutral light.
pub const DEFAULT_APPEARANCE: Color = Color::new(0.3, 0.3, 0.3, 1.0);

/// One creature instance, or the player avatar.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: EntityId,
    /// Stable identifier that survives save/reload.
    pub load_id: u64,
    pub kind: AgentKind,
    pub species: SpeciesId,
    pub team: Team,
    /// Hostile to the player side. Surrender clears it.
    pub hostile: bool,
    /// Quest-critical creatures never surrender.
    pub quest_critical: bool,
    /// Species without blood are immune to disease, paralysis and poison.
    pub bloodless: bool,
    pub level: u32,

    pub health: ResourceMeter,
    pub magicka: ResourceMeter,
    pub attributes: Attributes,
    pub skills: Skills,
    pub career: Career,
    pub conditions: Conditions,
    pub effects: ActiveEffects,

    pub position: Vec3,
    /// Facing direction on the horizontal plane.
    pub facing: Vec3,
    pub motor: Option<Motor>,

    pub inventory: Inventory,
    pub light_source: Option<LightSource>,
    /// Average body color; the player's comes from the paper doll.
    pub appearance: Color,

    /// Raw spell list as authored or rebuilt at spawn.
    pub spells: Vec<Spell>,
    pub senses: SensorProfile,
    pub mind: Mind,
}

impl Agent {
    pub fn new(id: EntityId, kind: AgentKind, species: SpeciesId, team: Team) -> Self {
        Self {
            id,
            load_id: id.0 as u64,
            kind,
            species,
            team,
            hostile: kind != AgentKind::Player && team != Team::PlayerAlly,
            quest_critical: false,
            bloodless: false,
            level: 1,
            health: ResourceMeter::full(100),
            magicka: ResourceMeter::default(),
            attributes: Attributes::default(),
            skills: Skills::new(),
            career: Career::default(),
            conditions: Conditions::empty(),
            effects: ActiveEffects::new(),
            position: Vec3::ZERO,
            facing: Vec3::Z,
            motor: Some(Motor::default()),
            inventory: Inventory::new(),
            light_source: None,
            appearance: DEFAULT_APPEARANCE,
            spells: Vec::new(),
            senses: SensorProfile::default(),
            mind: Mind::default(),
        }
    }

    /// The player avatar.
    pub fn player(position: Vec3) -> Self {
        let mut player = Self::new(EntityId::PLAYER, AgentKind::Player, SpeciesId(0), Team::Player);
        player.position = position;
        player.appearance = Color::GRAY;
        player
    }

    pub fn is_player(&self) -> bool {
        self.kind == AgentKind::Player
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    /// Controller allows acting this frame and nothing holds the creature.
    pub fn can_act(&self) -> bool {
        self.motor.is_some_and(|m| m.can_act) && !self.conditions.contains(Conditions::PARALYZED)
    }

    /// Mid-animation; no new action may start. No motor reads as busy.
    pub fn is_busy(&self) -> bool {
        self.motor.is_none_or(|m| m.playing_one_shot)
    }

    pub fn distance_to(&self, other: &Agent) -> f32 {
        self.position.distance(other.position)
    }

    /// Eye position used for sight lines.
    pub fn eye(&self) -> Vec3 {
        let height = self.motor.map_or(Motor::DEFAULT_HEIGHT, |m| m.height);
        self.position + Vec3::Y * (height / 2.0 + height / 3.0)
    }

    /// Upper-body position others look at.
    pub fn torso(&self) -> Vec3 {
        let height = self.motor.map_or(Motor::DEFAULT_HEIGHT, |m| m.height);
        self.position + Vec3::Y * (height / 2.0 + height / 3.5)
    }

    pub fn stealth(&self) -> u32 {
        self.skills.get(super::Skill::Stealth)
    }
}
