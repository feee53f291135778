//! Perception and decision model for non-player combatants.
//!
//! Each tick a creature first updates what it knows about its target
//! ([`PerceptionController`]), then runs the [`DecisionEngine`] pipeline to
//! pick at most one special action on top of the host's baseline behavior.
//! The host supplies lighting, physics and world flags through the oracle
//! traits in [`env`] and applies the emitted [`Action`]s itself.
pub mod config;
pub mod decision;
pub mod env;
pub mod equipment;
pub mod error;
pub mod geometry;
pub mod magic;
pub mod perception;
pub mod policy;
pub mod spawn;
pub mod state;

pub use config::AiConfig;
pub use decision::{Action, CastError, DecisionContext, DecisionEngine, Step, check_cast};
pub use env::{
    AgentRng, AiEnv, Env, GameTime, LightingOracle, OpenGround, OracleError, PcgRng, PhysicsOracle,
    RayHit, WorldOracle, compute_seed,
};
pub use equipment::{
    EquipmentAdvisor, Reequip, armor_value, can_equip, random_material, should_equip, slot_for,
    weapon_value,
};
pub use error::{AiError, ErrorSeverity};
pub use geometry::{Color, angle_degrees, planar_distance};
pub use magic::{
    ClassifiedSpellbook, CustomSpell, EffectKey, Element, Relation, Spell, SpellCatalog,
    SpellLookupError, SpellRole, TargetEffect, TargetEffectAnalyzer, TargetType, relation,
};
pub use perception::{
    PerceptionController, PerceptionReport, ProfileError, SenseContext, SensorProfile,
    SensorRegistry, SightAcuity, alert_allies, can_hear, can_see, compute_noise,
    detection_threshold, stealth_chance,
};
pub use policy::{BaselineBehavior, CreaturePolicy, MonsterPolicy, line_of_sight};
pub use spawn::SpawnAdjuster;
pub use state::{
    Agent, AgentKind, Awareness, EntityId, Item, ItemKind, Mind, Motor, PerceptionState,
    ResourceMeter, Roster, Skill, Skills, SpeciesId, Team,
};
