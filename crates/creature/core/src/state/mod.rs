//! Agent state: identity, resources, conditions, equipment, and the
//! per-agent AI memory.
mod agent;
mod career;
mod common;
mod conditions;
mod items;
mod mind;
mod motor;
mod roster;

pub use agent::{Agent, DEFAULT_APPEARANCE};
pub use career::{
    ArmorClasses, Attributes, Career, Materials, Proficiencies, Shields, Skill, Skills, Tolerance,
    Tolerances,
};
pub use common::{AgentKind, EntityId, ResourceMeter, SpeciesId, Team};
pub use conditions::{ActiveEffect, ActiveEffects, Conditions};
pub use items::{
    ArmorClass, EquipSlot, Hands, Inventory, Item, ItemKind, ItemUid, Material, ShieldShape,
};
pub use mind::{Awareness, Mind, PerceptionState};
pub use motor::{LightSource, Motor};
pub use roster::Roster;
