//! Data-driven content definitions and loaders.
//!
//! This crate reads the tables the creature model is tuned with:
//! - Species sensor tables (RON)
//! - Spell catalogs (RON), layered over the built-in descriptors
//! - Model tuning configuration (TOML)
//! - Skirmish layouts for the reference host (RON)
//!
//! Content is read once at startup and handed to the runtime as plain
//! creature-core values.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, CreatureSpec, LightSpec, PlayerSpec, SensorLoader, Skirmish,
    SkirmishLoader, SpellLoader, WallSpec,
};
