//! In-memory implementations of the creature-core oracle traits.
//!
//! These stand in for an engine's renderer, physics scene and world state.
//! They are bundled into an [`OracleManager`] so the runtime can build an
//! [`AiEnv`] for each tick on demand.
mod lighting;
mod physics;
mod world;

use std::sync::Arc;

use creature_core::{AiEnv, Env};

pub use lighting::{LightField, PointLight};
pub use physics::{ArenaPhysics, WallBox};
pub use world::WorldFlags;

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) lighting: Arc<LightField>,
    pub(crate) physics: Arc<ArenaPhysics>,
    pub(crate) world: Arc<WorldFlags>,
}

impl OracleManager {
    pub fn new(lighting: Arc<LightField>, physics: Arc<ArenaPhysics>, world: Arc<WorldFlags>) -> Self {
        Self {
            lighting,
            physics,
            world,
        }
    }

    /// Open ground in daylight, nothing blocking, not loading.
    pub fn open_field() -> Self {
        Self::new(
            Arc::new(LightField::new(1.0)),
            Arc::new(ArenaPhysics::flat()),
            Arc::new(WorldFlags::outdoors()),
        )
    }

    /// Borrows every oracle as the environment one tick consults.
    pub fn as_ai_env(&self) -> AiEnv<'_> {
        Env::with_all(self.lighting.as_ref(), self.physics.as_ref(), self.world.as_ref()).into_ai_env()
    }

    pub fn lighting(&self) -> &LightField {
        &self.lighting
    }

    pub fn physics(&self) -> &ArenaPhysics {
        &self.physics
    }

    pub fn world(&self) -> &WorldFlags {
        &self.world
    }
}
