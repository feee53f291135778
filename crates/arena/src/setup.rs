//! Turns loaded content into a ready runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use creature_content::{ContentFactory, Skirmish};
use glam::Vec3;
use runtime::{
    ArenaPhysics, LightField, OracleManager, PointLight, Runtime, RuntimeConfig, WallBox,
    WorldFlags,
};
use tracing::info;

use crate::config::ArenaConfig;

/// Builds the lighting, physics and world oracles a skirmish describes.
///
/// Dungeons get no ambient light; only the placed lights reach into them.
pub fn skirmish_oracles(skirmish: &Skirmish) -> OracleManager {
    let mut lighting = LightField::new(skirmish.daylight);
    if skirmish.in_dungeon {
        lighting = lighting.with_ambient(0.0);
    }
    for light in &skirmish.lights {
        lighting = lighting.with_light(PointLight::new(
            Vec3::from(light.position),
            light.radius,
            light.intensity,
        ));
    }

    let physics = skirmish
        .walls
        .iter()
        .fold(ArenaPhysics::flat(), |physics, wall| {
            physics.with_wall(WallBox::new(Vec3::from(wall.min), Vec3::from(wall.max)))
        });

    OracleManager::new(
        Arc::new(lighting),
        Arc::new(physics),
        Arc::new(WorldFlags::new(skirmish.in_dungeon)),
    )
}

/// Loads tuning, tables and the named skirmish, then spawns it.
pub fn build_runtime(config: &ArenaConfig) -> Result<Runtime> {
    let factory = ContentFactory::new(&config.data_dir);
    let ai = factory.load_config().context("loading tuning config")?;
    let sensors = factory.load_sensors().context("loading sensor table")?;
    let catalog = factory.load_spells().context("loading spell catalog")?;
    let skirmish = factory
        .load_skirmish(&config.skirmish)
        .with_context(|| format!("loading skirmish '{}'", config.skirmish))?;

    let world_seed = config.seed.unwrap_or(skirmish.world_seed);
    info!(
        skirmish = %skirmish.name,
        creatures = skirmish.creatures.len(),
        seed = world_seed,
        "skirmish loaded"
    );

    let creatures = skirmish.creature_agents(&catalog);
    Runtime::builder()
        .config(RuntimeConfig {
            ai,
            world_seed,
            player_level: config.player_level,
            ..RuntimeConfig::default()
        })
        .oracles(skirmish_oracles(&skirmish))
        .catalog(catalog)
        .sensors(sensors)
        .player(skirmish.player_agent())
        .spawn_all(creatures)
        .build()
        .context("spawning skirmish")
}
