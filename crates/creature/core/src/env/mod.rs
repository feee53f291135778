//! Traits describing the host engine services the creature model consumes.
//!
//! Oracles expose lighting samples, static-geometry raycasts and a handful of
//! world flags. The [`Env`] aggregate bundles them so perception and decision
//! code can reach everything it needs without hard coupling to a concrete
//! engine. Any oracle may be absent; the `*_or_*` helpers convert absence into
//! the fail-closed value a tick should see.
mod error;
mod rng;
mod time;

pub use error::OracleError;
pub use rng::{AgentRng, PcgRng, compute_seed};
pub use time::GameTime;

use glam::Vec3;
use tracing::debug;

use crate::geometry::Color;

/// Ambient light queries.
pub trait LightingOracle: Send + Sync {
    /// Light falling on a point in the world.
    fn light_at(&self, point: Vec3) -> Result<Color, OracleError>;

    /// Sky brightness multiplier for outdoor backgrounds, `0` at night.
    fn daylight(&self) -> f32;
}

/// A hit against static level geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Static-geometry queries. Entities are never reported as hits.
pub trait PhysicsOracle: Send + Sync {
    /// Casts a ray against static geometry. `direction` is normalized.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Height of the walkable ground below `at`, if any.
    fn ground_height(&self, at: Vec3) -> Option<f32>;

    /// True when no static geometry lies on the segment `from`-`to`.
    fn line_clear(&self, from: Vec3, to: Vec3) -> bool {
        let delta = to - from;
        match delta.try_normalize() {
            Some(dir) => self.raycast(from, dir, delta.length()).is_none(),
            None => true,
        }
    }

    /// True when a sphere of `radius` can travel from `from` to `to`.
    ///
    /// The default approximates the sweep with the center line plus four
    /// offset rays.
    fn sweep_clear(&self, from: Vec3, to: Vec3, radius: f32) -> bool {
        let Some(dir) = (to - from).try_normalize() else {
            return true;
        };
        let side = dir.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X) * radius;
        let up = Vec3::Y * radius;
        [Vec3::ZERO, side, -side, up, -up]
            .into_iter()
            .all(|offset| self.line_clear(from + offset, to + offset))
    }
}

/// Coarse world state flags supplied by the host.
pub trait WorldOracle: Send + Sync {
    /// The encounter takes place indoors or underground.
    fn in_dungeon(&self) -> bool;

    /// The player stands somewhere dark enough for shadow magic to work.
    fn player_in_darkness(&self) -> bool;

    /// A saved game is being restored; one-shot spawn initializers must not
    /// overwrite restored values.
    fn load_in_progress(&self) -> bool;
}

/// Aggregates the oracles consulted during a tick.
pub struct Env<'a, L, P, W>
where
    L: LightingOracle + ?Sized,
    P: PhysicsOracle + ?Sized,
    W: WorldOracle + ?Sized,
{
    lighting: Option<&'a L>,
    physics: Option<&'a P>,
    world: Option<&'a W>,
}

impl<L, P, W> Clone for Env<'_, L, P, W>
where
    L: LightingOracle + ?Sized,
    P: PhysicsOracle + ?Sized,
    W: WorldOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, P, W> Copy for Env<'_, L, P, W>
where
    L: LightingOracle + ?Sized,
    P: PhysicsOracle + ?Sized,
    W: WorldOracle + ?Sized,
{
}

impl<L, P, W> core::fmt::Debug for Env<'_, L, P, W>
where
    L: LightingOracle + ?Sized,
    P: PhysicsOracle + ?Sized,
    W: WorldOracle + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("lighting", &self.lighting.is_some())
            .field("physics", &self.physics.is_some())
            .field("world", &self.world.is_some())
            .finish()
    }
}

pub type AiEnv<'a> = Env<'a, dyn LightingOracle + 'a, dyn PhysicsOracle + 'a, dyn WorldOracle + 'a>;

impl<'a, L, P, W> Env<'a, L, P, W>
where
    L: LightingOracle + ?Sized,
    P: PhysicsOracle + ?Sized,
    W: WorldOracle + ?Sized,
{
    pub fn new(lighting: Option<&'a L>, physics: Option<&'a P>, world: Option<&'a W>) -> Self {
        Self {
            lighting,
            physics,
            world,
        }
    }

    pub fn with_all(lighting: &'a L, physics: &'a P, world: &'a W) -> Self {
        Self::new(Some(lighting), Some(physics), Some(world))
    }

    pub fn empty() -> Self {
        Self {
            lighting: None,
            physics: None,
            world: None,
        }
    }

    /// Returns the LightingOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LightingNotAvailable` if no lighting oracle was provided.
    pub fn lighting(&self) -> Result<&'a L, OracleError> {
        self.lighting.ok_or(OracleError::LightingNotAvailable)
    }

    /// Returns the PhysicsOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PhysicsNotAvailable` if no physics oracle was provided.
    pub fn physics(&self) -> Result<&'a P, OracleError> {
        self.physics.ok_or(OracleError::PhysicsNotAvailable)
    }

    /// Returns the WorldOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world oracle was provided.
    pub fn world(&self) -> Result<&'a W, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Light at a point, or neutral gray when lighting cannot be sampled.
    pub fn light_or_gray(&self, point: Vec3) -> Color {
        match self.lighting().and_then(|lighting| lighting.light_at(point)) {
            Ok(color) => color,
            Err(err) => {
                debug!(%err, "lighting unavailable, assuming neutral gray");
                Color::GRAY
            }
        }
    }

    /// Sky brightness, or fully dark when lighting is missing.
    pub fn daylight_or_dark(&self) -> f32 {
        self.lighting().map(|l| l.daylight()).unwrap_or(0.0)
    }

    /// Whether nothing static lies between `from` and `to`. Without physics
    /// the line counts as blocked, so nothing is sensed or targeted through
    /// geometry the host never described.
    pub fn line_clear_or_blocked(&self, from: Vec3, to: Vec3) -> bool {
        match self.physics() {
            Ok(physics) => physics.line_clear(from, to),
            Err(err) => {
                debug!(%err, "physics unavailable, treating line as blocked");
                false
            }
        }
    }

    /// Like [`Env::line_clear_or_blocked`] for a sphere of `radius`.
    pub fn sweep_clear_or_blocked(&self, from: Vec3, to: Vec3, radius: f32) -> bool {
        self.physics()
            .map(|physics| physics.sweep_clear(from, to, radius))
            .unwrap_or(false)
    }

    /// First static hit along a ray; no physics means nothing is hit.
    pub fn raycast_or_miss(&self, origin: Vec3, direction: Vec3, max: f32) -> Option<RayHit> {
        self.physics()
            .ok()
            .and_then(|physics| physics.raycast(origin, direction, max))
    }

    /// World flags default to "outdoors, lit, not loading".
    pub fn in_dungeon(&self) -> bool {
        self.world().map(|w| w.in_dungeon()).unwrap_or(false)
    }

    pub fn player_in_darkness(&self) -> bool {
        self.world().map(|w| w.player_in_darkness()).unwrap_or(false)
    }

    pub fn load_in_progress(&self) -> bool {
        self.world().map(|w| w.load_in_progress()).unwrap_or(false)
    }
}

/// Flat ground at height zero with no static geometry on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGround;

impl PhysicsOracle for OpenGround {
    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }

    fn ground_height(&self, _at: Vec3) -> Option<f32> {
        Some(0.0)
    }
}

impl<'a> Env<'a, dyn LightingOracle + 'a, dyn PhysicsOracle + 'a, dyn WorldOracle + 'a> {
    /// Open ground and nothing else: every line is clear, lighting and world
    /// flags fall back to their defaults.
    pub fn open_ground() -> Self {
        let physics: &'a (dyn PhysicsOracle + 'a) = &OpenGround;
        Env::new(None, Some(physics), None)
    }
}

impl<'a, L, P, W> Env<'a, L, P, W>
where
    L: LightingOracle + 'a,
    P: PhysicsOracle + 'a,
    W: WorldOracle + 'a,
{
    /// Converts this environment into a trait-object based [`AiEnv`].
    pub fn into_ai_env(self) -> AiEnv<'a> {
        let lighting: Option<&'a dyn LightingOracle> = self.lighting.map(|l| l as _);
        let physics: Option<&'a dyn PhysicsOracle> = self.physics.map(|p| p as _);
        let world: Option<&'a dyn WorldOracle> = self.world.map(|w| w as _);
        Env::new(lighting, physics, world)
    }
}
