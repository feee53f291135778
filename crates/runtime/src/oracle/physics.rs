use creature_core::{PhysicsOracle, RayHit};
use glam::Vec3;

/// Axis-aligned box of static geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl WallBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Distance along the ray to the box surface (slab test).
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut near = f32::NEG_INFINITY;
        let mut far = f32::INFINITY;
        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (t0, t1) = ((lo - o) / d, (hi - o) / d);
            near = near.max(t0.min(t1));
            far = far.min(t0.max(t1));
            if near > far {
                return None;
            }
        }
        if far < 0.0 {
            return None;
        }
        Some(near.max(0.0))
    }

    fn covers(&self, at: Vec3) -> bool {
        at.x >= self.min.x && at.x <= self.max.x && at.z >= self.min.z && at.z <= self.max.z
    }
}

/// Flat ground at `y = 0` with optional wall boxes standing on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArenaPhysics {
    walls: Vec<WallBox>,
}

impl ArenaPhysics {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn with_wall(mut self, wall: WallBox) -> Self {
        self.walls.push(wall);
        self
    }

    pub fn walls(&self) -> &[WallBox] {
        &self.walls
    }
}

impl PhysicsOracle for ArenaPhysics {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.walls
            .iter()
            .filter_map(|wall| wall.intersect(origin, direction))
            .filter(|&distance| distance <= max_distance)
            .min_by(f32::total_cmp)
            .map(|distance| RayHit {
                point: origin + direction * distance,
                distance,
            })
    }

    /// The top of the highest wall below `at`, or the floor.
    fn ground_height(&self, at: Vec3) -> Option<f32> {
        let floor = self
            .walls
            .iter()
            .filter(|wall| wall.covers(at) && wall.max.y <= at.y)
            .map(|wall| wall.max.y)
            .fold(0.0, f32::max);
        Some(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> ArenaPhysics {
        ArenaPhysics::flat().with_wall(WallBox::new(Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 3.0, 5.0)))
    }

    #[test]
    fn wall_blocks_the_line_through_it() {
        let physics = arena();
        let hit = physics.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 10.0);
        assert_eq!(hit.map(|h| h.distance), Some(4.0));
        assert!(!physics.line_clear(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 8.0)));
    }

    #[test]
    fn rays_pass_beside_over_and_short_of_walls() {
        let physics = arena();
        assert!(physics.line_clear(Vec3::new(3.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 8.0)));
        assert!(physics.line_clear(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, 4.0, 8.0)));
        assert!(physics.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 3.5).is_none());
        assert!(physics.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 50.0).is_none());
    }

    #[test]
    fn standing_on_a_wall_raises_the_ground() {
        let physics = arena();
        assert_eq!(physics.ground_height(Vec3::new(0.0, 10.0, 4.5)), Some(3.0));
        assert_eq!(physics.ground_height(Vec3::new(0.0, 1.0, 4.5)), Some(0.0));
        assert_eq!(physics.ground_height(Vec3::new(6.0, 10.0, 4.5)), Some(0.0));
    }
}
