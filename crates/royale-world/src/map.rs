//! Static world: obstacle list, ground plane, and collision queries.
//!
//! Movement is resolved one axis group at a time (ground, X, Z, then vertical
//! sweeps against roofs and ceilings). A blocked axis never affects motion on
//! the others, which is what makes bodies slide along walls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use royale_core::constants::{CONTACT_EPSILON, WORLD_HALF_SIZE};

use crate::obstacle::Obstacle;

/// Height of the ground plane.
pub const GROUND_Y: f32 = 0.0;

/// Axes whose displacement was cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

/// Result of resolving one displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    pub actual_delta: Vec3,
    pub blocked: BlockedAxes,
    pub on_ground: bool,
}

/// The arena. Built once per match and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMap {
    obstacles: Vec<Obstacle>,
    half_size: f32,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new(Vec::new(), WORLD_HALF_SIZE)
    }
}

impl WorldMap {
    pub fn new(obstacles: Vec<Obstacle>, half_size: f32) -> Self {
        Self {
            obstacles,
            half_size,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// True iff no obstacle, inflated by `radius` on X/Z, contains `point`.
    pub fn is_position_valid(&self, point: Vec3, radius: f32) -> bool {
        !self
            .obstacles
            .iter()
            .any(|o| o.contains_expanded(point, radius))
    }

    /// Resolve a desired displacement for an upright body centred at `position`.
    pub fn check_collision(
        &self,
        position: Vec3,
        desired_delta: Vec3,
        radius: f32,
        height: f32,
    ) -> CollisionResult {
        let half_height = height * 0.5;
        let mut actual = desired_delta;
        let mut blocked = BlockedAxes::default();
        let mut on_ground = false;

        // Ground plane.
        if desired_delta.y <= 0.0 && position.y + desired_delta.y - half_height <= GROUND_Y {
            actual.y = GROUND_Y + half_height - position.y;
            blocked.y = true;
            on_ground = true;
        }

        // X axis.
        if actual.x != 0.0 {
            let probe = position + Vec3::new(actual.x, 0.0, 0.0);
            if self.body_overlaps_any(probe, radius, half_height) {
                actual.x = 0.0;
                blocked.x = true;
            }
        }

        // Z axis, from the resolved X.
        if actual.z != 0.0 {
            let probe = position + Vec3::new(actual.x, 0.0, actual.z);
            if self.body_overlaps_any(probe, radius, half_height) {
                actual.z = 0.0;
                blocked.z = true;
            }
        }

        let footprint = position + Vec3::new(actual.x, 0.0, actual.z);

        if actual.y < 0.0 {
            // Falling: land on the highest roof crossed this step.
            let old_feet = position.y - half_height;
            let new_feet = old_feet + actual.y;
            let roof = self
                .obstacles
                .iter()
                .filter(|o| o.overlaps_footprint(footprint, radius))
                .map(Obstacle::top)
                .filter(|&top| old_feet >= top - CONTACT_EPSILON && new_feet < top)
                .fold(None, |best: Option<f32>, top| {
                    Some(best.map_or(top, |b| b.max(top)))
                });
            if let Some(top) = roof {
                actual.y = top + half_height - position.y;
                blocked.y = true;
                on_ground = true;
            }
        } else if actual.y > 0.0 && !on_ground {
            // Rising: stop under the lowest ceiling crossed this step.
            let old_head = position.y + half_height;
            let new_head = old_head + actual.y;
            let ceiling = self
                .obstacles
                .iter()
                .filter(|o| o.overlaps_footprint(footprint, radius))
                .map(Obstacle::bottom)
                .filter(|&bottom| old_head <= bottom + CONTACT_EPSILON && new_head > bottom)
                .fold(None, |best: Option<f32>, bottom| {
                    Some(best.map_or(bottom, |b| b.min(bottom)))
                });
            if let Some(bottom) = ceiling {
                actual.y = (bottom - half_height - position.y).max(0.0);
                blocked.y = true;
            }
        }

        CollisionResult {
            actual_delta: actual,
            blocked,
            on_ground,
        }
    }

    /// Whether a point projectile is inside geometry or at/below the ground.
    pub fn check_projectile_collision(&self, point: Vec3) -> bool {
        point.y <= GROUND_Y || self.obstacles.iter().any(|o| o.contains(point))
    }

    /// Fraction of the segment `from..to` a point projectile covers before it
    /// meets the ground or an obstacle. `None` when the path is clear.
    pub fn projectile_contact(&self, from: Vec3, to: Vec3) -> Option<f32> {
        if self.check_projectile_collision(from) {
            return Some(0.0);
        }
        let delta = to - from;
        let len = delta.length();
        if len < 1e-6 {
            return None;
        }
        let dir = delta / len;

        let ground = (to.y <= GROUND_Y).then(|| (from.y - GROUND_Y) / (from.y - to.y));
        let obstacle = self
            .obstacles
            .iter()
            .filter_map(|o| o.ray_distance(from, dir, len))
            .map(|d| d / len)
            .min_by(f32::total_cmp);

        [ground, obstacle]
            .into_iter()
            .flatten()
            .map(|t| t.clamp(0.0, 1.0))
            .min_by(f32::total_cmp)
    }

    /// Whether any obstacle cuts the segment between two points.
    pub fn raycast_blocked(&self, from: Vec3, to: Vec3) -> bool {
        let delta = to - from;
        let dist = delta.length();
        if dist < 1e-6 {
            return false;
        }
        let dir = delta / dist;
        self.obstacles
            .iter()
            .any(|o| o.ray_distance(from, dir, dist).is_some())
    }

    /// Clamp a point to the playable square, `margin` inside the boundary.
    pub fn clamp_to_bounds(&self, point: Vec3, margin: f32) -> Vec3 {
        let limit = (self.half_size - margin).max(0.0);
        Vec3::new(
            point.x.clamp(-limit, limit),
            point.y,
            point.z.clamp(-limit, limit),
        )
    }

    fn body_overlaps_any(&self, center: Vec3, radius: f32, half_height: f32) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.overlaps_body(center, radius, half_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 0.5;
    const H: f32 = 1.8;

    /// A wall spanning z in [-10, 10] with its west face at x = 5.
    fn wall_map() -> WorldMap {
        WorldMap::new(
            vec![Obstacle::on_ground(6.0, 0.0, Vec3::new(1.0, 3.0, 10.0))],
            100.0,
        )
    }

    #[test]
    fn test_is_position_valid_matches_expanded_containment() {
        let map = wall_map();
        // Inside the wall.
        assert!(!map.is_position_valid(Vec3::new(6.0, 1.0, 0.0), R));
        // Within radius of the west face.
        assert!(!map.is_position_valid(Vec3::new(4.6, 1.0, 0.0), R));
        // Just beyond the inflated face.
        assert!(map.is_position_valid(Vec3::new(4.4, 1.0, 0.0), R));
        // Above the wall: Y is not inflated.
        assert!(map.is_position_valid(Vec3::new(6.0, 6.5, 0.0), R));

        for obstacle in map.obstacles() {
            let p = obstacle.center;
            assert_eq!(map.is_position_valid(p, R), !obstacle.contains_expanded(p, R));
        }
    }

    #[test]
    fn test_resting_on_ground_stays_put() {
        let map = WorldMap::default();
        let pos = Vec3::new(0.0, H / 2.0, 0.0);
        let result = map.check_collision(pos, Vec3::ZERO, R, H);
        assert!(result.on_ground);
        assert_eq!(result.actual_delta.y, 0.0);
    }

    #[test]
    fn test_falling_clamps_to_ground() {
        let map = WorldMap::default();
        let pos = Vec3::new(0.0, 1.0, 0.0);
        let result = map.check_collision(pos, Vec3::new(0.0, -0.5, 0.0), R, H);
        assert!(result.on_ground);
        assert!(result.blocked.y);
        assert!((pos.y + result.actual_delta.y - H / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_not_on_ground() {
        let map = WorldMap::default();
        let pos = Vec3::new(0.0, 10.0, 0.0);
        let result = map.check_collision(pos, Vec3::new(0.0, -0.2, 0.0), R, H);
        assert!(!result.on_ground);
        assert!((result.actual_delta.y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_wall_slide_keeps_parallel_motion() {
        let map = wall_map();
        let pos = Vec3::new(4.3, H / 2.0, 0.0);
        let desired = Vec3::new(0.5, 0.0, 0.7);
        let result = map.check_collision(pos, desired, R, H);
        assert!(result.blocked.x, "moving into the wall must block X");
        assert!(!result.blocked.z);
        assert_eq!(result.actual_delta.x, 0.0);
        assert!((result.actual_delta.z - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_moving_away_from_wall_is_free() {
        let map = wall_map();
        let pos = Vec3::new(4.4, H / 2.0, 0.0);
        let result = map.check_collision(pos, Vec3::new(-1.0, 0.0, 0.0), R, H);
        assert!(!result.blocked.x);
        assert!((result.actual_delta.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_land_on_roof() {
        let map = wall_map();
        // Feet at 6.2, roof at 6.0.
        let pos = Vec3::new(6.0, 6.2 + H / 2.0, 0.0);
        let result = map.check_collision(pos, Vec3::new(0.0, -0.5, 0.0), R, H);
        assert!(result.on_ground);
        let feet = pos.y + result.actual_delta.y - H / 2.0;
        assert!((feet - 6.0).abs() < 1e-4, "feet should rest on roof, got {feet}");
    }

    #[test]
    fn test_walk_across_roof() {
        let map = wall_map();
        let pos = Vec3::new(6.0, 6.0 + H / 2.0, 0.0);
        let result = map.check_collision(pos, Vec3::new(0.2, -0.01, 0.3), R, H);
        assert!(!result.blocked.x);
        assert!(!result.blocked.z);
        assert!(result.on_ground);
    }

    #[test]
    fn test_head_hits_ceiling() {
        // Overhang floating between y=4 and y=5.
        let map = WorldMap::new(
            vec![Obstacle::new(Vec3::new(0.0, 4.5, 0.0), Vec3::new(3.0, 0.5, 3.0))],
            100.0,
        );
        let pos = Vec3::new(0.0, 3.0, 0.0); // head at 3.9
        let result = map.check_collision(pos, Vec3::new(0.0, 0.5, 0.0), R, H);
        assert!(result.blocked.y);
        assert!((pos.y + result.actual_delta.y + H / 2.0 - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_projectile_collision() {
        let map = wall_map();
        assert!(map.check_projectile_collision(Vec3::new(6.0, 1.0, 0.0)));
        // Within a body radius of the face, but projectiles are points.
        assert!(!map.check_projectile_collision(Vec3::new(4.8, 1.0, 0.0)));
        assert!(map.check_projectile_collision(Vec3::new(0.0, 0.0, 0.0)));
        assert!(map.check_projectile_collision(Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_raycast_blocked() {
        let map = wall_map();
        assert!(map.raycast_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(12.0, 1.0, 0.0)));
        assert!(!map.raycast_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 12.0)));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let map = WorldMap::default();
        let p = map.clamp_to_bounds(Vec3::new(500.0, 3.0, -500.0), 5.0);
        assert_eq!(p, Vec3::new(95.0, 3.0, -95.0));
    }

    #[test]
    fn test_projectile_contact_fraction() {
        let map = wall_map();
        // West face at x = 5, four units into an eight unit step.
        let t = map
            .projectile_contact(Vec3::new(1.0, 1.0, 0.0), Vec3::new(9.0, 1.0, 0.0))
            .unwrap();
        assert!((t - 0.5).abs() < 1e-5);

        // Ground at y = 0, a quarter of the way down.
        let t = map
            .projectile_contact(Vec3::new(-20.0, 1.0, 0.0), Vec3::new(-20.0, -3.0, 0.0))
            .unwrap();
        assert!((t - 0.25).abs() < 1e-5);

        assert_eq!(
            map.projectile_contact(Vec3::new(-20.0, 1.0, 0.0), Vec3::new(-10.0, 1.0, 0.0)),
            None
        );
        assert_eq!(
            map.projectile_contact(Vec3::new(6.0, 1.0, 0.0), Vec3::new(-6.0, 1.0, 0.0)),
            Some(0.0),
            "starting inside the wall"
        );
    }
}
