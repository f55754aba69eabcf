//! Axis-aligned obstacle boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use royale_core::constants::CONTACT_EPSILON;

/// Immutable axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Obstacle {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box resting on the ground plane with the given footprint centre.
    pub fn on_ground(x: f32, z: f32, half_extents: Vec3) -> Self {
        Self::new(Vec3::new(x, half_extents.y, z), half_extents)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Point containment (inclusive), no inflation.
    pub fn contains(&self, point: Vec3) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// Point containment with X/Z inflated by `radius` and Y left as is.
    pub fn contains_expanded(&self, point: Vec3, radius: f32) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x - radius
            && point.x <= max.x + radius
            && point.z >= min.z - radius
            && point.z <= max.z + radius
            && point.y >= min.y
            && point.y <= max.y
    }

    /// Strict footprint overlap of a disc of `radius` at `point` (XZ only).
    /// Touching the inflated face does not count.
    pub fn overlaps_footprint(&self, point: Vec3, radius: f32) -> bool {
        let min = self.min();
        let max = self.max();
        point.x > min.x - radius
            && point.x < max.x + radius
            && point.z > min.z - radius
            && point.z < max.z + radius
    }

    /// Whether an upright body centred at `center` intersects the box.
    /// Bodies resting on the top face or touching the bottom face do not.
    pub fn overlaps_body(&self, center: Vec3, radius: f32, half_height: f32) -> bool {
        let feet = center.y - half_height;
        let head = center.y + half_height;
        feet < self.top() - CONTACT_EPSILON
            && head > self.bottom() + CONTACT_EPSILON
            && self.overlaps_footprint(center, radius)
    }

    /// Distance along a ray to the box, if hit within `max_dist` (slab method).
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<f32> {
        let min = self.min();
        let max = self.max();

        let inv = |d: f32| if d.abs() > 1e-6 { 1.0 / d } else { f32::MAX };
        let inv_dir = Vec3::new(inv(direction.x), inv(direction.y), inv(direction.z));

        let t1 = (min.x - origin.x) * inv_dir.x;
        let t2 = (max.x - origin.x) * inv_dir.x;
        let t3 = (min.y - origin.y) * inv_dir.y;
        let t4 = (max.y - origin.y) * inv_dir.y;
        let t5 = (min.z - origin.z) * inv_dir.z;
        let t6 = (max.z - origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax < 0.0 || tmin > tmax {
            return None;
        }
        let t = if tmin >= 0.0 { tmin } else { tmax };
        (t <= max_dist).then_some(t)
    }

    /// Horizontal distance from `point` to the nearest point of the footprint.
    pub fn footprint_distance(&self, point: Vec3) -> f32 {
        let min = self.min();
        let max = self.max();
        let cx = point.x.clamp(min.x, max.x);
        let cz = point.z.clamp(min.z, max.z);
        let dx = point.x - cx;
        let dz = point.z - cz;
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Obstacle {
        Obstacle::on_ground(0.0, 0.0, Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_on_ground_sits_on_plane() {
        let b = unit_box();
        assert_eq!(b.bottom(), 0.0);
        assert_eq!(b.top(), 2.0);
    }

    #[test]
    fn test_contains_expanded_inflates_xz_only() {
        let b = unit_box();
        // 0.4 outside the face on X, inside when inflated by 0.5.
        assert!(!b.contains(Vec3::new(1.4, 1.0, 0.0)));
        assert!(b.contains_expanded(Vec3::new(1.4, 1.0, 0.0), 0.5));
        // Above the top is never inflated.
        assert!(!b.contains_expanded(Vec3::new(0.0, 2.4, 0.0), 0.5));
    }

    #[test]
    fn test_body_resting_on_top_does_not_overlap() {
        let b = unit_box();
        let standing = Vec3::new(0.0, 2.0 + 0.9, 0.0);
        assert!(!b.overlaps_body(standing, 0.5, 0.9));
        let sunk = Vec3::new(0.0, 2.0 + 0.5, 0.0);
        assert!(b.overlaps_body(sunk, 0.5, 0.9));
    }

    #[test]
    fn test_ray_distance() {
        let b = unit_box();
        let hit = b.ray_distance(Vec3::new(-5.0, 1.0, 0.0), Vec3::X, 100.0);
        assert!((hit.unwrap() - 4.0).abs() < 1e-5);

        assert!(b.ray_distance(Vec3::new(-5.0, 1.0, 0.0), Vec3::X, 3.0).is_none());
        assert!(b.ray_distance(Vec3::new(-5.0, 1.0, 0.0), -Vec3::X, 100.0).is_none());
    }

    #[test]
    fn test_footprint_distance() {
        let b = unit_box();
        assert_eq!(b.footprint_distance(Vec3::ZERO), 0.0);
        assert!((b.footprint_distance(Vec3::new(4.0, 0.0, 0.0)) - 3.0).abs() < 1e-6);
    }
}
