//! Fundamental geometric and simulation types.
//!
//! World axes: x = East, y = Up, z = South. The ground plane is `y = 0`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Entity centre in world space (units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Entity velocity in world space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Simulation time tracking. The step length varies frame to frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Distance ignoring height.
    pub fn horizontal_distance_to(&self, other: &Position) -> f32 {
        horizontal_distance(self.0, other.0)
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Speed in the XZ plane.
    pub fn horizontal_speed(&self) -> f32 {
        (self.0.x * self.0.x + self.0.z * self.0.z).sqrt()
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Distance between two points projected onto the ground plane.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Unit vector in the XZ plane pointing from `from` to `to`.
/// Zero when the points share a column.
pub fn horizontal_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

/// Heading in radians from `from` toward `to` (0 = -Z, counter-clockwise).
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    (-dx).atan2(-dz)
}
