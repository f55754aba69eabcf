//! Movement and collision resolution.
//!
//! Applies gravity, asks the world map how far a body may actually move, and
//! cancels velocity on every blocked axis. Player and agents share this path;
//! only the source of horizontal velocity differs.

use royale_core::components::Collider;
use royale_core::constants::GRAVITY;
use royale_core::types::{Position, Velocity};
use royale_world::{CollisionResult, WorldMap};

/// Integrate one body over `dt` against static geometry.
pub fn resolve_motion(
    map: &WorldMap,
    position: &mut Position,
    velocity: &mut Velocity,
    collider: &Collider,
    dt: f32,
) -> CollisionResult {
    velocity.0.y -= GRAVITY * dt;

    let desired = velocity.0 * dt;
    let result = map.check_collision(position.0, desired, collider.radius, collider.height);
    position.0 += result.actual_delta;

    if result.blocked.x {
        velocity.0.x = 0.0;
    }
    if result.blocked.y {
        velocity.0.y = 0.0;
    }
    if result.blocked.z {
        velocity.0.z = 0.0;
    }

    result
}
