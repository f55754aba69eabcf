//! Projectile and grenade flight.
//!
//! Projectiles fly straight at constant speed. A step is cut short where the
//! projectile meets geometry or runs out of range; such projectiles are
//! marked spent and culled once both hit passes have swept them. Grenades
//! fall under gravity through the movement resolver until they come to rest.

use hecs::{Entity, World};

use royale_core::components::{Collider, Grenade, Projectile};
use royale_core::types::{Position, Velocity};
use royale_world::WorldMap;

use crate::systems::movement::resolve_motion;

/// Collision proxy for a thrown grenade.
const GRENADE_COLLIDER: Collider = Collider {
    radius: 0.15,
    height: 0.3,
};

/// Advance projectiles and grenades by `dt`.
pub fn run(world: &mut World, map: &WorldMap, dt: f32) {
    for (_entity, (pos, projectile)) in world.query_mut::<(&mut Position, &mut Projectile)>() {
        let start = pos.0;
        // Share of the full step still within range.
        let reach = if projectile.remaining_lifetime < dt {
            (projectile.remaining_lifetime / dt).max(0.0)
        } else {
            1.0
        };
        projectile.remaining_lifetime -= dt;
        let end = start + projectile.direction * projectile.speed * dt * reach;

        projectile.previous_position = start;
        match map.projectile_contact(start, end) {
            Some(t) => {
                pos.0 = start.lerp(end, t);
                projectile.spent = true;
            }
            None => {
                pos.0 = end;
                projectile.spent = projectile.remaining_lifetime <= 0.0;
            }
        }
    }

    for (_entity, (pos, vel, grenade)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Grenade)>()
    {
        if grenade.resting {
            continue;
        }
        let result = resolve_motion(map, pos, vel, &GRENADE_COLLIDER, dt);
        if result.on_ground {
            vel.0 = glam::Vec3::ZERO;
            grenade.resting = true;
        }
    }
}

/// Despawn projectiles that hit geometry or expired this step.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn cull_spent(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.spent)
            .map(|(entity, _)| entity),
    );
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
