//! Player control: movement from the control intent, plus the effects of the
//! fire, grenade and medkit commands.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use royale_agent_ai::fsm::aim_with_spread;
use royale_core::components::{Collider, GroundContact, Health, Player, PlayerControl, PlayerInventory};
use royale_core::constants::*;
use royale_core::enums::ProjectileOwner;
use royale_core::state::MatchStats;
use royale_core::types::{Position, Velocity};
use royale_world::WorldMap;

use crate::systems::movement::resolve_motion;
use crate::weapons::{Loadout, TriggerResult};
use crate::world_setup;

/// Move the player from its current control intent.
pub fn run(world: &mut World, map: &WorldMap, dt: f32) {
    for (_entity, (_player, pos, vel, collider, contact, control, health)) in world.query_mut::<(
        &Player,
        &mut Position,
        &mut Velocity,
        &Collider,
        &mut GroundContact,
        &mut PlayerControl,
        &Health,
    )>() {
        if !health.alive {
            continue;
        }

        vel.0.x = control.move_intent.x * PLAYER_MOVE_SPEED;
        vel.0.z = control.move_intent.z * PLAYER_MOVE_SPEED;
        if control.jump_requested && contact.on_ground {
            vel.0.y = PLAYER_JUMP_SPEED;
        }
        control.jump_requested = false;

        let result = resolve_motion(map, pos, vel, collider, dt);
        contact.on_ground = result.on_ground;
    }
}

/// Pull the trigger of the equipped weapon. Returns the number of projectiles
/// spawned (zero on cooldown, mid-reload, or when a reload started instead).
pub fn fire<R: Rng + ?Sized>(
    world: &mut World,
    player: Entity,
    rng: &mut R,
    stats: &mut MatchStats,
) -> u32 {
    let (origin, aim, spec) = {
        let Ok((pos, control, health, loadout)) = world
            .query_one_mut::<(&Position, &PlayerControl, &Health, &mut Loadout)>(player)
        else {
            return 0;
        };
        if !health.alive {
            return 0;
        }
        match loadout.pull_trigger() {
            TriggerResult::Fired(spec) => (pos.0 + Vec3::Y * EYE_OFFSET, control.aim, spec),
            TriggerResult::ReloadStarted | TriggerResult::NotReady => return 0,
        }
    };

    let mut spawned = 0;
    for _ in 0..spec.pellets {
        let Some(direction) = aim_with_spread(origin, origin + aim, spec.spread, rng) else {
            continue;
        };
        world_setup::spawn_projectile(
            world,
            origin,
            direction,
            spec.projectile_speed,
            spec.damage,
            spec.range,
            ProjectileOwner::Player,
        );
        spawned += 1;
    }
    stats.shots_fired += spawned;
    spawned
}

/// Throw a grenade along the aim direction, lofted upward.
pub fn throw_grenade(world: &mut World, player: Entity) -> bool {
    let (origin, velocity) = {
        let Ok((pos, control, health, inventory)) = world
            .query_one_mut::<(&Position, &PlayerControl, &Health, &mut PlayerInventory)>(player)
        else {
            return false;
        };
        if !health.alive || inventory.grenades == 0 || inventory.grenade_cooldown > 0.0 {
            return false;
        }
        inventory.grenades -= 1;
        inventory.grenade_cooldown = GRENADE_COOLDOWN_SECS;

        let dir = (control.aim + Vec3::Y * GRENADE_THROW_LOFT).normalize_or_zero();
        (pos.0 + Vec3::Y * EYE_OFFSET, dir * GRENADE_THROW_SPEED)
    };

    world_setup::spawn_grenade(world, origin, velocity);
    true
}

/// Heal from a medkit. Returns the health restored, or `None` when there is
/// no medkit, the cooldown is running, or health is already full.
pub fn use_medkit(world: &mut World, player: Entity) -> Option<u32> {
    let (health, inventory) = world
        .query_one_mut::<(&mut Health, &mut PlayerInventory)>(player)
        .ok()?;
    if !health.alive
        || inventory.medkits == 0
        || inventory.medkit_cooldown > 0.0
        || health.current >= health.max
    {
        return None;
    }

    let healed = MEDKIT_HEAL.min(health.max - health.current);
    health.current += healed;
    inventory.medkits -= 1;
    inventory.medkit_cooldown = MEDKIT_COOLDOWN_SECS;
    debug_assert!(health.current <= health.max);
    Some(healed)
}
